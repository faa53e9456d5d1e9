//! Closed cylinder standing upright on the Y axis.

use prism_math::{Interval, Ray, Vec3};

use crate::Hit;

/// A capped cylinder whose base disc is centred at `base`, extending
/// `height` units up along +Y.
#[derive(Debug, Clone)]
pub struct Cylinder {
    base: Vec3,
    height: f64,
    radius: f64,
}

impl Cylinder {
    pub fn new(base: Vec3, height: f64, radius: f64) -> Self {
        Self {
            base,
            height,
            radius,
        }
    }

    pub fn base(&self) -> Vec3 {
        self.base
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Vertical extent of the cylinder.
    fn extent(&self) -> Interval {
        Interval::new(self.base.y, self.base.y + self.height)
    }

    /// Nearest hit on the side wall or either cap.
    ///
    /// The side is found as a circle intersection in the XZ plane, clipped
    /// to the vertical extent. A ray that enters the infinite tube above or
    /// below the cylinder and leaves it within the extent passes through a
    /// cap first, so both caps are tested as discs of their own.
    pub fn intersect(&self, ray: &Ray) -> Hit {
        let extent = self.extent();

        let caps = self
            .intersect_cap(ray, extent.min, Vec3::NEG_Y)
            .nearest(self.intersect_cap(ray, extent.max, Vec3::Y));

        self.intersect_side(ray, extent).nearest(caps)
    }

    fn intersect_side(&self, ray: &Ray, extent: Interval) -> Hit {
        let origin = ray.origin();
        let direction = ray.direction();

        let flat_dir = Vec3::new(direction.x, 0.0, direction.z);
        let flat_len = flat_dir.length();
        if flat_len == 0.0 {
            // Parallel to the axis, only the caps can be hit
            return Hit::NO_HIT;
        }
        let flat_dir = flat_dir / flat_len;

        let offset = Vec3::new(origin.x - self.base.x, 0.0, origin.z - self.base.z);

        // Unit quadratic: s^2 + 2hs + c = 0, s measured along flat_dir
        let h = flat_dir.dot(offset);
        let c = offset.length_squared() - self.radius * self.radius;
        let discriminant = h * h - c;
        if discriminant < 0.0 {
            return Hit::NO_HIT;
        }
        let sqrtd = discriminant.sqrt();

        for s in [-h - sqrtd, -h + sqrtd] {
            // Back to the ray's own parameterisation
            let t = s / flat_len;
            if t <= 0.0 {
                continue;
            }
            let p = ray.at(t);
            if extent.contains(p.y) {
                let normal = Vec3::new(p.x - self.base.x, 0.0, p.z - self.base.z) / self.radius;
                return Hit::forward(t, normal);
            }
        }

        Hit::NO_HIT
    }

    /// Disc of the cylinder's radius at height `y`.
    fn intersect_cap(&self, ray: &Ray, y: f64, normal: Vec3) -> Hit {
        let dy = ray.direction().y;
        if dy == 0.0 {
            return Hit::NO_HIT;
        }

        let t = (y - ray.origin().y) / dy;
        if !(t > 0.0) {
            return Hit::NO_HIT;
        }

        let p = ray.at(t);
        let dx = p.x - self.base.x;
        let dz = p.z - self.base.z;
        if dx * dx + dz * dz > self.radius * self.radius {
            return Hit::NO_HIT;
        }

        Hit::forward(t, normal)
    }
}
