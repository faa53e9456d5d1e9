//! Upright cone closed by a disc at its base.

use prism_math::{Interval, Ray, Vec3};

use crate::Hit;

/// Below this the quadratic term is dropped and the side equation solved as linear.
const PARALLEL_EPSILON: f64 = 1e-12;

/// A cone whose base disc is centred at `base` with the apex `height`
/// units above it.
#[derive(Debug, Clone)]
pub struct Cone {
    base: Vec3,
    height: f64,
    radius: f64,
}

impl Cone {
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

    pub fn apex(&self) -> Vec3 {
        self.base + Vec3::new(0.0, self.height, 0.0)
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Radius shrinkage per unit of height.
    fn slope(&self) -> f64 {
        self.radius / self.height
    }

    /// Nearest hit on the slanted side or the base disc.
    ///
    /// The side is the lower half of the double cone
    /// `x^2 + z^2 = k^2 (y - apex)^2` with `k = radius / height`, clipped to
    /// the vertical extent. There is no top cap.
    pub fn intersect(&self, ray: &Ray) -> Hit {
        self.intersect_side(ray).nearest(self.intersect_base(ray))
    }

    fn intersect_side(&self, ray: &Ray) -> Hit {
        let d = ray.direction();
        let o = ray.origin() - self.apex();
        let k2 = self.slope() * self.slope();

        let a = d.x * d.x + d.z * d.z - k2 * d.y * d.y;
        let b = 2.0 * (d.x * o.x + d.z * o.z - k2 * d.y * o.y);
        let c = o.x * o.x + o.z * o.z - k2 * o.y * o.y;

        let (r0, r1) = if a.abs() < PARALLEL_EPSILON * d.length_squared() {
            // Parallel to a generating line: the equation is linear
            if b == 0.0 {
                return Hit::NO_HIT;
            }
            let t = -c / b;
            (t, t)
        } else {
            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                return Hit::NO_HIT;
            }
            let sqrtd = discriminant.sqrt();
            ((-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a))
        };
        let extent = Interval::new(self.base.y, self.base.y + self.height);

        // Roots on the upper nappe fall outside the extent and are skipped
        for t in [r0.min(r1), r0.max(r1)] {
            if t <= 0.0 {
                continue;
            }
            let p = ray.at(t);
            if extent.contains(p.y) {
                return Hit::forward(t, self.side_normal(p));
            }
        }

        Hit::NO_HIT
    }

    /// Outward normal on the slanted side at `p`.
    fn side_normal(&self, p: Vec3) -> Vec3 {
        let radial = Vec3::new(p.x - self.base.x, 0.0, p.z - self.base.z).normalize_or_zero();
        Vec3::new(radial.x, self.slope(), radial.z).normalize()
    }

    fn intersect_base(&self, ray: &Ray) -> Hit {
        let dy = ray.direction().y;
        if dy == 0.0 {
            return Hit::NO_HIT;
        }

        let t = (self.base.y - ray.origin().y) / dy;
        if !(t > 0.0) {
            return Hit::NO_HIT;
        }

        let p = ray.at(t);
        let dx = p.x - self.base.x;
        let dz = p.z - self.base.z;
        if dx * dx + dz * dz > self.radius * self.radius {
            return Hit::NO_HIT;
        }

        Hit::forward(t, Vec3::NEG_Y)
    }
}
