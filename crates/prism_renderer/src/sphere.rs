//! Sphere primitive for ray tracing.

use std::f64::consts::PI;

use prism_math::{Mat3, Ray, Rotation, Vec2, Vec3};

use crate::Hit;

/// A sphere with an optional texture orientation.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    /// Rotation applied before computing texture coordinates
    orientation: Mat3,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f64) -> Self {
        Self {
            center,
            radius,
            orientation: Mat3::IDENTITY,
        }
    }

    /// Orient the texture mapping of the sphere.
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.orientation = rotation.to_mat3();
        self
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Intersect by solving `|O + tD - C|^2 = r^2` for the smallest positive t.
    pub fn intersect(&self, ray: &Ray) -> Hit {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        if a == 0.0 {
            return Hit::NO_HIT;
        }
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return Hit::NO_HIT;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root first, the far one when the origin is inside
        let mut root = (h - sqrtd) / a;
        if root <= 0.0 {
            root = (h + sqrtd) / a;
            if root <= 0.0 {
                return Hit::NO_HIT;
            }
        }

        let normal = (ray.at(root) - self.center) / self.radius;
        Hit::forward(root, normal)
    }

    /// Spherical texture coordinates of a point on the surface.
    ///
    /// `v = 0` at the +Y pole of the (rotated) sphere, `u` wraps around Y
    /// starting from -Z.
    pub fn uv_map(&self, p: Vec3) -> Vec2 {
        let local = self.orientation * ((p - self.center) / self.radius);

        let u = 0.5 + local.x.atan2(local.z) / (2.0 * PI);
        let v = local.y.clamp(-1.0, 1.0).acos() / PI;
        Vec2::new(u, v)
    }
}
