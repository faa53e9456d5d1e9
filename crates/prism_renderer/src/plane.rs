//! Infinite plane, visible from both sides.

use prism_math::{Ray, Vec3};

use crate::Hit;

/// An infinite plane through `point` with the given normal.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Vec3,
    /// Unit normal
    normal: Vec3,
}

impl Plane {
    /// Create a new plane. The normal is normalized here.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Solve `N . (O + tD - P0) = 0`.
    ///
    /// The returned normal always faces the side the ray comes from.
    pub fn intersect(&self, ray: &Ray) -> Hit {
        let n_dot_d = self.normal.dot(ray.direction());
        if n_dot_d == 0.0 {
            // Parallel to the plane
            return Hit::NO_HIT;
        }

        let t = self.normal.dot(self.point - ray.origin()) / n_dot_d;
        let normal = if n_dot_d > 0.0 { -self.normal } else { self.normal };

        Hit::forward(t, normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_plane_hit_from_above() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y);
        let ray = Ray::new(Vec3::new(1.0, 4.0, 2.0), Vec3::NEG_Y);

        let hit = plane.intersect(&ray);
        assert!((hit.t - 4.0).abs() < EPS);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_plane_hit_from_below_flips_normal() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y);
        let ray = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::new(0.0, 1.0, 1.0));

        let hit = plane.intersect(&ray);
        assert!((hit.t - 3.0).abs() < EPS);
        assert_eq!(hit.normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_plane_parallel_ray() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert_eq!(plane.intersect(&ray), Hit::NO_HIT);

        // Even when the ray lies inside the plane
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(plane.intersect(&ray), Hit::NO_HIT);
    }

    #[test]
    fn test_plane_behind() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y);
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        assert!(!plane.intersect(&ray).is_hit());
    }

    #[test]
    fn test_plane_origin_on_surface() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y);
        let ray = Ray::new(Vec3::new(5.0, 0.0, 5.0), Vec3::new(0.0, -1.0, 0.5));
        assert!(!plane.intersect(&ray).is_hit());
    }

    #[test]
    fn test_plane_normal_is_normalized() {
        let plane = Plane::new(Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.0, 0.0, 7.0));
        assert!((plane.normal().length() - 1.0).abs() < EPS);

        let hit = plane.intersect(&Ray::new(Vec3::ZERO, Vec3::NEG_Z));
        assert!((hit.t - 10.0).abs() < EPS);
    }

    #[test]
    fn test_plane_reintersect_at_hit_point() {
        let plane = Plane::new(Vec3::new(1.0, -2.0, 3.0), Vec3::new(0.3, 1.0, -0.2));
        let origin = Vec3::new(-4.0, 6.0, 2.0);
        let ray = Ray::new(origin, Vec3::new(0.4, -1.0, 0.3).normalize());
        let hit = plane.intersect(&ray);
        assert!(hit.is_hit());
        let point = ray.at(hit.t);

        let again = Ray::new(origin, (point - origin).normalize());
        let hit2 = plane.intersect(&again);
        assert!((again.at(hit2.t) - point).length() < 1e-6);
    }
}
