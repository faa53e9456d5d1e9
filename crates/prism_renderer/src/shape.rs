//! The closed set of renderable shapes.

use std::sync::Arc;

use prism_math::{Ray, Vec2, Vec3};

use crate::{Cone, Cylinder, Hit, Material, Mesh, Plane, Quad, Sphere, Triangle};

/// Any shape the tracer can intersect.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
    Quad(Quad),
    Cylinder(Cylinder),
    Cone(Cone),
    Mesh(Mesh),
}

impl Shape {
    /// Intersect a ray with this shape. Always returns a value,
    /// [`Hit::NO_HIT`] when nothing lies in front of the ray.
    #[inline]
    pub fn intersect(&self, ray: &Ray) -> Hit {
        match self {
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Plane(s) => s.intersect(ray),
            Shape::Triangle(s) => s.intersect(ray),
            Shape::Quad(s) => s.intersect(ray),
            Shape::Cylinder(s) => s.intersect(ray),
            Shape::Cone(s) => s.intersect(ray),
            Shape::Mesh(s) => s.intersect(ray),
        }
    }

    /// Texture coordinates of a surface point.
    ///
    /// Shapes without a parameterisation map everything to the centre of
    /// the texture.
    pub fn uv_map(&self, point: Vec3) -> Vec2 {
        match self {
            Shape::Sphere(s) => s.uv_map(point),
            _ => Vec2::splat(0.5),
        }
    }

    /// Short lowercase name, as used in scene files.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::Plane(_) => "plane",
            Shape::Triangle(_) => "triangle",
            Shape::Quad(_) => "quad",
            Shape::Cylinder(_) => "cylinder",
            Shape::Cone(_) => "cone",
            Shape::Mesh(_) => "mesh",
        }
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_from_shape!(Sphere, Plane, Triangle, Quad, Cylinder, Cone, Mesh);

/// A shape paired with the material it is drawn with.
///
/// Materials are shared: several objects may point at the same one.
#[derive(Debug, Clone)]
pub struct Object {
    pub shape: Shape,
    pub material: Arc<Material>,
}

impl Object {
    pub fn new(shape: impl Into<Shape>, material: Arc<Material>) -> Self {
        Self {
            shape: shape.into(),
            material,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::Color;

    #[test]
    fn test_dispatch() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);

        let sphere = Shape::from(Sphere::new(Vec3::ZERO, 1.0));
        assert!((sphere.intersect(&ray).t - 4.0).abs() < 1e-9);
        assert_eq!(sphere.kind(), "sphere");

        let plane = Shape::from(Plane::new(Vec3::new(0.0, 0.0, -1.0), Vec3::Z));
        assert!((plane.intersect(&ray).t - 6.0).abs() < 1e-9);
        assert_eq!(plane.kind(), "plane");
    }

    #[test]
    fn test_default_uv() {
        let cone = Shape::from(Cone::new(Vec3::ZERO, 1.0, 1.0));
        assert_eq!(cone.uv_map(Vec3::new(0.3, 0.2, 0.1)), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_objects_share_material() {
        let material = Arc::new(Material::with_color(Color::ONE, 0.1, 0.9, 0.0, 1.0));
        let a = Object::new(Sphere::new(Vec3::ZERO, 1.0), material.clone());
        let b = Object::new(Plane::new(Vec3::ZERO, Vec3::Y), material.clone());

        assert!(Arc::ptr_eq(&a.material, &b.material));
        assert_eq!(Arc::strong_count(&material), 3);
    }
}
