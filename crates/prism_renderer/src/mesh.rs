//! Triangle mesh behind a single bounding box.

use prism_math::{Aabb, Ray, Vec3};

use crate::{Hit, Triangle};

/// A list of world-space triangles with one enclosing AABB.
///
/// The box is only a reject test; on a box hit every triangle is tested.
#[derive(Debug, Clone)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    bounds: Aabb,
}

impl Mesh {
    /// Build a mesh from world-space vertex triples.
    pub fn new(faces: Vec<[Vec3; 3]>) -> Self {
        let bounds = Aabb::enclosing(faces.iter().flatten().copied());
        let triangles = faces
            .into_iter()
            .map(|[a, b, c]| Triangle::new(a, b, c))
            .collect();

        Self { triangles, bounds }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn intersect(&self, ray: &Ray) -> Hit {
        if self.triangles.is_empty() || !self.bounds.hit(ray) {
            return Hit::NO_HIT;
        }

        self.triangles
            .iter()
            .fold(Hit::NO_HIT, |nearest, tri| nearest.nearest(tri.intersect(ray)))
    }
}
