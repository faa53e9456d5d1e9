//! Quadrilateral made of two triangles.
//!
//! The four corners need not be planar or convex. The split diagonal is
//! chosen at construction so that a concave corner is shared by both halves.

use prism_math::{Ray, Vec3};

use crate::{Hit, Triangle};

/// A four-sided polygon.
#[derive(Debug, Clone)]
pub struct Quad {
    first: Triangle,
    second: Triangle,
}

/// True if the corner `prev -> corner -> next` turns clockwise around
/// `reference`. Degenerate (straight) corners count as clockwise.
fn is_clockwise(prev: Vec3, corner: Vec3, next: Vec3, reference: Vec3) -> bool {
    let turn = (prev - corner).cross(next - corner);
    turn == Vec3::ZERO || turn.dot(reference) < 0.0
}

/// Index of the corner whose turn direction disagrees with the rest,
/// or `None` for a convex quad.
fn concave_corner(p: &[Vec3; 4]) -> Option<usize> {
    let reference = (p[1] - p[0]).cross(p[2] - p[0]);
    let clockwise: [bool; 4] =
        std::array::from_fn(|i| is_clockwise(p[(i + 3) % 4], p[i], p[(i + 1) % 4], reference));

    let majority = clockwise.iter().filter(|&&c| c).count() >= 3;
    clockwise.iter().position(|&c| c != majority)
}

impl Quad {
    /// Create a new quad from four corners in order around its outline.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        let p = [v0, v1, v2, v3];
        let split = concave_corner(&p).unwrap_or(0);

        Self {
            first: Triangle::new(p[split], p[(split + 1) % 4], p[(split + 2) % 4]),
            second: Triangle::new(p[split], p[(split + 2) % 4], p[(split + 3) % 4]),
        }
    }

    /// The two halves of the quad.
    pub fn triangles(&self) -> [&Triangle; 2] {
        [&self.first, &self.second]
    }

    pub fn intersect(&self, ray: &Ray) -> Hit {
        self.first.intersect(ray).nearest(self.second.intersect(ray))
    }
}
