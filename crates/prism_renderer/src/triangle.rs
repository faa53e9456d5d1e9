//! Triangle primitive for ray tracing.
//!
//! Intersects the supporting plane first, then runs a signed-area test
//! against each edge.

use prism_math::{Ray, Vec3};

use crate::Hit;

/// Relative slack for the edge test. Points this close to an edge count as
/// inside so that triangles sharing an edge leave no gap between them.
const EDGE_TOLERANCE: f64 = 1e-9;

/// A triangle primitive, visible from both sides.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices, counter-clockwise around `(v1 - v0) x (v2 - v0)`
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
}

/// True if `p` lies left of the directed line `a -> b` seen along `normal`.
fn is_left_of(a: Vec3, b: Vec3, normal: Vec3, p: Vec3) -> bool {
    normal.dot((b - a).cross(p - a)) >= 0.0
}

/// Like [`is_left_of`], but admits points within rounding distance of the line.
fn is_approx_left_of(a: Vec3, b: Vec3, normal: Vec3, p: Vec3) -> bool {
    let edge = b - a;
    let ap = p - a;
    normal.dot(edge.cross(ap)) >= -EDGE_TOLERANCE * edge.length() * ap.length()
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The winding is made consistent with the natural normal of the
    /// vertices, swapping `v0` and `v2` if needed.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let natural = (v1 - v0).cross(v2 - v0);
        if is_left_of(v0, v1, natural, v2) {
            Self { v0, v1, v2 }
        } else {
            Self { v0: v2, v1, v2: v0 }
        }
    }

    /// Vertices in their stored winding.
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn intersect(&self, ray: &Ray) -> Hit {
        let n = (self.v1 - self.v0).cross(self.v2 - self.v0);

        let n_dot_d = n.dot(ray.direction());
        if n_dot_d == 0.0 {
            // Ray runs parallel to the supporting plane
            return Hit::NO_HIT;
        }

        let t = n.dot(self.v0 - ray.origin()) / n_dot_d;
        if !(t > 0.0) {
            return Hit::NO_HIT;
        }

        let n = n.normalize();
        let p = ray.at(t);

        let inside = is_approx_left_of(self.v0, self.v1, n, p)
            && is_approx_left_of(self.v1, self.v2, n, p)
            && is_approx_left_of(self.v2, self.v0, n, p);
        if !inside {
            return Hit::NO_HIT;
        }

        let normal = if n_dot_d > 0.0 { -n } else { n };
        Hit::forward(t, normal)
    }
}
