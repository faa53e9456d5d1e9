//! Hit record returned by every ray-shape intersection.

use prism_math::Vec3;

/// Result of intersecting a ray with a shape.
///
/// Intersection queries are total: a shape that is not hit returns
/// [`Hit::NO_HIT`] (`t = +inf`). Anything with `t <= 0`, `NaN` or an
/// infinite `t` is not a surface hit, see [`Hit::is_hit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Ray parameter of the intersection
    pub t: f64,
    /// Unit surface normal at the intersection
    pub normal: Vec3,
}

impl Hit {
    /// The "nothing was hit" sentinel.
    pub const NO_HIT: Hit = Hit {
        t: f64::INFINITY,
        normal: Vec3::ZERO,
    };

    /// Create a hit record.
    #[inline]
    pub fn new(t: f64, normal: Vec3) -> Self {
        Self { t, normal }
    }

    /// Create a hit record if `t` lies strictly in front of the ray origin,
    /// otherwise return [`Hit::NO_HIT`].
    #[inline]
    pub fn forward(t: f64, normal: Vec3) -> Self {
        let hit = Self::new(t, normal);
        if hit.is_hit() {
            hit
        } else {
            Self::NO_HIT
        }
    }

    /// True for a real surface hit: finite and strictly positive `t`.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.t > 0.0 && self.t.is_finite()
    }

    /// Pick the nearer of two hits, ignoring non-hits.
    #[inline]
    pub fn nearest(self, other: Hit) -> Hit {
        match (self.is_hit(), other.is_hit()) {
            (true, true) if other.t < self.t => other,
            (true, _) => self,
            (false, true) => other,
            (false, false) => Self::NO_HIT,
        }
    }
}
