use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box used as a cheap reject test in front of
/// more expensive geometry.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));

        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create the tightest AABB around a set of points.
    ///
    /// Returns [`Aabb::EMPTY`] when there are no points.
    pub fn enclosing<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut min = Vec3::splat(f64::INFINITY);
        let mut max = Vec3::splat(f64::NEG_INFINITY);
        let mut any = false;

        for p in points {
            min = min.min(p);
            max = max.max(p);
            any = true;
        }

        if !any {
            return Self::EMPTY;
        }
        Self::from_points(min, max)
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Lower corner of the box.
    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Upper corner of the box.
    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Test if a ray intersects this AABB anywhere in front of its origin.
    ///
    /// Slab method: clip the ray parameter against each axis using the
    /// inverse direction and intersect the three ranges. A hit exists iff the
    /// remaining range is non-empty and ends in front of the origin, which
    /// includes rays starting inside the box.
    pub fn hit(&self, r: &Ray) -> bool {
        let origin = r.origin();
        let inv_dir = r.direction().recip();

        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            if inv_dir[axis].is_infinite() {
                // Parallel to the slab: inside it for every t or never
                if !slab.contains(origin[axis]) {
                    return false;
                }
                continue;
            }
            let t0 = (slab.min - origin[axis]) * inv_dir[axis];
            let t1 = (slab.max - origin[axis]) * inv_dir[axis];

            t_min = t_min.max(t0.min(t1));
            t_max = t_max.min(t0.max(t1));
        }

        t_max > 0.0 && t_min < t_max
    }

    /// Pad intervals to avoid zero-width AABBs (degenerate cases).
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }

    /// An AABB containing nothing.
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}
