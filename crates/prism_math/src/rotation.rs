//! Euler rotation used for the eye pitch and for orienting sphere textures.

use crate::{Mat3, Vec3};

/// Rotation given as three angles (radians) about the X, Y and Z axes.
///
/// The rotations are applied in sequence: first about X, then about Y and
/// finally about Z. All rotations are right-handed, so a positive angle about
/// X turns +Y towards +Z.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Rotation {
    /// No rotation at all.
    pub const IDENTITY: Rotation = Rotation {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a rotation from angles about X, Y and Z.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A rotation about the X axis only (tilting a view up or down).
    pub fn pitch(angle: f64) -> Self {
        Self::new(angle, 0.0, 0.0)
    }

    /// Build the combined rotation matrix.
    pub fn to_mat3(&self) -> Mat3 {
        Mat3::from_rotation_z(self.z) * Mat3::from_rotation_y(self.y) * Mat3::from_rotation_x(self.x)
    }

    /// Rotate a vector.
    pub fn apply(&self, v: Vec3) -> Vec3 {
        self.to_mat3() * v
    }
}

impl From<Vec3> for Rotation {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}
