//! Prism math - double precision vector algebra for the ray tracer.
//!
//! Geometry is traced in `f64`. The glam double precision types are
//! re-exported under their short names so the rest of the workspace reads
//! `Vec3`, `Mat3`, ... without caring about the precision.

pub use glam::{DMat3 as Mat3, DVec2 as Vec2, DVec3 as Vec3};

mod aabb;
mod interval;
mod ray;
mod rotation;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use rotation::Rotation;

/// RGB color, nominally in [0, 1] per channel.
pub type Color = Vec3;
