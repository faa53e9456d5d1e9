//! Phong material.

use std::sync::Arc;

use prism_core::Texture;
use prism_math::{Color, Vec3};

use crate::Shape;

/// Where a material's intrinsic color comes from.
///
/// Exactly one source exists per material.
#[derive(Clone, Debug)]
pub enum Surface {
    /// A single flat color
    Color(Color),
    /// A texture sampled through the shape's surface parameterization
    Texture(Arc<Texture>),
}

/// Surface description used by the Phong shading model.
#[derive(Clone, Debug)]
pub struct Material {
    pub surface: Surface,
    /// Ambient coefficient
    pub ka: f64,
    /// Diffuse coefficient
    pub kd: f64,
    /// Specular coefficient, also the reflection strength
    pub ks: f64,
    /// Specular exponent
    pub n: f64,
    /// No lighting at all: the intrinsic color is output as is
    pub is_flat: bool,
}

impl Material {
    /// Create a new lit material.
    pub fn new(surface: Surface, ka: f64, kd: f64, ks: f64, n: f64) -> Self {
        Self {
            surface,
            ka,
            kd,
            ks,
            n,
            is_flat: false,
        }
    }

    /// Create a new lit material with a flat color.
    pub fn with_color(color: Color, ka: f64, kd: f64, ks: f64, n: f64) -> Self {
        Self::new(Surface::Color(color), ka, kd, ks, n)
    }

    /// Turn off lighting for this material.
    pub fn unlit(mut self) -> Self {
        self.is_flat = true;
        self
    }

    /// The material's own color at `point` on `shape`.
    pub fn intrinsic_color(&self, shape: &Shape, point: Vec3) -> Color {
        match &self.surface {
            Surface::Color(color) => *color,
            Surface::Texture(texture) => {
                let uv = shape.uv_map(point);
                texture.color_at(uv.x, uv.y)
            }
        }
    }
}
