//! Scene description types for Prism.
//!
//! These mirror the JSON scene file one to one. They carry no behaviour
//! beyond small accessors; the renderer turns them into traceable shapes.

use prism_math::{Color, Vec3};
use serde::Deserialize;

fn default_super_sampling_factor() -> u32 {
    1
}

/// A complete scene as read from a scene file.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SceneDescription {
    /// Eye (camera) position in world units
    pub eye: Vec3,

    /// Rotation about the X axis applied to every primary ray (radians)
    #[serde(default)]
    pub eye_pitch: f64,

    /// Fixed ambient light. When absent the average light color is used.
    #[serde(default)]
    pub ambient_light: Option<Color>,

    /// Whether shadow rays are cast
    #[serde(default)]
    pub shadows: bool,

    /// Maximum number of reflection bounces
    #[serde(default)]
    pub max_recursion_depth: u32,

    /// Samples per pixel along each axis (1 = no super-sampling)
    #[serde(default = "default_super_sampling_factor")]
    pub super_sampling_factor: u32,

    #[serde(default)]
    pub lights: Vec<LightDescription>,

    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

/// A point light.
#[derive(Clone, Debug, Deserialize)]
pub struct LightDescription {
    pub position: Vec3,
    pub color: Color,
}

/// A shape together with the material it is drawn with.
#[derive(Clone, Debug, Deserialize)]
pub struct ObjectDescription {
    #[serde(flatten)]
    pub shape: ShapeDescription,
    pub material: MaterialDescription,
}

/// Shape parameters, tagged by the `type` field of the scene file.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeDescription {
    Sphere {
        position: Vec3,
        radius: f64,
        /// Texture orientation as rotations about X, Y and Z (radians)
        #[serde(default)]
        rotation: Option<Vec3>,
    },
    Plane {
        position: Vec3,
        normal: Vec3,
    },
    Triangle {
        position1: Vec3,
        position2: Vec3,
        position3: Vec3,
    },
    Quad {
        position1: Vec3,
        position2: Vec3,
        position3: Vec3,
        position4: Vec3,
    },
    Cylinder {
        position: Vec3,
        height: f64,
        radius: f64,
    },
    Cone {
        position: Vec3,
        height: f64,
        radius: f64,
    },
    Mesh {
        position: Vec3,
        scale: f64,
        /// OBJ file, relative to the scene file
        model: String,
    },
}

impl ShapeDescription {
    /// Short name of the shape kind, as written in scene files.
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeDescription::Sphere { .. } => "sphere",
            ShapeDescription::Plane { .. } => "plane",
            ShapeDescription::Triangle { .. } => "triangle",
            ShapeDescription::Quad { .. } => "quad",
            ShapeDescription::Cylinder { .. } => "cylinder",
            ShapeDescription::Cone { .. } => "cone",
            ShapeDescription::Mesh { .. } => "mesh",
        }
    }
}

/// Phong material parameters.
#[derive(Clone, Debug, Deserialize)]
pub struct MaterialDescription {
    /// Flat base color
    #[serde(default)]
    pub color: Option<Color>,

    /// Texture image path, relative to the scene file
    #[serde(default)]
    pub texture: Option<String>,

    /// Ambient coefficient
    pub ka: f64,

    /// Diffuse coefficient
    pub kd: f64,

    /// Specular coefficient
    pub ks: f64,

    /// Specular exponent
    pub n: f64,

    /// Output the raw material color without lighting
    #[serde(default)]
    pub is_flat: bool,
}

/// Where a material takes its intrinsic color from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceDescription<'a> {
    Color(Color),
    Texture(&'a str),
}

impl MaterialDescription {
    /// Resolve the surface source. A flat color wins over a texture.
    pub fn surface(&self) -> Option<SurfaceDescription<'_>> {
        match (self.color, self.texture.as_deref()) {
            (Some(color), _) => Some(SurfaceDescription::Color(color)),
            (None, Some(path)) => Some(SurfaceDescription::Texture(path)),
            (None, None) => None,
        }
    }
}
