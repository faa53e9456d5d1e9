//! Prism Core - scene description and asset loading for the Prism ray tracer.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `ObjectDescription`,
//!   `ShapeDescription`, `MaterialDescription`, `LightDescription`
//! - **Scene loading**: JSON parsing and validation
//! - **Assets**: OBJ meshes and image textures
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_scene;
//!
//! let scene = load_scene("scenes/spheres.json")?;
//! println!("Loaded {} objects, {} lights",
//!     scene.objects.len(),
//!     scene.lights.len());
//! ```

pub mod loader;
pub mod mesh;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use mesh::{Mesh, MeshError, MeshResult};
pub use scene::{
    LightDescription, MaterialDescription, ObjectDescription, SceneDescription,
    ShapeDescription, SurfaceDescription,
};
pub use texture::{resolve_path, Texture, TextureCache, TextureError, TextureResult};
