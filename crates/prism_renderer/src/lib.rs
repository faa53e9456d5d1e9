//! Prism Renderer - recursive Phong ray tracing on the CPU.
//!
//! Casts one or more primary rays per pixel, finds the nearest surface among
//! the scene's shapes and shades it with ambient, diffuse and specular terms,
//! optional shadow rays and mirror reflections bounded by a recursion budget.

mod hit;
mod material;
mod light;
mod sphere;
mod plane;
mod triangle;
mod quad;
mod cylinder;
mod cone;
mod mesh;
mod shape;
mod scene;
mod renderer;
mod bucket;
mod builder;

pub use hit::Hit;
pub use material::{Material, Surface};
pub use light::Light;
pub use sphere::Sphere;
pub use plane::Plane;
pub use triangle::Triangle;
pub use quad::Quad;
pub use cylinder::Cylinder;
pub use cone::Cone;
pub use mesh::Mesh;
pub use shape::{Object, Shape};
pub use scene::{Scene, DEFAULT_SHADOW_BIAS};
pub use renderer::{render, render_pixel, color_to_rgba, primary_ray, ImageBuffer, RenderConfig};
pub use bucket::{Bucket, BucketResult, generate_buckets, render_bucket, DEFAULT_BUCKET_SIZE};
pub use builder::{BuildError, SceneBuilder};

/// Re-export common math types from prism_math
pub use prism_math::{Aabb, Color, Interval, Ray, Rotation, Vec2, Vec3};
