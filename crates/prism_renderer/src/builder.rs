//! Turns a loaded scene description into a traceable [`Scene`].
//!
//! Textures and OBJ models are read here, relative to the scene file's
//! directory, and shared between every object that references them.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use prism_core::{
    resolve_path, MaterialDescription, Mesh as MeshAsset, MeshError, SceneDescription,
    ShapeDescription, SurfaceDescription, TextureCache, TextureError,
};
use prism_math::Rotation;
use thiserror::Error;

use crate::{
    Cone, Cylinder, Light, Material, Mesh, Plane, Quad, Scene, Shape, Sphere, Surface, Triangle,
};

/// Errors raised while building a scene from its description.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error("Object {index} has neither a color nor a texture")]
    MissingSurface { index: usize },
}

/// Builds scenes, caching the assets they load.
pub struct SceneBuilder {
    base_dir: Option<PathBuf>,
    textures: TextureCache,
    /// Loaded models by path as written in the scene file
    models: HashMap<String, Arc<MeshAsset>>,
}

impl SceneBuilder {
    /// Builder resolving asset paths against the working directory.
    pub fn new() -> Self {
        Self {
            base_dir: None,
            textures: TextureCache::new(),
            models: HashMap::new(),
        }
    }

    /// Builder resolving relative asset paths against `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            textures: TextureCache::with_base_dir(base_dir.clone()),
            base_dir: Some(base_dir),
            models: HashMap::new(),
        }
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureCache {
        &mut self.textures
    }

    /// Build a scene from its description.
    pub fn build(&mut self, description: &SceneDescription) -> Result<Scene, BuildError> {
        let mut scene = Scene::new(description.eye)
            .with_eye_pitch(description.eye_pitch)
            .with_shadows(description.shadows)
            .with_max_recursion_depth(description.max_recursion_depth)
            .with_super_sampling_factor(description.super_sampling_factor);
        if let Some(ambient) = description.ambient_light {
            scene = scene.with_ambient_light(ambient);
        }

        for light in &description.lights {
            scene.add_light(Light::new(light.position, light.color));
        }

        for (index, object) in description.objects.iter().enumerate() {
            let material = self.material(index, &object.material)?;
            let shape = self.shape(&object.shape)?;
            log::debug!("Object {}: {}", index, shape.kind());
            scene.add_object(shape, Arc::new(material));
        }

        log::info!(
            "Built scene: {} objects, {} lights, {} textures",
            scene.objects().len(),
            scene.lights().len(),
            self.textures.len()
        );

        Ok(scene)
    }

    fn material(
        &mut self,
        index: usize,
        description: &MaterialDescription,
    ) -> Result<Material, BuildError> {
        let surface = match description.surface() {
            Some(SurfaceDescription::Color(color)) => Surface::Color(color),
            Some(SurfaceDescription::Texture(path)) => Surface::Texture(self.textures.load(path)?),
            None => return Err(BuildError::MissingSurface { index }),
        };

        let mut material = Material::new(
            surface,
            description.ka,
            description.kd,
            description.ks,
            description.n,
        );
        material.is_flat = description.is_flat;
        Ok(material)
    }

    fn shape(&mut self, description: &ShapeDescription) -> Result<Shape, BuildError> {
        let shape = match description {
            ShapeDescription::Sphere {
                position,
                radius,
                rotation,
            } => {
                let sphere = Sphere::new(*position, *radius);
                match rotation {
                    Some(angles) => sphere.with_rotation(Rotation::from(*angles)).into(),
                    None => sphere.into(),
                }
            }
            ShapeDescription::Plane { position, normal } => Plane::new(*position, *normal).into(),
            ShapeDescription::Triangle {
                position1,
                position2,
                position3,
            } => Triangle::new(*position1, *position2, *position3).into(),
            ShapeDescription::Quad {
                position1,
                position2,
                position3,
                position4,
            } => Quad::new(*position1, *position2, *position3, *position4).into(),
            ShapeDescription::Cylinder {
                position,
                height,
                radius,
            } => Cylinder::new(*position, *height, *radius).into(),
            ShapeDescription::Cone {
                position,
                height,
                radius,
            } => Cone::new(*position, *height, *radius).into(),
            ShapeDescription::Mesh {
                position,
                scale,
                model,
            } => {
                let asset = self.model(model)?;
                let mesh = Mesh::new(asset.world_triangles(*position, *scale));
                if mesh.is_empty() {
                    log::warn!("Mesh {} has no triangles", model);
                }
                mesh.into()
            }
        };

        Ok(shape)
    }

    /// Load an OBJ model, or reuse it if already loaded.
    fn model(&mut self, path: &str) -> Result<Arc<MeshAsset>, BuildError> {
        if let Some(model) = self.models.get(path) {
            return Ok(model.clone());
        }

        let full_path = resolve_path(self.base_dir.as_deref(), path);
        let model = Arc::new(MeshAsset::load_obj(&full_path)?);
        log::debug!(
            "Loaded model: {} ({} vertices, {} triangles)",
            path,
            model.vertex_count(),
            model.triangle_count()
        );

        self.models.insert(path.to_string(), model.clone());
        Ok(model)
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{load_scene_from_str, Texture};
    use prism_math::{Color, Ray, Vec3};
    use std::fs;

    const ALL_SHAPES: &str = r#"{
        "Eye": [200, 200, 1000],
        "EyePitch": 0.1,
        "Shadows": true,
        "MaxRecursionDepth": 2,
        "SuperSamplingFactor": 0,
        "AmbientLight": [0.1, 0.1, 0.1],
        "Lights": [ { "position": [-200, 600, 1500], "color": [1, 1, 1] } ],
        "Objects": [
            { "type": "sphere", "position": [90, 320, 100], "radius": 50, "rotation": [0, 1.5, 0],
              "material": { "color": [0, 0, 1], "ka": 0.2, "kd": 0.7, "ks": 0.5, "n": 64 } },
            { "type": "plane", "position": [0, 0, 0], "normal": [0, 1, 0],
              "material": { "color": [1, 1, 1], "ka": 0.2, "kd": 0.8, "ks": 0, "n": 1, "is_flat": true } },
            { "type": "triangle", "position1": [0, 0, 0], "position2": [1, 0, 0], "position3": [0, 1, 0],
              "material": { "color": [1, 0, 0], "ka": 0.2, "kd": 0.8, "ks": 0, "n": 1 } },
            { "type": "quad", "position1": [0, 0, 0], "position2": [1, 0, 0], "position3": [1, 1, 0], "position4": [0, 1, 0],
              "material": { "color": [1, 0, 0], "ka": 0.2, "kd": 0.8, "ks": 0, "n": 1 } },
            { "type": "cylinder", "position": [0, 0, 0], "height": 2, "radius": 1,
              "material": { "color": [0, 1, 0], "ka": 0.2, "kd": 0.8, "ks": 0, "n": 1 } },
            { "type": "cone", "position": [0, 0, 0], "height": 2, "radius": 1,
              "material": { "color": [0, 1, 0], "ka": 0.2, "kd": 0.8, "ks": 0, "n": 1 } }
        ]
    }"#;

    #[test]
    fn test_build_all_shapes() {
        let description = load_scene_from_str(ALL_SHAPES).unwrap();
        let scene = SceneBuilder::new().build(&description).unwrap();

        let kinds: Vec<&str> = scene.objects().iter().map(|o| o.shape.kind()).collect();
        assert_eq!(kinds, ["sphere", "plane", "triangle", "quad", "cylinder", "cone"]);

        assert_eq!(scene.eye(), Vec3::new(200.0, 200.0, 1000.0));
        assert_eq!(scene.eye_pitch(), 0.1);
        assert!(scene.shadows());
        assert_eq!(scene.max_recursion_depth(), 2);
        assert_eq!(scene.super_sampling_factor(), 1);
        assert_eq!(scene.ambient_light(), Some(Color::splat(0.1)));
        assert_eq!(scene.lights().len(), 1);

        assert!(!scene.objects()[0].material.is_flat);
        assert!(scene.objects()[1].material.is_flat);
    }

    #[test]
    fn test_missing_surface() {
        let description = SceneDescription {
            eye: Vec3::ZERO,
            eye_pitch: 0.0,
            ambient_light: None,
            shadows: false,
            max_recursion_depth: 0,
            super_sampling_factor: 1,
            lights: Vec::new(),
            objects: vec![prism_core::ObjectDescription {
                shape: ShapeDescription::Plane {
                    position: Vec3::ZERO,
                    normal: Vec3::Y,
                },
                material: MaterialDescription {
                    color: None,
                    texture: None,
                    ka: 0.0,
                    kd: 1.0,
                    ks: 0.0,
                    n: 1.0,
                    is_flat: false,
                },
            }],
        };

        assert!(matches!(
            SceneBuilder::new().build(&description),
            Err(BuildError::MissingSurface { index: 0 })
        ));
    }

    #[test]
    fn test_textures_are_shared() {
        let text = r#"{
            "Eye": [0, 0, 10],
            "Objects": [
                { "type": "sphere", "position": [0, 0, 0], "radius": 1,
                  "material": { "texture": "earth.png", "ka": 0, "kd": 1, "ks": 0, "n": 1 } },
                { "type": "sphere", "position": [3, 0, 0], "radius": 1,
                  "material": { "texture": "earth.png", "ka": 0, "kd": 1, "ks": 0, "n": 1 } }
            ]
        }"#;
        let description = load_scene_from_str(text).unwrap();

        let mut builder = SceneBuilder::new();
        builder
            .textures_mut()
            .insert("earth.png", Arc::new(Texture::solid_color(Color::new(0.1, 0.5, 0.9))));
        let scene = builder.build(&description).unwrap();

        let textures: Vec<_> = scene
            .objects()
            .iter()
            .map(|o| match &o.material.surface {
                Surface::Texture(t) => t.clone(),
                Surface::Color(_) => panic!("expected a texture"),
            })
            .collect();
        assert!(Arc::ptr_eq(&textures[0], &textures[1]));
        assert_eq!(builder.textures().len(), 1);
    }

    #[test]
    fn test_missing_texture_file() {
        let text = r#"{
            "Eye": [0, 0, 10],
            "Objects": [
                { "type": "sphere", "position": [0, 0, 0], "radius": 1,
                  "material": { "texture": "no_such_texture.png", "ka": 0, "kd": 1, "ks": 0, "n": 1 } }
            ]
        }"#;
        let description = load_scene_from_str(text).unwrap();

        let mut builder = SceneBuilder::with_base_dir("/nonexistent");
        assert!(matches!(builder.build(&description), Err(BuildError::Texture(_))));
    }

    #[test]
    fn test_mesh_from_obj() {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = std::env::temp_dir().join("prism_renderer_builder_test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("square.obj"),
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        )
        .unwrap();

        let text = r#"{
            "Eye": [0, 0, 10],
            "Objects": [
                { "type": "mesh", "position": [10, 0, 0], "scale": 2, "model": "square.obj",
                  "material": { "color": [1, 1, 1], "ka": 0, "kd": 1, "ks": 0, "n": 1 } },
                { "type": "mesh", "position": [-10, 0, 0], "scale": 1, "model": "square.obj",
                  "material": { "color": [1, 1, 1], "ka": 0, "kd": 1, "ks": 0, "n": 1 } }
            ]
        }"#;
        let description = load_scene_from_str(text).unwrap();

        let mut builder = SceneBuilder::with_base_dir(&dir);
        let scene = builder.build(&description).unwrap();
        assert_eq!(builder.models.len(), 1);

        let mesh = match &scene.objects()[0].shape {
            Shape::Mesh(mesh) => mesh,
            other => panic!("unexpected shape {}", other.kind()),
        };
        assert_eq!(mesh.triangles().len(), 2);
        assert!((mesh.bounds().max().x - 12.0).abs() < 1e-3);

        let ray = Ray::new(Vec3::new(11.0, 1.0, 5.0), Vec3::NEG_Z);
        let (hit, _) = scene.find_nearest_hit(&ray).unwrap();
        assert!((hit.t - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_model_file() {
        let text = r#"{
            "Eye": [0, 0, 10],
            "Objects": [
                { "type": "mesh", "position": [0, 0, 0], "scale": 1, "model": "missing.obj",
                  "material": { "color": [1, 1, 1], "ka": 0, "kd": 1, "ks": 0, "n": 1 } }
            ]
        }"#;
        let description = load_scene_from_str(text).unwrap();

        let mut builder = SceneBuilder::with_base_dir("/nonexistent");
        assert!(matches!(builder.build(&description), Err(BuildError::Mesh(_))));
    }

    #[test]
    fn test_demo_scene() {
        let _ = env_logger::builder().is_test(true).try_init();

        let scenes = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenes");
        let description = prism_core::load_scene(scenes.join("shapes.json")).unwrap();
        let scene = SceneBuilder::with_base_dir(&scenes).build(&description).unwrap();
        assert_eq!(scene.objects().len(), 8);

        let config = crate::RenderConfig {
            width: 48,
            height: 48,
            bucket_size: 16,
        };
        let image = crate::render(&scene, &config);
        assert!(image.pixels.iter().any(|c| c.length() > 0.0));
    }
}
