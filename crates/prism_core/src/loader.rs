//! Scene file loading.
//!
//! Scene files are JSON documents. Loading parses the document and then
//! validates everything the tracer takes for granted: every material has a
//! color source, radii and heights are positive, plane normals are usable.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::scene::{SceneDescription, ShapeDescription};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid object #{index} ({kind}): {reason}")]
    InvalidObject {
        index: usize,
        kind: &'static str,
        reason: String,
    },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load and validate a scene file.
///
/// Relative asset paths inside the scene stay relative; resolve them against
/// the scene file's directory when building the scene.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let scene = load_scene_from_str(&text)?;

    log::info!(
        "Loaded scene {}: {} objects, {} lights",
        path.display(),
        scene.objects.len(),
        scene.lights.len()
    );

    Ok(scene)
}

/// Parse and validate a scene from JSON text.
pub fn load_scene_from_str(text: &str) -> LoadResult<SceneDescription> {
    let mut scene: SceneDescription = serde_json::from_str(text)?;

    if scene.super_sampling_factor == 0 {
        log::debug!("SuperSamplingFactor 0 treated as 1");
        scene.super_sampling_factor = 1;
    }

    validate(&scene)?;
    Ok(scene)
}

/// Check the contract the tracer relies on.
fn validate(scene: &SceneDescription) -> LoadResult<()> {
    for (index, object) in scene.objects.iter().enumerate() {
        let kind = object.shape.kind();
        let invalid = |reason: &str| LoadError::InvalidObject {
            index,
            kind,
            reason: reason.to_string(),
        };

        match object.material.surface() {
            None => return Err(invalid("material needs either a color or a texture")),
            Some(_) if object.material.color.is_some() && object.material.texture.is_some() => {
                log::warn!("Object #{index} ({kind}) has both color and texture, using color");
            }
            Some(_) => {}
        }

        match &object.shape {
            ShapeDescription::Sphere { radius, .. } if !(*radius > 0.0) => {
                return Err(invalid("radius must be positive"));
            }
            ShapeDescription::Cylinder { height, radius, .. }
            | ShapeDescription::Cone { height, radius, .. } => {
                if !(*radius > 0.0) {
                    return Err(invalid("radius must be positive"));
                }
                if !(*height > 0.0) {
                    return Err(invalid("height must be positive"));
                }
            }
            ShapeDescription::Plane { normal, .. } if normal.length_squared() == 0.0 => {
                return Err(invalid("normal must not be zero"));
            }
            ShapeDescription::Mesh { scale, .. } if !(*scale > 0.0) => {
                return Err(invalid("scale must be positive"));
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::Vec3;

    const SCENE: &str = r#"{
        "Eye": [200, 200, 1000],
        "Shadows": true,
        "MaxRecursionDepth": 2,
        "Lights": [
            { "position": [-200, 600, 1500], "color": [1, 1, 1] }
        ],
        "Objects": [
            {
                "type": "sphere",
                "position": [90, 320, 100],
                "radius": 50,
                "material": { "color": [0, 0, 1], "ka": 0.2, "kd": 0.7, "ks": 0.5, "n": 64 }
            },
            {
                "type": "plane",
                "position": [0, 0, 0],
                "normal": [0, 1, 0],
                "material": { "color": [0.5, 0.5, 0.5], "ka": 0.2, "kd": 0.8, "ks": 0, "n": 1 }
            }
        ]
    }"#;

    fn with_object(object: &str) -> String {
        format!(r#"{{ "Eye": [0, 0, 10], "Objects": [{object}] }}"#)
    }

    #[test]
    fn test_load_scene_from_str() {
        let scene = load_scene_from_str(SCENE).unwrap();

        assert_eq!(scene.eye, Vec3::new(200.0, 200.0, 1000.0));
        assert!(scene.shadows);
        assert_eq!(scene.max_recursion_depth, 2);
        assert_eq!(scene.eye_pitch, 0.0);
        assert_eq!(scene.super_sampling_factor, 1);
        assert!(scene.ambient_light.is_none());
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.objects.len(), 2);
    }

    #[test]
    fn test_defaults() {
        let scene = load_scene_from_str(r#"{ "Eye": [0, 0, 5] }"#).unwrap();

        assert!(!scene.shadows);
        assert_eq!(scene.max_recursion_depth, 0);
        assert!(scene.objects.is_empty());
        assert!(scene.lights.is_empty());
    }

    #[test]
    fn test_zero_super_sampling_becomes_one() {
        let scene = load_scene_from_str(r#"{ "Eye": [0, 0, 5], "SuperSamplingFactor": 0 }"#).unwrap();
        assert_eq!(scene.super_sampling_factor, 1);
    }

    #[test]
    fn test_missing_color_and_texture() {
        let text = with_object(
            r#"{ "type": "sphere", "position": [0, 0, 0], "radius": 1,
                 "material": { "ka": 0, "kd": 1, "ks": 0, "n": 1 } }"#,
        );

        let err = load_scene_from_str(&text).unwrap_err();
        assert!(matches!(err, LoadError::InvalidObject { index: 0, kind: "sphere", .. }));
    }

    #[test]
    fn test_non_positive_radius() {
        let text = with_object(
            r#"{ "type": "cone", "position": [0, 0, 0], "radius": 0, "height": 2,
                 "material": { "color": [1, 1, 1], "ka": 0, "kd": 1, "ks": 0, "n": 1 } }"#,
        );

        assert!(matches!(
            load_scene_from_str(&text),
            Err(LoadError::InvalidObject { kind: "cone", .. })
        ));
    }

    #[test]
    fn test_non_positive_height() {
        let text = with_object(
            r#"{ "type": "cylinder", "position": [0, 0, 0], "radius": 1, "height": -2,
                 "material": { "color": [1, 1, 1], "ka": 0, "kd": 1, "ks": 0, "n": 1 } }"#,
        );

        assert!(matches!(
            load_scene_from_str(&text),
            Err(LoadError::InvalidObject { kind: "cylinder", .. })
        ));
    }

    #[test]
    fn test_unknown_shape_type() {
        let text = with_object(
            r#"{ "type": "torus", "position": [0, 0, 0],
                 "material": { "color": [1, 1, 1], "ka": 0, "kd": 1, "ks": 0, "n": 1 } }"#,
        );

        assert!(matches!(load_scene_from_str(&text), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_load_scene_missing_file() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert!(matches!(
            load_scene("definitely/not/here.json"),
            Err(LoadError::Io(_))
        ));
    }
}
