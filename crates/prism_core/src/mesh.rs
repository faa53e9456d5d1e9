//! Triangle mesh geometry loaded from OBJ files.
//!
//! A mesh keeps its vertex positions in model space. Placing it in the world
//! (translation plus uniform scale) produces plain triangle triples, which is
//! all the tracer needs.

use std::path::Path;

use prism_math::Vec3;
use thiserror::Error;

/// Errors that can occur during mesh loading.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Failed to load OBJ {path}: {source}")]
    Obj {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("No triangles found in {0}")]
    Empty(String),
}

pub type MeshResult<T> = Result<T, MeshError>;

/// A mesh consisting of vertex positions and triangle indices.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh from positions and indices.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Load every model of an OBJ file into a single mesh.
    ///
    /// Faces with more than three vertices are triangulated.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> MeshResult<Self> {
        let path = path.as_ref();
        let display = path.to_string_lossy().to_string();

        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
        )
        .map_err(|source| MeshError::Obj {
            path: display.clone(),
            source,
        })?;

        let mut positions = Vec::new();
        let mut indices = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            let base = positions.len() as u32;

            positions.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0] as f64, p[1] as f64, p[2] as f64)),
            );
            indices.extend(mesh.indices.iter().map(|i| base + i));
        }

        let mesh = Self::new(positions, indices);
        if mesh.triangle_count() == 0 {
            return Err(MeshError::Empty(display));
        }

        log::debug!(
            "Loaded mesh {}: {} models, {} vertices, {} triangles",
            display,
            models.len(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(mesh)
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Place the mesh in the world and return its triangles.
    ///
    /// Every vertex becomes `position + vertex * scale`. Faces referencing
    /// vertices out of range are skipped.
    pub fn world_triangles(&self, position: Vec3, scale: f64) -> Vec<[Vec3; 3]> {
        let vertex_count = self.positions.len();

        self.indices
            .chunks_exact(3)
            .filter_map(|face| {
                let [i0, i1, i2] = [face[0] as usize, face[1] as usize, face[2] as usize];
                if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
                    log::warn!("Skipping face with out of range index {:?}", face);
                    return None;
                }

                Some([
                    position + self.positions[i0] * scale,
                    position + self.positions[i1] * scale,
                    position + self.positions[i2] * scale,
                ])
            })
            .collect()
    }
}
