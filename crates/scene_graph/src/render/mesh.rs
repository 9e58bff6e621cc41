//! Mesh descriptors and registered vertex meshes
//!
//! A [`Mesh`] is the immutable host-facing descriptor: a name, a vertex
//! count, and a flat coordinate list where each consecutive (x, y, z) triple
//! is one vertex. A [`VertexMesh`] is a mesh the backend has accepted - the
//! descriptor plus the handle the backend returned for it.

use crate::render::{BackendResult, MeshHandle, RenderBackend};
use thiserror::Error;

/// Errors raised while building a mesh descriptor
#[derive(Error, Debug)]
pub enum MeshError {
    /// The flat coordinate list does not hold 3 floats per vertex
    #[error("Mesh '{name}' expects {expected} coordinates for {vertex_count} vertices, got {actual}")]
    InvalidVertexData {
        /// Mesh name
        name: String,
        /// Declared vertex count
        vertex_count: usize,
        /// Required coordinate count (3 x vertex count)
        expected: usize,
        /// Coordinate count actually supplied
        actual: usize,
    },
}

/// Immutable mesh descriptor
///
/// Built once, never mutated. The name is a stable registry identity, not a
/// statement about the vertex content.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    name: String,
    vertex_count: usize,
    vertices: Vec<f32>,
}

impl Mesh {
    /// Build a mesh descriptor, validating the coordinate count
    pub fn new(
        name: impl Into<String>,
        vertex_count: usize,
        vertices: Vec<f32>,
    ) -> Result<Self, MeshError> {
        let name = name.into();
        let expected = vertex_count * 3;
        if vertices.len() != expected {
            return Err(MeshError::InvalidVertexData {
                name,
                vertex_count,
                expected,
                actual: vertices.len(),
            });
        }
        Ok(Self {
            name,
            vertex_count,
            vertices,
        })
    }

    /// The unit cube outline used by the demo scene
    ///
    /// 28 vertices tracing the twelve edges of a cube centred on the origin
    /// with side length 1, suitable for line-strip style drawing.
    pub fn cube() -> Self {
        let vertices = vec![
            0.5, -0.5, -0.5,
            0.5, -0.5, 0.5,
            0.5, -0.5, -0.5,
            0.5, 0.5, -0.5,
            -0.5, 0.5, -0.5,
            0.5, 0.5, -0.5,
            0.5, -0.5, 0.5,
            -0.5, -0.5, 0.5,
            0.5, -0.5, 0.5,
            0.5, 0.5, 0.5,
            -0.5, -0.5, 0.5,
            -0.5, -0.5, -0.5,
            -0.5, 0.5, 0.5,
            -0.5, 0.5, -0.5,
            -0.5, -0.5, -0.5,
            -0.5, 0.5, -0.5,
            0.5, 0.5, -0.5,
            0.5, 0.5, -0.5,
            0.5, -0.5, -0.5,
            -0.5, -0.5, -0.5,
            -0.5, 0.5, 0.5,
            0.5, 0.5, 0.5,
            -0.5, -0.5, 0.5,
            -0.5, 0.5, 0.5,
            0.5, 0.5, 0.5,
            0.5, 0.5, 0.5,
            0.5, 0.5, -0.5,
            0.5, 0.5, 0.5,
        ];
        Self {
            name: "cube".to_string(),
            vertex_count: 28,
            vertices,
        }
    }

    /// Mesh name (registry identity)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Flat coordinate list, 3 floats per vertex
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Vertex positions viewed as (x, y, z) triples
    pub fn positions(&self) -> &[[f32; 3]] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// A mesh registered with a backend
///
/// Couples the descriptor with the backend handle so a mesh node can submit
/// draws without further lookups. Created once, before the render loop.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexMesh {
    mesh: Mesh,
    handle: MeshHandle,
}

impl VertexMesh {
    /// Upload `mesh` through `backend` and keep the returned handle
    pub fn create(mesh: Mesh, backend: &mut dyn RenderBackend) -> BackendResult<Self> {
        let handle = backend.create_mesh(&mesh)?;
        Ok(Self { mesh, handle })
    }

    /// The underlying descriptor
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Mesh name (registry identity)
    pub fn name(&self) -> &str {
        self.mesh.name()
    }

    /// Number of vertices to draw
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Backend handle for draw submission
    pub fn handle(&self) -> MeshHandle {
        self.handle
    }
}
