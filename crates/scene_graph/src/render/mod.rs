//! Rendering interface for the scene graph
//!
//! The scene graph never talks to a GPU directly. Everything it needs from
//! the host - program compilation, vertex buffer upload, uniform updates and
//! draw submission - goes through the [`RenderBackend`] trait, so the same
//! graph can be driven by an OpenGL host, a Vulkan host, or the in-process
//! [`RecordingBackend`] used by tests and tools.
//!
//! Resources are constructed once, before the render loop starts:
//! [`Program::create`] and [`VertexMesh::create`] hand the descriptor to the
//! backend and keep the returned handle. A failure to build one resource is
//! reported to the caller and leaves unrelated resources untouched.

mod backend;
mod mesh;
mod recording;
mod shader;

pub use backend::{BackendResult, MeshHandle, ProgramHandle, RenderBackend};
pub use mesh::{Mesh, MeshError, VertexMesh};
pub use recording::{RecordedCall, RecordingBackend};
pub use shader::{Program, Shader, UNIFORM_COLOUR, UNIFORM_MVP};

use thiserror::Error;

/// Errors raised by render backends
///
/// Construction failures are reported at resource creation time and are
/// non-fatal to the rest of the scene; draw failures are reported per draw
/// and traversal continues.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Shader program compilation or linking failed
    #[error("Program creation failed: {0}")]
    ProgramCreationFailed(String),

    /// Vertex buffer creation or upload failed
    #[error("Mesh creation failed: {0}")]
    MeshCreationFailed(String),

    /// A draw submission was rejected by the backend
    #[error("Draw failed: {0}")]
    DrawFailed(String),
}
