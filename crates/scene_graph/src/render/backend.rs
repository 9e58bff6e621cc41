//! Backend abstraction for the scene graph
//!
//! This module defines the trait a rendering host must implement to drive
//! the graph. The host owns the surface, the GPU context and the thread the
//! per-frame entry point runs on; the graph only ever issues calls through
//! this interface.

use crate::render::{Mesh, RenderError, Shader};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Handle to a mesh resource stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Handle to a compiled shader program stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u64);

/// Rendering backend trait
///
/// Implemented by the host collaborator. Resource creation
/// ([`RenderBackend::create_program`], [`RenderBackend::create_mesh`]) may
/// block on compilation or upload and must therefore happen before the
/// render loop starts; the remaining calls are issued from inside the
/// per-frame render walk and must not block.
pub trait RenderBackend {
    /// Current drawable surface size in pixels (width, height)
    fn viewport(&self) -> (u32, u32);

    /// Compile and link a shader program from its descriptor
    fn create_program(&mut self, shader: &Shader) -> BackendResult<ProgramHandle>;

    /// Upload a mesh's vertex data and return a handle to it
    fn create_mesh(&mut self, mesh: &Mesh) -> BackendResult<MeshHandle>;

    /// Make `program` the active program for subsequent draws
    fn bind_program(&mut self, program: ProgramHandle);

    /// Upload a column-major 4x4 matrix uniform to `program`
    fn set_uniform_matrix(&mut self, program: ProgramHandle, name: &str, value: [f32; 16]);

    /// Upload a 4-component float uniform to `program`
    fn set_uniform_vec4(&mut self, program: ProgramHandle, name: &str, value: [f32; 4]);

    /// Draw `vertex_count` vertices of `mesh` with `program`
    fn draw_mesh(
        &mut self,
        mesh: MeshHandle,
        program: ProgramHandle,
        vertex_count: usize,
    ) -> BackendResult<()>;
}
