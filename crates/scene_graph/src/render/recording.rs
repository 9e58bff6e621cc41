//! Recording backend for tests and headless tools
//!
//! Implements [`RenderBackend`] without any GPU: resource creation hands out
//! sequential handles and every subsequent call is appended to a call log.
//! Tests assert on the log (draw counts, uniform values, call order) and the
//! demo binary uses it to drive frames without a window.

use crate::render::{
    Mesh, MeshHandle, ProgramHandle, RenderBackend, RenderError, Shader,
};
use std::collections::{HashMap, HashSet};

/// One call recorded by [`RecordingBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    /// A program was made active
    BindProgram(ProgramHandle),

    /// A 4x4 matrix uniform was uploaded
    SetUniformMatrix {
        /// Target program
        program: ProgramHandle,
        /// Uniform name
        name: String,
        /// Column-major matrix value
        value: [f32; 16],
    },

    /// A 4-component float uniform was uploaded
    SetUniformVec4 {
        /// Target program
        program: ProgramHandle,
        /// Uniform name
        name: String,
        /// Uniform value
        value: [f32; 4],
    },

    /// A draw was submitted
    Draw {
        /// Mesh drawn
        mesh: MeshHandle,
        /// Program used
        program: ProgramHandle,
        /// Vertices submitted
        vertex_count: usize,
    },
}

/// In-memory [`RenderBackend`] that records every call
pub struct RecordingBackend {
    viewport: (u32, u32),
    next_handle: u64,
    programs: HashMap<ProgramHandle, String>,
    meshes: HashMap<MeshHandle, String>,
    rejected: HashSet<String>,
    calls: Vec<RecordedCall>,
    draw_counts: HashMap<String, usize>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    /// Create a backend with an 800x600 viewport
    pub fn new() -> Self {
        Self::with_viewport(800, 600)
    }

    /// Create a backend with an explicit viewport size
    pub fn with_viewport(width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            next_handle: 0,
            programs: HashMap::new(),
            meshes: HashMap::new(),
            rejected: HashSet::new(),
            calls: Vec::new(),
            draw_counts: HashMap::new(),
        }
    }

    /// Make any future resource creation under `name` fail
    ///
    /// Simulates a shader compile error or vertex upload failure for tests
    /// of construction-failure isolation.
    pub fn reject(&mut self, name: impl Into<String>) {
        self.rejected.insert(name.into());
    }

    /// Every call recorded so far, in submission order
    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    /// Number of draws submitted for the mesh registered under `name`
    pub fn draw_count(&self, name: &str) -> usize {
        self.draw_counts.get(name).copied().unwrap_or(0)
    }

    /// Total number of draws submitted
    pub fn total_draws(&self) -> usize {
        self.draw_counts.values().sum()
    }

    /// Mesh names in the order they were drawn
    pub fn draw_order(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Draw { mesh, .. } => {
                    self.meshes.get(mesh).map(String::as_str)
                }
                _ => None,
            })
            .collect()
    }

    /// Every value uploaded to the uniform `name`, in submission order
    pub fn matrix_uploads(&self, name: &str) -> Vec<[f32; 16]> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RecordedCall::SetUniformMatrix {
                    name: uniform,
                    value,
                    ..
                } if uniform == name => Some(*value),
                _ => None,
            })
            .collect()
    }

    fn allocate_handle(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

impl RenderBackend for RecordingBackend {
    fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    fn create_program(&mut self, shader: &Shader) -> Result<ProgramHandle, RenderError> {
        if self.rejected.contains(shader.name()) {
            return Err(RenderError::ProgramCreationFailed(format!(
                "'{}' rejected by recording backend",
                shader.name()
            )));
        }
        let handle = ProgramHandle(self.allocate_handle());
        self.programs.insert(handle, shader.name().to_string());
        Ok(handle)
    }

    fn create_mesh(&mut self, mesh: &Mesh) -> Result<MeshHandle, RenderError> {
        if self.rejected.contains(mesh.name()) {
            return Err(RenderError::MeshCreationFailed(format!(
                "'{}' rejected by recording backend",
                mesh.name()
            )));
        }
        let handle = MeshHandle(self.allocate_handle());
        self.meshes.insert(handle, mesh.name().to_string());
        Ok(handle)
    }

    fn bind_program(&mut self, program: ProgramHandle) {
        self.calls.push(RecordedCall::BindProgram(program));
    }

    fn set_uniform_matrix(&mut self, program: ProgramHandle, name: &str, value: [f32; 16]) {
        self.calls.push(RecordedCall::SetUniformMatrix {
            program,
            name: name.to_string(),
            value,
        });
    }

    fn set_uniform_vec4(&mut self, program: ProgramHandle, name: &str, value: [f32; 4]) {
        self.calls.push(RecordedCall::SetUniformVec4 {
            program,
            name: name.to_string(),
            value,
        });
    }

    fn draw_mesh(
        &mut self,
        mesh: MeshHandle,
        program: ProgramHandle,
        vertex_count: usize,
    ) -> Result<(), RenderError> {
        let Some(mesh_name) = self.meshes.get(&mesh) else {
            return Err(RenderError::DrawFailed(format!(
                "unknown mesh handle {mesh:?}"
            )));
        };
        if !self.programs.contains_key(&program) {
            return Err(RenderError::DrawFailed(format!(
                "unknown program handle {program:?}"
            )));
        }
        *self.draw_counts.entry(mesh_name.clone()).or_insert(0) += 1;
        self.calls.push(RecordedCall::Draw {
            mesh,
            program,
            vertex_count,
        });
        Ok(())
    }
}
