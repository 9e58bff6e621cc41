//! Shader descriptors and compiled programs
//!
//! A [`Shader`] carries everything the host needs to compile one program:
//! vertex and fragment source text plus the ordered attribute and uniform
//! names the program exposes. Source text is expected to use version-guarded
//! preprocessor branching so a single descriptor compiles under both legacy
//! and modern shading-language dialects.

use crate::render::{BackendResult, ProgramHandle, RenderBackend};

/// Uniform name the built-in mesh node uploads the composed MVP matrix to
pub const UNIFORM_MVP: &str = "u_MVPMatrix";

/// Uniform name the built-in colour attribute uploads to
pub const UNIFORM_COLOUR: &str = "u_Colour";

/// Immutable shader descriptor
///
/// The name is a stable registry identity used to find the matching program
/// node; it says nothing about the source content.
#[derive(Debug, Clone, PartialEq)]
pub struct Shader {
    name: String,
    vertex_source: String,
    fragment_source: String,
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

impl Shader {
    /// Build a shader descriptor
    pub fn new(
        name: impl Into<String>,
        vertex_source: impl Into<String>,
        fragment_source: impl Into<String>,
        attributes: Vec<String>,
        uniforms: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vertex_source: vertex_source.into(),
            fragment_source: fragment_source.into(),
            attributes,
            uniforms,
        }
    }

    /// Shader name (program identity)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vertex-stage source text
    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    /// Fragment-stage source text
    pub fn fragment_source(&self) -> &str {
        &self.fragment_source
    }

    /// Ordered attribute names
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Ordered uniform names
    pub fn uniforms(&self) -> &[String] {
        &self.uniforms
    }
}

/// A shader program compiled by a backend
///
/// Couples the descriptor with the handle the backend returned. Created once
/// via [`Program::create`], before the render loop; a compile failure is
/// reported to the caller and does not affect other programs.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    shader: Shader,
    handle: ProgramHandle,
}

impl Program {
    /// Compile `shader` through `backend` and keep the returned handle
    pub fn create(shader: Shader, backend: &mut dyn RenderBackend) -> BackendResult<Self> {
        let handle = backend.create_program(&shader)?;
        Ok(Self { shader, handle })
    }

    /// The underlying descriptor
    pub fn shader(&self) -> &Shader {
        &self.shader
    }

    /// Program name (registry identity)
    pub fn name(&self) -> &str {
        self.shader.name()
    }

    /// Backend handle for binding and uniform upload
    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }
}
