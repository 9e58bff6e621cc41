//! Transient per-frame render state
//!
//! A fresh [`RenderContext`] is built for every render walk. Nodes push
//! state for their subtree and pop it on exit; the stacks below are the
//! structural guarantee that state set by a node is visible to its
//! descendants only, never to siblings or ancestors.

use crate::foundation::math::Matrix;
use crate::render::ProgramHandle;

/// A program currently active somewhere on the traversal path
#[derive(Debug, Clone)]
struct ActiveProgram {
    name: String,
    handle: ProgramHandle,
}

/// Render state composed top-down during a render walk
///
/// Holds the ambient camera transform, the composed model transform, the
/// stack of active programs, and the colour bindings in effect. The camera
/// and model stacks start with an identity entry so a mesh outside any
/// camera or transformation subtree still draws with a well-defined MVP.
pub struct RenderContext {
    viewport: (u32, u32),
    camera_stack: Vec<Matrix>,
    model_stack: Vec<Matrix>,
    program_stack: Vec<ActiveProgram>,
    colour_stack: Vec<(ProgramHandle, [f32; 4])>,
}

impl RenderContext {
    /// Create the context for one render walk over `viewport`
    pub fn new(viewport: (u32, u32)) -> Self {
        Self {
            viewport,
            camera_stack: vec![Matrix::identity()],
            model_stack: vec![Matrix::identity()],
            program_stack: Vec::new(),
            colour_stack: Vec::new(),
        }
    }

    /// Drawable surface size in pixels
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Viewport width over height, for projection setup
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.viewport;
        if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }

    /// The ambient camera transform (view x projection composition)
    pub fn camera(&self) -> &Matrix {
        self.camera_stack.last().expect("camera stack has identity base")
    }

    /// The composed model transform inherited from ancestors
    pub fn model(&self) -> &Matrix {
        self.model_stack.last().expect("model stack has identity base")
    }

    /// The most recently activated program, if any
    pub fn current_program(&self) -> Option<ProgramHandle> {
        self.program_stack.last().map(|active| active.handle)
    }

    /// Find the nearest active program named `name` on the traversal path
    pub fn find_program(&self, name: &str) -> Option<ProgramHandle> {
        self.program_stack
            .iter()
            .rev()
            .find(|active| active.name == name)
            .map(|active| active.handle)
    }

    pub(crate) fn push_camera(&mut self, camera: Matrix) {
        self.camera_stack.push(camera);
    }

    pub(crate) fn pop_camera(&mut self) {
        debug_assert!(self.camera_stack.len() > 1, "camera pop without push");
        self.camera_stack.pop();
    }

    pub(crate) fn push_model(&mut self, model: Matrix) {
        self.model_stack.push(model);
    }

    pub(crate) fn pop_model(&mut self) {
        debug_assert!(self.model_stack.len() > 1, "model pop without push");
        self.model_stack.pop();
    }

    pub(crate) fn push_program(&mut self, name: &str, handle: ProgramHandle) {
        self.program_stack.push(ActiveProgram {
            name: name.to_string(),
            handle,
        });
    }

    pub(crate) fn pop_program(&mut self) {
        self.program_stack.pop();
    }

    pub(crate) fn push_colour(&mut self, program: ProgramHandle, value: [f32; 4]) {
        self.colour_stack.push((program, value));
    }

    pub(crate) fn pop_colour(&mut self) {
        self.colour_stack.pop();
    }

    /// The colour binding still in effect for `program`, if any
    pub(crate) fn colour_for(&self, program: ProgramHandle) -> Option<[f32; 4]> {
        self.colour_stack
            .iter()
            .rev()
            .find(|(bound, _)| *bound == program)
            .map(|(_, value)| *value)
    }
}
