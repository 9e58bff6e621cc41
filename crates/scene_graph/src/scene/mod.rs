//! Scene management system
//!
//! The retained scene graph: named state registries, the node tree, the
//! per-frame animation protocol, and the driver that turns one host
//! callback into a tick walk followed by a render walk.
//!
//! ## Architecture
//!
//! ```text
//! Host (surface, GPU, timing)
//!      |  frame(backend, timing)
//! Scene (registries + program-node roots)
//!      |  tick walk, then render walk, pre-order
//! SceneNode tree -> RenderBackend draw calls
//! ```
//!
//! Scene state lives in an explicit [`SceneRegistry`] handed into every
//! traversal call, never in process globals, so independent scenes can
//! coexist and be tested in isolation.

mod animation;
mod graph;
mod node;
mod registry;
mod render_context;

pub use animation::{Animation, AnimationError, Tick};
pub use graph::Scene;
pub use node::{ColourAttribute, NodeKind, SceneNode};
pub use registry::{
    RegistryError, RegistryKind, SceneRegistry, KEY_CAMERA_EYE, KEY_CAMERA_LOOK_AT,
    KEY_CAMERA_UP, KEY_FRUSTUM,
};
pub use render_context::RenderContext;

use crate::render::RenderError;
use thiserror::Error;

/// Errors raised while resolving a node's dependencies during a render walk
///
/// These are reported per node and never abort the walk; the worst outcome
/// is a skipped draw for the affected subtree.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A registry lookup failed
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The backend rejected a draw
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The frustum float array does not hold exactly (near, far)
    #[error("Float array '{name}' must hold [near, far], got {actual} values")]
    InvalidFrustum {
        /// Registry name of the frustum array
        name: String,
        /// Number of values actually stored
        actual: usize,
    },

    /// A colour float array does not hold exactly 4 components
    #[error("Colour '{name}' must hold 4 components, got {actual}")]
    InvalidColour {
        /// Registry name of the colour array
        name: String,
        /// Number of values actually stored
        actual: usize,
    },

    /// A node named a program that is not active on its traversal path
    #[error("Program '{name}' is not active on this traversal path")]
    ProgramNotActive {
        /// The program name the node asked for
        name: String,
    },
}
