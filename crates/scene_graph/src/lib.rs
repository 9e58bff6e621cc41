//! # Scene Graph
//!
//! A retained-mode 3D scene graph library for real-time rendering.
//!
//! ## Features
//!
//! - **Composable node tree**: program, camera, transformation, attribute
//!   and mesh nodes accumulating state top-down
//! - **Named registries**: matrices, vectors, float arrays and meshes
//!   addressed by stable names
//! - **Per-frame animation protocol**: hooks ticked before every render
//!   pass, isolated per node
//! - **Backend agnostic**: all GPU work goes through a single trait the
//!   host implements
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_graph::prelude::*;
//!
//! let mut backend = RecordingBackend::new();
//! let shader = Shader::new(
//!     "line",
//!     "void main() {}",
//!     "void main() {}",
//!     vec!["a_Position".to_string()],
//!     vec!["u_MVPMatrix".to_string(), "u_Colour".to_string()],
//! );
//! let program = Program::create(shader, &mut backend)?;
//!
//! let mut scene = Scene::new();
//! let cube = VertexMesh::create(Mesh::cube(), &mut backend)?;
//! scene.put_vertex_mesh("cube", cube);
//! scene.put_matrix("rotation", Matrix::identity());
//!
//! let mut root = SceneNode::program(program);
//! root.add_child(SceneNode::transformation("rotation"))
//!     .add_child(SceneNode::mesh("line", "cube"));
//! scene.put_program_node("line", root);
//!
//! let mut clock = FrameClock::new();
//! scene.frame(&mut backend, &clock.next_frame());
//! assert_eq!(backend.draw_count("cube"), 1);
//! # Ok::<(), scene_graph::render::RenderError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for library users
pub mod prelude {
    pub use crate::foundation::{
        math::{Matrix, Vector},
        time::{FrameClock, FrameTiming},
    };
    pub use crate::render::{
        Mesh, MeshHandle, Program, ProgramHandle, RecordingBackend, RenderBackend, RenderError,
        Shader, VertexMesh,
    };
    pub use crate::scene::{
        Animation, AnimationError, ColourAttribute, Scene, SceneNode, SceneRegistry, Tick,
    };
}
