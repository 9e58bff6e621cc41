//! Scene graph nodes and traversal
//!
//! A [`SceneNode`] owns its children outright - the tree is strictly rooted
//! and acyclic by construction, and children are visited depth-first,
//! pre-order, in insertion order. Behaviour during traversal is dispatched
//! over the closed [`NodeKind`] set rather than a subclass hierarchy.
//!
//! Every node that pushes render state for its subtree pops it exactly once
//! on exit, whatever happened while visiting children. A node that cannot
//! resolve what it needs (a missing matrix, an inactive program) reports the
//! problem and lets its subtree render with inherited state; it never aborts
//! the walk.

use crate::foundation::math::Matrix;
use crate::foundation::time::FrameTiming;
use crate::render::{Program, RenderBackend, UNIFORM_COLOUR, UNIFORM_MVP};
use crate::scene::animation::{Animation, Tick};
use crate::scene::registry::{
    SceneRegistry, KEY_CAMERA_EYE, KEY_CAMERA_LOOK_AT, KEY_CAMERA_UP, KEY_FRUSTUM,
};
use crate::scene::render_context::RenderContext;
use crate::scene::SceneError;

/// A colour binding scoped to a subtree
///
/// Looks up a 4-component float array in the registry and uploads it as the
/// colour uniform of the named program for the duration of the subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct ColourAttribute {
    program_name: String,
    colour_name: String,
}

impl ColourAttribute {
    /// Bind the float array `colour_name` as `program_name`'s colour
    pub fn new(program_name: impl Into<String>, colour_name: impl Into<String>) -> Self {
        Self {
            program_name: program_name.into(),
            colour_name: colour_name.into(),
        }
    }

    /// Program the colour is uploaded to
    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// Registry name of the colour value
    pub fn colour_name(&self) -> &str {
        &self.colour_name
    }
}

/// What a node does when the traversal visits it
pub enum NodeKind {
    /// Structural grouping only
    Group,

    /// Activates a shader program for the subtree, restoring the previously
    /// active program on exit
    Program(Program),

    /// Derives view and projection from the camera registry keys and
    /// exposes their composition as the ambient camera transform
    Camera,

    /// Right-multiplies a named registry matrix into the inherited model
    /// transform for the subtree
    Transformation {
        /// Registry name of the matrix to compose
        matrix_name: String,
    },

    /// Binds a colour attribute for the subtree, restoring the prior
    /// binding on exit
    Attribute(ColourAttribute),

    /// Issues a draw of a named mesh with the currently composed state
    Mesh {
        /// Program the draw must run under
        program_name: String,
        /// Registry name of the mesh to draw
        mesh_name: String,
    },
}

impl NodeKind {
    fn label(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Program(_) => "program",
            Self::Camera => "camera",
            Self::Transformation { .. } => "transformation",
            Self::Attribute(_) => "attribute",
            Self::Mesh { .. } => "mesh",
        }
    }
}

/// One element of the scene tree
///
/// Owns an ordered list of children and at most one [`Animation`]. Built
/// top-down with [`SceneNode::add_child`], which returns a reference to the
/// inserted child so chains read like the scene they describe:
///
/// ```
/// use scene_graph::scene::SceneNode;
///
/// let mut root = SceneNode::group();
/// root.add_child(SceneNode::camera())
///     .add_child(SceneNode::transformation("rotation"))
///     .add_child(SceneNode::mesh("line", "cube"));
/// ```
pub struct SceneNode {
    kind: NodeKind,
    children: Vec<SceneNode>,
    animation: Option<Box<dyn Animation>>,
}

impl SceneNode {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            animation: None,
        }
    }

    /// A structural node with no traversal behaviour of its own
    pub fn group() -> Self {
        Self::with_kind(NodeKind::Group)
    }

    /// A node that activates `program` for its subtree
    pub fn program(program: Program) -> Self {
        Self::with_kind(NodeKind::Program(program))
    }

    /// A node deriving camera state from the scene registries
    pub fn camera() -> Self {
        Self::with_kind(NodeKind::Camera)
    }

    /// A node composing the registry matrix `matrix_name` for its subtree
    pub fn transformation(matrix_name: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Transformation {
            matrix_name: matrix_name.into(),
        })
    }

    /// A node binding `attribute` for its subtree
    pub fn attribute(attribute: ColourAttribute) -> Self {
        Self::with_kind(NodeKind::Attribute(attribute))
    }

    /// A terminal node drawing `mesh_name` under `program_name`
    pub fn mesh(program_name: impl Into<String>, mesh_name: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Mesh {
            program_name: program_name.into(),
            mesh_name: mesh_name.into(),
        })
    }

    /// Append `child` after the existing children
    ///
    /// Returns a mutable reference to the inserted child so deeper levels
    /// can be chained on directly.
    pub fn add_child(&mut self, child: SceneNode) -> &mut SceneNode {
        self.children.push(child);
        self.children.last_mut().expect("child just appended")
    }

    /// Attach the node's animation hook, replacing any previous one
    pub fn set_animation(&mut self, animation: impl Animation + 'static) -> &mut SceneNode {
        self.animation = Some(Box::new(animation));
        self
    }

    /// The node's behavioural kind
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Children in insertion order
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Whether the node currently carries an animation hook
    pub fn has_animation(&self) -> bool {
        self.animation.is_some()
    }

    /// Pre-order animation pass
    ///
    /// Ticks this node's hook (if any), then recurses into children in
    /// insertion order. A hook returning [`Tick::Finished`] is removed; a
    /// hook that errors is reported and the walk continues with siblings
    /// untouched.
    pub(crate) fn tick_walk(&mut self, registry: &mut SceneRegistry, timing: &FrameTiming) {
        if let Some(animation) = self.animation.as_mut() {
            match animation.tick(registry, timing) {
                Ok(Tick::Continue) => {}
                Ok(Tick::Finished) => {
                    self.animation = None;
                }
                Err(error) => {
                    log::warn!("animation on {} node failed: {error}", self.kind.label());
                }
            }
        }
        for child in &mut self.children {
            child.tick_walk(registry, timing);
        }
    }

    /// Pre-order render pass
    ///
    /// Visits the identical node set in the identical order as
    /// [`SceneNode::tick_walk`], composing scoped state on the way down.
    pub(crate) fn render_walk(
        &self,
        registry: &SceneRegistry,
        ctx: &mut RenderContext,
        backend: &mut dyn RenderBackend,
    ) {
        match &self.kind {
            NodeKind::Group => self.render_children(registry, ctx, backend),

            NodeKind::Program(program) => {
                backend.bind_program(program.handle());
                ctx.push_program(program.name(), program.handle());
                self.render_children(registry, ctx, backend);
                ctx.pop_program();
                if let Some(previous) = ctx.current_program() {
                    backend.bind_program(previous);
                }
            }

            NodeKind::Camera => match camera_transform(registry, ctx) {
                Ok(camera) => {
                    ctx.push_camera(camera);
                    self.render_children(registry, ctx, backend);
                    ctx.pop_camera();
                }
                Err(error) => {
                    log::warn!("camera node keeps inherited transform: {error}");
                    self.render_children(registry, ctx, backend);
                }
            },

            NodeKind::Transformation { matrix_name } => match registry.get_matrix(matrix_name) {
                Ok(local) => {
                    let mut composed = Matrix::identity();
                    composed.multiply(ctx.model(), local);
                    ctx.push_model(composed);
                    self.render_children(registry, ctx, backend);
                    ctx.pop_model();
                }
                Err(error) => {
                    log::warn!("transformation node keeps parent transform: {error}");
                    self.render_children(registry, ctx, backend);
                }
            },

            NodeKind::Attribute(attribute) => {
                match bind_colour(attribute, registry, ctx, backend) {
                    Ok(program) => {
                        self.render_children(registry, ctx, backend);
                        ctx.pop_colour();
                        if let Some(previous) = ctx.colour_for(program) {
                            backend.set_uniform_vec4(program, UNIFORM_COLOUR, previous);
                        }
                    }
                    Err(error) => {
                        log::warn!("attribute node skipped: {error}");
                        self.render_children(registry, ctx, backend);
                    }
                }
            }

            NodeKind::Mesh {
                program_name,
                mesh_name,
            } => {
                if let Err(error) = draw_mesh(program_name, mesh_name, registry, ctx, backend) {
                    log::warn!("skipping draw of '{mesh_name}': {error}");
                }
                self.render_children(registry, ctx, backend);
            }
        }
    }

    fn render_children(
        &self,
        registry: &SceneRegistry,
        ctx: &mut RenderContext,
        backend: &mut dyn RenderBackend,
    ) {
        for child in &self.children {
            child.render_walk(registry, ctx, backend);
        }
    }
}

/// Compose view x projection from the camera registry keys
fn camera_transform(
    registry: &SceneRegistry,
    ctx: &RenderContext,
) -> Result<Matrix, SceneError> {
    let eye = registry.get_vector(KEY_CAMERA_EYE)?;
    let look_at = registry.get_vector(KEY_CAMERA_LOOK_AT)?;
    let up = registry.get_vector(KEY_CAMERA_UP)?;
    let frustum = registry.get_float_array(KEY_FRUSTUM)?;
    let [near, far] = <[f32; 2]>::try_from(frustum).map_err(|_| SceneError::InvalidFrustum {
        name: KEY_FRUSTUM.to_string(),
        actual: frustum.len(),
    })?;

    let mut view = Matrix::identity();
    view.make_look_at(eye, look_at, up);

    // Symmetric frustum; horizontal bounds follow the viewport aspect.
    let aspect = ctx.aspect_ratio();
    let mut projection = Matrix::identity();
    projection.make_frustum(-aspect, aspect, -1.0, 1.0, near, far);

    let mut camera = Matrix::identity();
    camera.multiply(&projection, &view);
    Ok(camera)
}

/// Resolve and upload an attribute node's colour binding
fn bind_colour(
    attribute: &ColourAttribute,
    registry: &SceneRegistry,
    ctx: &mut RenderContext,
    backend: &mut dyn RenderBackend,
) -> Result<crate::render::ProgramHandle, SceneError> {
    let program = ctx.find_program(attribute.program_name()).ok_or_else(|| {
        SceneError::ProgramNotActive {
            name: attribute.program_name().to_string(),
        }
    })?;
    let colour = registry.get_float_array(attribute.colour_name())?;
    let value = <[f32; 4]>::try_from(colour).map_err(|_| SceneError::InvalidColour {
        name: attribute.colour_name().to_string(),
        actual: colour.len(),
    })?;
    backend.set_uniform_vec4(program, UNIFORM_COLOUR, value);
    ctx.push_colour(program, value);
    Ok(program)
}

/// Upload the composed MVP and submit one draw
fn draw_mesh(
    program_name: &str,
    mesh_name: &str,
    registry: &SceneRegistry,
    ctx: &RenderContext,
    backend: &mut dyn RenderBackend,
) -> Result<(), SceneError> {
    let program = ctx
        .find_program(program_name)
        .ok_or_else(|| SceneError::ProgramNotActive {
            name: program_name.to_string(),
        })?;
    let mesh = registry.get_vertex_mesh(mesh_name)?;

    let mut mvp = Matrix::identity();
    mvp.multiply(ctx.camera(), ctx.model());
    backend.set_uniform_matrix(program, UNIFORM_MVP, mvp.to_cols_array());
    backend.draw_mesh(mesh.handle(), program, mesh.vertex_count())?;
    Ok(())
}
