//! The retained scene and its per-frame driver
//!
//! [`Scene`] is the single mutable state container a host owns per surface:
//! the named registries plus the program-node roots. Its one per-frame
//! entry point, [`Scene::frame`], ticks every animation in every registered
//! subtree and then re-traverses each subtree issuing draws, so the render
//! pass always reads a frame-consistent registry.

use crate::foundation::math::{Matrix, Vector};
use crate::foundation::time::FrameTiming;
use crate::render::{RenderBackend, VertexMesh};
use crate::scene::node::SceneNode;
use crate::scene::registry::{RegistryError, SceneRegistry};
use crate::scene::render_context::RenderContext;

/// A retained scene: registries plus program-node roots
///
/// Constructed at init time and torn down with its owning surface. All
/// traversal happens synchronously inside [`Scene::frame`]; the host must
/// not re-enter it.
#[derive(Default)]
pub struct Scene {
    registry: SceneRegistry,
    roots: Vec<(String, SceneNode)>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared access to the registries
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    /// Mutable access to the registries
    pub fn registry_mut(&mut self) -> &mut SceneRegistry {
        &mut self.registry
    }

    /// Store a matrix under `name`, replacing any previous value
    pub fn put_matrix(&mut self, name: impl Into<String>, value: Matrix) {
        self.registry.put_matrix(name, value);
    }

    /// Look up the matrix stored under `name`
    pub fn get_matrix(&self, name: &str) -> Result<&Matrix, RegistryError> {
        self.registry.get_matrix(name)
    }

    /// Store a vector under `name`, replacing any previous value
    pub fn put_vector(&mut self, name: impl Into<String>, value: Vector) {
        self.registry.put_vector(name, value);
    }

    /// Look up the vector stored under `name`
    pub fn get_vector(&self, name: &str) -> Result<&Vector, RegistryError> {
        self.registry.get_vector(name)
    }

    /// Store a float array under `name`, replacing any previous value
    pub fn put_float_array(&mut self, name: impl Into<String>, value: Vec<f32>) {
        self.registry.put_float_array(name, value);
    }

    /// Look up the float array stored under `name`
    pub fn get_float_array(&self, name: &str) -> Result<&[f32], RegistryError> {
        self.registry.get_float_array(name)
    }

    /// Store a registered mesh under `name`, replacing any previous value
    pub fn put_vertex_mesh(&mut self, name: impl Into<String>, value: VertexMesh) {
        self.registry.put_vertex_mesh(name, value);
    }

    /// Look up the registered mesh stored under `name`
    pub fn get_vertex_mesh(&self, name: &str) -> Result<&VertexMesh, RegistryError> {
        self.registry.get_vertex_mesh(name)
    }

    /// Register a program-node root under `name`
    ///
    /// Replaces any root previously registered under the same name, keeping
    /// its position in the frame order; new names render after existing
    /// ones. A program must be registered here before any frame renders a
    /// subtree that references it.
    pub fn put_program_node(&mut self, name: impl Into<String>, node: SceneNode) {
        let name = name.into();
        match self.roots.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = node,
            None => self.roots.push((name, node)),
        }
    }

    /// The program-node root registered under `name`, if any
    pub fn program_node(&self, name: &str) -> Option<&SceneNode> {
        self.roots
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, node)| node)
    }

    /// Registered program names in frame order
    pub fn program_names(&self) -> impl Iterator<Item = &str> {
        self.roots.iter().map(|(name, _)| name.as_str())
    }

    /// Drive one frame
    ///
    /// The host calls this once per display refresh, on the thread that
    /// owns the rendering context. For every registered root, first the
    /// animation pass ticks each node's hook pre-order, then the render
    /// pass re-traverses the same nodes in the same order issuing draws.
    /// Every tick side effect is applied before the render pass begins, so
    /// draws observe the state written for this frame, never a mix.
    pub fn frame(&mut self, backend: &mut dyn RenderBackend, timing: &FrameTiming) {
        log::trace!("frame {} begin", timing.frame_index);

        for (name, root) in &mut self.roots {
            log::trace!("ticking '{name}' subtree");
            root.tick_walk(&mut self.registry, timing);
        }

        let viewport = backend.viewport();
        for (name, root) in &self.roots {
            log::trace!("rendering '{name}' subtree");
            let mut ctx = RenderContext::new(viewport);
            root.render_walk(&self.registry, &mut ctx, backend);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{
        Mesh, Program, RecordingBackend, Shader, UNIFORM_MVP,
    };
    use crate::scene::animation::{AnimationError, Tick};
    use crate::scene::node::ColourAttribute;
    use crate::scene::registry::{
        KEY_CAMERA_EYE, KEY_CAMERA_LOOK_AT, KEY_CAMERA_UP, KEY_FRUSTUM,
    };
    use approx::assert_relative_eq;

    fn line_shader() -> Shader {
        Shader::new(
            "line",
            "void main() {}",
            "void main() {}",
            vec!["a_Position".to_string()],
            vec!["u_MVPMatrix".to_string(), "u_Colour".to_string()],
        )
    }

    #[test]
    fn test_put_program_node_overwrites_in_place() {
        let mut backend = RecordingBackend::new();
        let first = Program::create(line_shader(), &mut backend).unwrap();
        let second = Program::create(line_shader(), &mut backend).unwrap();

        let mut scene = Scene::new();
        scene.put_program_node("line", SceneNode::program(first));
        scene.put_program_node("other", SceneNode::group());
        scene.put_program_node("line", SceneNode::program(second));

        assert_eq!(scene.program_names().collect::<Vec<_>>(), vec!["line", "other"]);
    }

    #[test]
    fn test_tick_writes_are_visible_to_same_frame_draws() {
        let mut backend = RecordingBackend::new();
        let program = Program::create(line_shader(), &mut backend).unwrap();

        let mut scene = Scene::new();
        let mesh = VertexMesh::create(Mesh::cube(), &mut backend).unwrap();
        scene.put_vertex_mesh("cube", mesh);
        scene.put_matrix("slide", Matrix::identity());

        let mut root = SceneNode::program(program);
        let slide = root.add_child(SceneNode::transformation("slide"));
        slide.set_animation(
            |registry: &mut SceneRegistry,
             timing: &FrameTiming|
             -> Result<Tick, AnimationError> {
                let offset = (timing.frame_index + 1) as f32;
                registry
                    .matrix_mut("slide")?
                    .make_translation(&Vector::new(offset, 0.0, 0.0));
                Ok(Tick::Continue)
            },
        );
        slide.add_child(SceneNode::mesh("line", "cube"));
        scene.put_program_node("line", root);

        for i in 0..3 {
            scene.frame(&mut backend, &FrameTiming::fixed(i, 1.0 / 60.0));
        }

        // Each frame's draw sees the translation written by that frame's tick.
        let uploads = backend.matrix_uploads(UNIFORM_MVP);
        assert_eq!(uploads.len(), 3);
        assert_eq!(uploads[0][12], 1.0);
        assert_eq!(uploads[1][12], 2.0);
        assert_eq!(uploads[2][12], 3.0);
    }

    #[test]
    fn test_both_walks_visit_nodes_in_the_same_order() {
        let mut backend = RecordingBackend::new();
        let program = Program::create(line_shader(), &mut backend).unwrap();

        let mut scene = Scene::new();
        for name in ["first", "second", "third"] {
            let mesh = Mesh::new(name, 1, vec![0.0, 0.0, 0.0]).unwrap();
            let mesh = VertexMesh::create(mesh, &mut backend).unwrap();
            scene.put_vertex_mesh(name, mesh);
        }
        scene.put_float_array("order", Vec::new());

        let order_hook = |id: f32| {
            move |registry: &mut SceneRegistry,
                  _: &FrameTiming|
                  -> Result<Tick, AnimationError> {
                registry.float_array_mut("order")?.push(id);
                Ok(Tick::Continue)
            }
        };

        let mut root = SceneNode::program(program);
        root.add_child(SceneNode::mesh("line", "first"))
            .set_animation(order_hook(0.0));
        root.add_child(SceneNode::mesh("line", "second"))
            .set_animation(order_hook(1.0));
        root.add_child(SceneNode::mesh("line", "third"))
            .set_animation(order_hook(2.0));
        scene.put_program_node("line", root);

        scene.frame(&mut backend, &FrameTiming::fixed(0, 0.0));

        assert_eq!(
            scene.get_float_array("order").unwrap(),
            &[0.0, 1.0, 2.0]
        );
        assert_eq!(backend.draw_order(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_animation_runs_exactly_once_per_frame() {
        let mut scene = Scene::new();
        scene.put_float_array("ticks", vec![0.0]);

        let mut root = SceneNode::group();
        root.set_animation(
            |registry: &mut SceneRegistry,
             _: &FrameTiming|
             -> Result<Tick, AnimationError> {
                registry.float_array_mut("ticks")?[0] += 1.0;
                Ok(Tick::Continue)
            },
        );
        scene.put_program_node("idle", root);

        let mut backend = RecordingBackend::new();
        for i in 0..5 {
            scene.frame(&mut backend, &FrameTiming::fixed(i, 0.0));
        }

        assert_eq!(scene.get_float_array("ticks").unwrap(), &[5.0]);
    }

    /// End-to-end reconstruction of the spinning-cube scene: one program,
    /// one camera, one animated rotation, one colour, one mesh, 100 frames.
    #[test]
    fn test_spinning_cube_end_to_end() {
        let mut backend = RecordingBackend::new();
        let program = Program::create(line_shader(), &mut backend).unwrap();

        let mut scene = Scene::new();
        scene.put_float_array("blue", vec![0.0, 0.0, 1.0, 1.0]);
        scene.put_float_array(KEY_FRUSTUM, vec![0.5, 2.5]);
        scene.put_vector(KEY_CAMERA_EYE, Vector::new(0.0, 0.0, 1.5));
        scene.put_vector(KEY_CAMERA_LOOK_AT, Vector::new(0.0, 0.0, 0.0));
        scene.put_vector(KEY_CAMERA_UP, Vector::new(0.0, 1.0, 0.0));
        scene.put_matrix("rotation", Matrix::identity());

        let mesh = VertexMesh::create(Mesh::cube(), &mut backend).unwrap();
        scene.put_vertex_mesh("cube", mesh);

        let mut root = SceneNode::program(program);
        let rotation = root
            .add_child(SceneNode::camera())
            .add_child(SceneNode::transformation("rotation"));
        rotation.set_animation({
            let mut angle = 0.0_f32;
            let increment = 0.01_f32;
            move |registry: &mut SceneRegistry,
                  _: &FrameTiming|
                  -> Result<Tick, AnimationError> {
                angle += increment;
                registry
                    .matrix_mut("rotation")?
                    .make_rotation_axis(angle, &Vector::y_axis());
                Ok(Tick::Continue)
            }
        });
        rotation
            .add_child(SceneNode::attribute(ColourAttribute::new("line", "blue")))
            .add_child(SceneNode::mesh("line", "cube"));
        scene.put_program_node("line", root);

        for i in 0..100 {
            scene.frame(&mut backend, &FrameTiming::fixed(i, 1.0 / 60.0));
        }

        // After 100 ticks of 0.01 the registry holds a 1.0 radian Y rotation.
        let mut expected = Matrix::identity();
        expected.make_rotation_axis(1.0, &Vector::y_axis());
        let actual = scene.get_matrix("rotation").unwrap().to_cols_array();
        for (a, e) in actual.iter().zip(expected.to_cols_array().iter()) {
            assert_relative_eq!(*a, *e, epsilon = 1e-4);
        }

        assert_eq!(backend.draw_count("cube"), 100);
        assert_eq!(backend.total_draws(), 100);
    }

    #[test]
    fn test_camera_node_uploads_view_projection_mvp() {
        let mut backend = RecordingBackend::new();
        let program = Program::create(line_shader(), &mut backend).unwrap();

        let mut scene = Scene::new();
        scene.put_float_array(KEY_FRUSTUM, vec![0.5, 2.5]);
        scene.put_vector(KEY_CAMERA_EYE, Vector::new(0.0, 0.0, 1.5));
        scene.put_vector(KEY_CAMERA_LOOK_AT, Vector::new(0.0, 0.0, 0.0));
        scene.put_vector(KEY_CAMERA_UP, Vector::new(0.0, 1.0, 0.0));
        let mesh = VertexMesh::create(Mesh::cube(), &mut backend).unwrap();
        scene.put_vertex_mesh("cube", mesh);

        let mut root = SceneNode::program(program);
        root.add_child(SceneNode::camera())
            .add_child(SceneNode::mesh("line", "cube"));
        scene.put_program_node("line", root);

        scene.frame(&mut backend, &FrameTiming::fixed(0, 0.0));

        // With no model transform the uploaded MVP is exactly
        // projection x view for the registered camera state.
        let aspect = 800.0 / 600.0;
        let mut view = Matrix::identity();
        view.make_look_at(
            &Vector::new(0.0, 0.0, 1.5),
            &Vector::new(0.0, 0.0, 0.0),
            &Vector::new(0.0, 1.0, 0.0),
        );
        let mut projection = Matrix::identity();
        projection.make_frustum(-aspect, aspect, -1.0, 1.0, 0.5, 2.5);
        let mut expected = Matrix::identity();
        expected.multiply(&projection, &view);

        let uploads = backend.matrix_uploads(UNIFORM_MVP);
        assert_eq!(uploads.len(), 1);
        for (a, e) in uploads[0].iter().zip(expected.to_cols_array().iter()) {
            assert_relative_eq!(*a, *e, epsilon = 1e-6);
        }
    }
}
