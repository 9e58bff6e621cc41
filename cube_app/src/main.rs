//! Spinning cube demo application
//!
//! Builds the classic scene-graph demo scene - one program, one camera, one
//! animated rotation, one colour, one wireframe cube - and drives it for a
//! configured number of frames against the recording backend. A real host
//! would implement `RenderBackend` over its GPU context and call
//! `Scene::frame` from its refresh callback instead.

mod config;

use config::DemoConfig;
use scene_graph::prelude::*;
use scene_graph::scene::{
    AnimationError, ColourAttribute, KEY_CAMERA_EYE, KEY_CAMERA_LOOK_AT, KEY_CAMERA_UP,
    KEY_FRUSTUM,
};

const SHADER_NAME: &str = "line";
const MESH_NAME: &str = "cube";
const COLOUR_NAME: &str = "blue";
const ROTATION_NAME: &str = "rotation";

// Version-guarded sources so one descriptor compiles under both legacy and
// modern GLSL dialects.
const VERTEX_SOURCE: &str = "\
#if __VERSION__ >= 130
  #define attribute in
  #define varying out
#endif
uniform mat4 u_MVPMatrix;
attribute vec4 a_Position;
void main() {
    gl_Position = u_MVPMatrix * a_Position;
}";

const FRAGMENT_SOURCE: &str = "\
#if __VERSION__ >= 130
  #define varying in
  out vec4 mgl_FragColour;
#else
  #define mgl_FragColour gl_FragColor
#endif
#ifdef GL_ES
  #define MEDIUMP mediump
#else
  #define MEDIUMP
#endif
uniform MEDIUMP vec4 u_Colour;
void main() {
    mgl_FragColour = u_Colour;
}";

/// Assemble the demo scene against `backend`
fn build_scene(
    config: &DemoConfig,
    backend: &mut dyn RenderBackend,
) -> Result<Scene, Box<dyn std::error::Error>> {
    let mut scene = Scene::new();

    // Scene colours and frustum
    scene.put_float_array(COLOUR_NAME, config.colour.to_vec());
    scene.put_float_array(KEY_FRUSTUM, vec![0.5, 2.5]);

    // Scene camera
    scene.put_vector(KEY_CAMERA_EYE, Vector::new(0.0, 0.0, 1.5));
    scene.put_vector(KEY_CAMERA_LOOK_AT, Vector::new(0.0, 0.0, 0.0));
    scene.put_vector(KEY_CAMERA_UP, Vector::new(0.0, 1.0, 0.0));

    // Scene matrices
    scene.put_matrix(ROTATION_NAME, Matrix::identity());

    // Create mesh; a real host would load geometry from assets or network
    let mesh = Mesh::cube();
    log::info!(
        "registering mesh '{}' with {} vertices",
        mesh.name(),
        mesh.vertex_count()
    );
    let vertex_mesh = VertexMesh::create(mesh, backend)?;
    scene.put_vertex_mesh(MESH_NAME, vertex_mesh);

    // Create shader program
    let shader = Shader::new(
        SHADER_NAME,
        VERTEX_SOURCE,
        FRAGMENT_SOURCE,
        vec!["a_Position".to_string()],
        vec!["u_MVPMatrix".to_string(), "u_Colour".to_string()],
    );
    let program = Program::create(shader, backend)?;
    log::info!("program '{}' ready", program.name());

    // Program -> camera -> rotation -> colour -> mesh
    let mut program_node = SceneNode::program(program);
    let rotation_node = program_node
        .add_child(SceneNode::camera())
        .add_child(SceneNode::transformation(ROTATION_NAME));

    // Animation rotating the cube about Y, one increment per tick
    rotation_node.set_animation({
        let mut angle = 0.0_f32;
        let increment = config.angle_increment;
        move |registry: &mut SceneRegistry,
              _timing: &FrameTiming|
              -> Result<Tick, AnimationError> {
            angle += increment;
            registry
                .matrix_mut(ROTATION_NAME)?
                .make_rotation_axis(angle, &Vector::y_axis());
            Ok(Tick::Continue)
        }
    });

    rotation_node
        .add_child(SceneNode::attribute(ColourAttribute::new(
            SHADER_NAME,
            COLOUR_NAME,
        )))
        .add_child(SceneNode::mesh(SHADER_NAME, MESH_NAME));

    scene.put_program_node(SHADER_NAME, program_node);
    Ok(scene)
}

fn run(config: &DemoConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut backend =
        RecordingBackend::with_viewport(config.viewport_width, config.viewport_height);
    let mut scene = build_scene(config, &mut backend)?;

    log::info!("driving {} frames", config.frames);
    let mut clock = FrameClock::new();
    for _ in 0..config.frames {
        let timing = clock.next_frame();
        scene.frame(&mut backend, &timing);

        if (timing.frame_index + 1) % 25 == 0 {
            log::debug!(
                "frame {}: {} draws so far",
                timing.frame_index + 1,
                backend.total_draws()
            );
        }
    }

    log::info!(
        "done: {} frames in {:.3}s, {} draws of '{}'",
        clock.frame_count(),
        clock.total_time(),
        backend.draw_count(MESH_NAME),
        MESH_NAME
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting spinning cube demo");

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "cube_demo.toml".to_string());
    let config = DemoConfig::load_or_default(&config_path);
    log::debug!("config: {config:?}");

    match run(&config) {
        Ok(()) => {
            log::info!("Spinning cube demo finished successfully");
            Ok(())
        }
        Err(error) => {
            log::error!("Demo error: {error}");
            Err(error)
        }
    }
}
