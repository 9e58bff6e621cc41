//! Per-frame animation hooks
//!
//! A node may own one [`Animation`]. The scene ticks every hook in a
//! subtree exactly once per frame, pre-order, before the render walk for
//! that frame begins, so every draw observes the state the hooks wrote.
//!
//! Hooks are isolated: an error from one tick is reported and the walk
//! carries on with the remaining nodes.

use crate::foundation::time::FrameTiming;
use crate::scene::registry::{RegistryError, SceneRegistry};
use thiserror::Error;

/// Outcome of one animation tick
///
/// [`Tick::Finished`] removes the hook from its node: the node keeps
/// rendering, it just stops being ticked. Return [`Tick::Continue`] to be
/// called again next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Tick again next frame
    Continue,
    /// Remove this hook; the node no longer animates
    Finished,
}

/// Errors raised by animation hooks
#[derive(Error, Debug)]
pub enum AnimationError {
    /// The hook referenced a registry name that failed to resolve
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Hook-specific failure
    #[error("Animation failed: {0}")]
    Failed(String),
}

/// A per-frame animation hook
///
/// Owned exclusively by the node that carries it. Typical hooks advance
/// some state and rewrite a registry value, like the demo's rotation:
///
/// ```
/// use scene_graph::foundation::math::Vector;
/// use scene_graph::foundation::time::FrameTiming;
/// use scene_graph::scene::{Animation, AnimationError, SceneRegistry, Tick};
///
/// let mut angle = 0.0_f32;
/// let spin = move |registry: &mut SceneRegistry,
///                  _timing: &FrameTiming|
///                  -> Result<Tick, AnimationError> {
///     angle += 0.01;
///     registry.matrix_mut("rotation")?.make_rotation_axis(angle, &Vector::y_axis());
///     Ok(Tick::Continue)
/// };
/// # let _: Box<dyn Animation> = Box::new(spin);
/// ```
///
/// There is no hidden clock: frame-rate-independent motion reads
/// `timing.delta_seconds` from the host-supplied [`FrameTiming`].
pub trait Animation {
    /// Advance the animation by one frame
    fn tick(
        &mut self,
        registry: &mut SceneRegistry,
        timing: &FrameTiming,
    ) -> Result<Tick, AnimationError>;
}

impl<F> Animation for F
where
    F: FnMut(&mut SceneRegistry, &FrameTiming) -> Result<Tick, AnimationError>,
{
    fn tick(
        &mut self,
        registry: &mut SceneRegistry,
        timing: &FrameTiming,
    ) -> Result<Tick, AnimationError> {
        self(registry, timing)
    }
}
