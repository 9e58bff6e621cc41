//! Named value registries backing the scene graph
//!
//! The scene keeps four independent name-to-value registries: matrices,
//! vectors, float arrays, and vertex meshes. Names are unique per registry,
//! `put` overwrites unconditionally, and a failed `get` distinguishes "no
//! such name anywhere" from "that name holds a different kind of value".
//!
//! Built-in node types read a handful of keys by convention (the `KEY_*`
//! constants); nothing enforces their presence beyond the camera node
//! reporting a registry miss at render time.

use crate::foundation::math::{Matrix, Vector};
use crate::render::VertexMesh;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Registry key the camera node reads its eye position from
pub const KEY_CAMERA_EYE: &str = "camera-eye";

/// Registry key the camera node reads its look-at target from
pub const KEY_CAMERA_LOOK_AT: &str = "camera-look-at";

/// Registry key the camera node reads its up vector from
pub const KEY_CAMERA_UP: &str = "camera-up";

/// Registry key the camera node reads its (near, far) frustum pair from
pub const KEY_FRUSTUM: &str = "frustum";

/// The kind of value a registry slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    /// 4x4 matrix
    Matrix,
    /// 3-component vector
    Vector,
    /// Named float array
    FloatArray,
    /// Registered vertex mesh
    VertexMesh,
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Matrix => "matrix",
            Self::Vector => "vector",
            Self::FloatArray => "float array",
            Self::VertexMesh => "vertex mesh",
        };
        f.write_str(label)
    }
}

/// Errors raised by registry lookups
///
/// Never silently defaulted; callers decide whether a miss is recoverable.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The name is absent from every registry
    #[error("No {kind} registered under '{name}'")]
    NotFound {
        /// Requested name
        name: String,
        /// Kind the caller asked for
        kind: RegistryKind,
    },

    /// The name exists, but in a different registry than requested
    #[error("'{name}' is registered as a {actual}, not a {expected}")]
    WrongKind {
        /// Requested name
        name: String,
        /// Kind the caller asked for
        expected: RegistryKind,
        /// Kind the name actually holds
        actual: RegistryKind,
    },
}

/// The scene's named mutable state
///
/// Animation hooks mutate values in place between frames; the render walk
/// reads them within the same frame. Values are stored by move, so no two
/// slots can alias one instance.
#[derive(Default)]
pub struct SceneRegistry {
    matrices: HashMap<String, Matrix>,
    vectors: HashMap<String, Vector>,
    float_arrays: HashMap<String, Vec<f32>>,
    meshes: HashMap<String, VertexMesh>,
}

impl SceneRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a matrix under `name`, replacing any previous value
    pub fn put_matrix(&mut self, name: impl Into<String>, value: Matrix) {
        self.matrices.insert(name.into(), value);
    }

    /// Look up the matrix stored under `name`
    pub fn get_matrix(&self, name: &str) -> Result<&Matrix, RegistryError> {
        self.matrices
            .get(name)
            .ok_or_else(|| self.miss(name, RegistryKind::Matrix))
    }

    /// Mutable access to the matrix stored under `name`
    ///
    /// The usual way for an animation hook to rewrite a transform without
    /// reallocating.
    pub fn matrix_mut(&mut self, name: &str) -> Result<&mut Matrix, RegistryError> {
        if self.matrices.contains_key(name) {
            Ok(self.matrices.get_mut(name).unwrap())
        } else {
            Err(self.miss(name, RegistryKind::Matrix))
        }
    }

    /// Store a vector under `name`, replacing any previous value
    pub fn put_vector(&mut self, name: impl Into<String>, value: Vector) {
        self.vectors.insert(name.into(), value);
    }

    /// Look up the vector stored under `name`
    pub fn get_vector(&self, name: &str) -> Result<&Vector, RegistryError> {
        self.vectors
            .get(name)
            .ok_or_else(|| self.miss(name, RegistryKind::Vector))
    }

    /// Store a float array under `name`, replacing any previous value
    pub fn put_float_array(&mut self, name: impl Into<String>, value: Vec<f32>) {
        self.float_arrays.insert(name.into(), value);
    }

    /// Look up the float array stored under `name`
    pub fn get_float_array(&self, name: &str) -> Result<&[f32], RegistryError> {
        self.float_arrays
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| self.miss(name, RegistryKind::FloatArray))
    }

    /// Mutable access to the float array stored under `name`
    pub fn float_array_mut(&mut self, name: &str) -> Result<&mut Vec<f32>, RegistryError> {
        if self.float_arrays.contains_key(name) {
            Ok(self.float_arrays.get_mut(name).unwrap())
        } else {
            Err(self.miss(name, RegistryKind::FloatArray))
        }
    }

    /// Store a registered mesh under `name`, replacing any previous value
    pub fn put_vertex_mesh(&mut self, name: impl Into<String>, value: VertexMesh) {
        self.meshes.insert(name.into(), value);
    }

    /// Look up the registered mesh stored under `name`
    pub fn get_vertex_mesh(&self, name: &str) -> Result<&VertexMesh, RegistryError> {
        self.meshes
            .get(name)
            .ok_or_else(|| self.miss(name, RegistryKind::VertexMesh))
    }

    /// Build the error for a failed lookup of `name` as `expected`
    fn miss(&self, name: &str, expected: RegistryKind) -> RegistryError {
        let actual = [
            (RegistryKind::Matrix, self.matrices.contains_key(name)),
            (RegistryKind::Vector, self.vectors.contains_key(name)),
            (RegistryKind::FloatArray, self.float_arrays.contains_key(name)),
            (RegistryKind::VertexMesh, self.meshes.contains_key(name)),
        ]
        .into_iter()
        .find_map(|(kind, present)| (present && kind != expected).then_some(kind));

        match actual {
            Some(actual) => RegistryError::WrongKind {
                name: name.to_string(),
                expected,
                actual,
            },
            None => RegistryError::NotFound {
                name: name.to_string(),
                kind: expected,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_returns_last_stored_value() {
        let mut registry = SceneRegistry::new();
        let mut first = Matrix::identity();
        first.make_translation(&Vector::new(1.0, 0.0, 0.0));
        let mut second = Matrix::identity();
        second.make_translation(&Vector::new(2.0, 0.0, 0.0));

        registry.put_matrix("model", first.clone());
        assert_eq!(registry.get_matrix("model").unwrap(), &first);

        // Overwrite replaces, never merges.
        registry.put_matrix("model", second.clone());
        assert_eq!(registry.get_matrix("model").unwrap(), &second);
    }

    #[test]
    fn test_vector_and_float_array_round_trip() {
        let mut registry = SceneRegistry::new();
        registry.put_vector("camera-eye", Vector::new(0.0, 0.0, 1.5));
        registry.put_float_array("blue", vec![0.0, 0.0, 1.0, 1.0]);

        assert_eq!(
            registry.get_vector("camera-eye").unwrap().to_array(),
            [0.0, 0.0, 1.5]
        );
        assert_eq!(
            registry.get_float_array("blue").unwrap(),
            &[0.0, 0.0, 1.0, 1.0]
        );
    }

    #[test]
    fn test_absent_name_is_not_found() {
        let registry = SceneRegistry::new();
        let err = registry.get_matrix("missing").unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { .. }));
    }

    #[test]
    fn test_name_of_other_kind_is_wrong_kind() {
        let mut registry = SceneRegistry::new();
        registry.put_vector("rotation", Vector::y_axis());

        let err = registry.get_matrix("rotation").unwrap_err();
        match err {
            RegistryError::WrongKind {
                expected, actual, ..
            } => {
                assert_eq!(expected, RegistryKind::Matrix);
                assert_eq!(actual, RegistryKind::Vector);
            }
            other => panic!("expected WrongKind, got {other:?}"),
        }
    }

    #[test]
    fn test_matrix_mut_allows_in_place_rewrite() {
        let mut registry = SceneRegistry::new();
        registry.put_matrix("rotation", Matrix::identity());

        registry
            .matrix_mut("rotation")
            .unwrap()
            .make_rotation_axis(0.5, &Vector::y_axis());

        let mut expected = Matrix::identity();
        expected.make_rotation_axis(0.5, &Vector::y_axis());
        assert_eq!(registry.get_matrix("rotation").unwrap(), &expected);
    }

    #[test]
    fn test_stored_values_do_not_alias() {
        let mut registry = SceneRegistry::new();
        let mut original = Matrix::identity();
        registry.put_matrix("model", original.clone());

        // Mutating the caller's copy leaves the stored value untouched.
        original.make_translation(&Vector::new(9.0, 9.0, 9.0));
        assert_eq!(registry.get_matrix("model").unwrap(), &Matrix::identity());
    }
}
