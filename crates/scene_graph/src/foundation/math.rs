//! Math utilities and types
//!
//! Provides the value types used throughout the scene graph: 3-component
//! vectors and 4x4 column-major matrices backed by nalgebra. Mutating
//! operations return `&mut Self` so matrices can be rebuilt fluently from
//! animation hooks.

use nalgebra::{Matrix4, Point3, Unit, Vector3};

/// 3D vector value type
///
/// A thin wrapper over [`nalgebra::Vector3`] exposing the in-place mutation
/// style the scene registries expect. Values are independent: storing a
/// vector in a registry copies it, so no two registry slots alias the same
/// instance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector(Vector3<f32>);

impl Vector {
    /// Create a vector from components
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// The canonical X axis (1, 0, 0)
    pub fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// The canonical Y axis (0, 1, 0)
    pub fn y_axis() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    /// The canonical Z axis (0, 0, 1)
    pub fn z_axis() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Set all three components, returning `&mut self` for chaining
    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.0 = Vector3::new(x, y, z);
        self
    }

    /// X component
    pub fn x(&self) -> f32 {
        self.0.x
    }

    /// Y component
    pub fn y(&self) -> f32 {
        self.0.y
    }

    /// Z component
    pub fn z(&self) -> f32 {
        self.0.z
    }

    /// Dot product with another vector
    pub fn dot(&self, other: &Self) -> f32 {
        self.0.dot(&other.0)
    }

    /// Cross product with another vector
    pub fn cross(&self, other: &Self) -> Self {
        Self(self.0.cross(&other.0))
    }

    /// Vector magnitude
    pub fn magnitude(&self) -> f32 {
        self.0.magnitude()
    }

    /// Return a unit-length copy of this vector
    pub fn normalized(&self) -> Self {
        Self(self.0.normalize())
    }

    /// Components as a flat array
    pub fn to_array(&self) -> [f32; 3] {
        [self.0.x, self.0.y, self.0.z]
    }

    fn inner(&self) -> &Vector3<f32> {
        &self.0
    }
}

/// 4x4 column-major matrix value type
///
/// Wraps [`nalgebra::Matrix4`] with the `make_*` rebuild operations the
/// animation and camera code uses. Each mutating operation overwrites the
/// whole matrix and returns `&mut Self` for fluent construction:
///
/// ```
/// use scene_graph::foundation::math::{Matrix, Vector};
///
/// let mut rotation = Matrix::identity();
/// rotation.make_rotation_axis(0.5, &Vector::y_axis());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix(Matrix4<f32>);

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// Create an identity matrix
    pub fn identity() -> Self {
        Self(Matrix4::identity())
    }

    /// Reset to the identity matrix
    pub fn make_identity(&mut self) -> &mut Self {
        self.0 = Matrix4::identity();
        self
    }

    /// Rebuild as a rotation of `angle` radians about `axis`
    ///
    /// The axis is normalized internally and must be non-zero.
    pub fn make_rotation_axis(&mut self, angle: f32, axis: &Vector) -> &mut Self {
        self.0 = Matrix4::from_axis_angle(&Unit::new_normalize(*axis.inner()), angle);
        self
    }

    /// Rebuild as a translation by `offset`
    pub fn make_translation(&mut self, offset: &Vector) -> &mut Self {
        self.0 = Matrix4::new_translation(offset.inner());
        self
    }

    /// Rebuild as a non-uniform scale by `factors`
    pub fn make_scale(&mut self, factors: &Vector) -> &mut Self {
        self.0 = Matrix4::new_nonuniform_scaling(factors.inner());
        self
    }

    /// Rebuild as the product `a * b`
    pub fn multiply(&mut self, a: &Self, b: &Self) -> &mut Self {
        self.0 = a.0 * b.0;
        self
    }

    /// Rebuild as a right-handed look-at view matrix
    ///
    /// Standard construction: forward = normalize(center - eye),
    /// right = normalize(forward x up), true-up = right x forward. Under an
    /// identity rotation the translation column is the negated eye position.
    pub fn make_look_at(&mut self, eye: &Vector, center: &Vector, up: &Vector) -> &mut Self {
        let forward = (center.inner() - eye.inner()).normalize();
        let right = forward.cross(up.inner()).normalize();
        let true_up = right.cross(&forward);

        self.0 = Matrix4::new(
            right.x, right.y, right.z, -right.dot(eye.inner()),
            true_up.x, true_up.y, true_up.z, -true_up.dot(eye.inner()),
            -forward.x, -forward.y, -forward.z, forward.dot(eye.inner()),
            0.0, 0.0, 0.0, 1.0,
        );
        self
    }

    /// Rebuild as a perspective frustum projection
    ///
    /// OpenGL-convention frustum bounds: depth maps to [-1, 1] and the
    /// camera looks down -Z.
    pub fn make_frustum(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> &mut Self {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;

        self.0 = Matrix4::new(
            2.0 * near / width, 0.0, (right + left) / width, 0.0,
            0.0, 2.0 * near / height, (top + bottom) / height, 0.0,
            0.0, 0.0, -(far + near) / depth, -2.0 * far * near / depth,
            0.0, 0.0, -1.0, 0.0,
        );
        self
    }

    /// Transform a point (homogeneous w = 1, with perspective divide)
    pub fn transform_point(&self, point: &Vector) -> Vector {
        let p = self.0.transform_point(&Point3::from(*point.inner()));
        Vector::new(p.x, p.y, p.z)
    }

    /// Export as a column-major float array for uniform upload
    pub fn to_cols_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        out.copy_from_slice(self.0.as_slice());
        out
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vector_set_chaining() {
        let mut v = Vector::default();
        v.set(1.0, 2.0, 3.0);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_vector_cross_follows_right_hand_rule() {
        let x = Vector::x_axis();
        let y = Vector::y_axis();
        let z = x.cross(&y);
        assert_relative_eq!(z.x(), 0.0);
        assert_relative_eq!(z.y(), 0.0);
        assert_relative_eq!(z.z(), 1.0);
    }

    #[test]
    fn test_matrix_default_is_identity() {
        let m = Matrix::default();
        let p = m.transform_point(&Vector::new(1.0, 2.0, 3.0));
        assert_eq!(p.to_array(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_rotation_about_y_quarter_turn() {
        let mut m = Matrix::identity();
        m.make_rotation_axis(constants::HALF_PI, &Vector::y_axis());
        let p = m.transform_point(&Vector::x_axis());
        assert_relative_eq!(p.x(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z(), -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotations_compose_additively() {
        let mut a = Matrix::identity();
        let mut b = Matrix::identity();
        let mut product = Matrix::identity();
        let mut combined = Matrix::identity();

        a.make_rotation_axis(0.3, &Vector::y_axis());
        b.make_rotation_axis(0.7, &Vector::y_axis());
        product.multiply(&a, &b);
        combined.make_rotation_axis(1.0, &Vector::y_axis());

        let p1 = product.transform_point(&Vector::x_axis());
        let p2 = combined.transform_point(&Vector::x_axis());
        assert_relative_eq!(p1.x(), p2.x(), epsilon = 1e-6);
        assert_relative_eq!(p1.z(), p2.z(), epsilon = 1e-6);
    }

    #[test]
    fn test_look_at_maps_eye_to_origin() {
        let mut view = Matrix::identity();
        view.make_look_at(
            &Vector::new(0.0, 0.0, 1.5),
            &Vector::new(0.0, 0.0, 0.0),
            &Vector::y_axis(),
        );

        // Under identity rotation the translation column is the negated eye.
        let cols = view.to_cols_array();
        assert_relative_eq!(cols[12], 0.0, epsilon = 1e-6);
        assert_relative_eq!(cols[13], 0.0, epsilon = 1e-6);
        assert_relative_eq!(cols[14], -1.5, epsilon = 1e-6);

        let eye_in_camera = view.transform_point(&Vector::new(0.0, 0.0, 1.5));
        assert_relative_eq!(eye_in_camera.magnitude(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_frustum_near_plane_maps_to_front_of_clip_volume() {
        let mut projection = Matrix::identity();
        projection.make_frustum(-1.0, 1.0, -1.0, 1.0, 0.5, 2.5);

        // A point on the near plane lands on the front of the NDC cube.
        let p = projection.transform_point(&Vector::new(0.0, 0.0, -0.5));
        assert_relative_eq!(p.z(), -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_translation_moves_points() {
        let mut m = Matrix::identity();
        m.make_translation(&Vector::new(1.0, -2.0, 3.0));
        let p = m.transform_point(&Vector::new(0.0, 0.0, 0.0));
        assert_eq!(p.to_array(), [1.0, -2.0, 3.0]);
    }
}
