//! Position, rotation and scale in 3D space.
//!
//! [`Transform`] keeps its three components separately and composes them into
//! a model matrix on demand. The composed matrix is cached until the next
//! mutation, so reading [`Transform::matrix`] every frame for a static object
//! costs a copy rather than two matrix products.
//!
//! ```
//! use glpp::{Transform, Vec3, Mat4};
//!
//! let mut t = Transform::new();
//! t.move_by(Vec3::new(1.0, 0.0, 0.0));
//! assert_eq!(t.matrix(), Mat4::from_translation(Vec3::X));
//! ```

use std::cell::Cell;

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

/// A 3D transformation made of a translation, a rotation and a per-axis scale.
///
/// # Transformation Order
///
/// The matrix is always `translation * rotation * scale`. Applied to a point
/// that means the point is scaled about the local origin first, then rotated,
/// then translated to its world position.
///
/// # Rotation Order
///
/// [`Transform::rotate`] pre-multiplies: the delta is applied in world space
/// after the existing rotation (`rotation = delta * rotation`).
#[derive(Clone, Debug)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    // None until the next read after a mutation.
    matrix: Cell<Option<Mat4>>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_components(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }
}

impl From<Mat4> for Transform {
    fn from(matrix: Mat4) -> Self {
        Self::from_matrix(matrix)
    }
}

impl Transform {
    /// Creates an identity transform (origin, no rotation, unit scale).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transform from explicit components.
    pub fn from_components(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            matrix: Cell::new(None),
        }
    }

    /// Creates a transform positioned at `position` with no rotation or scaling.
    pub fn from_position(position: Vec3) -> Self {
        Self::from_components(position, Quat::IDENTITY, Vec3::ONE)
    }

    /// Decomposes an arbitrary matrix into translation, rotation and scale.
    ///
    /// Skew and perspective terms cannot be represented and are dropped, so
    /// [`Transform::matrix`] only reproduces `matrix` when it had none.
    ///
    /// The matrix is first divided by its homogeneous `w` term. The basis
    /// columns are then orthogonalized (Gram-Schmidt), which removes shear
    /// and keeps the rotation a unit quaternion. A mirrored basis (negative
    /// determinant) is reported as negative scale on all three axes.
    pub fn from_matrix(matrix: Mat4) -> Self {
        let w = matrix.w_axis.w;
        let matrix = if w != 0.0 && w != 1.0 { matrix / w } else { matrix };

        let position = matrix.w_axis.truncate();

        let x = matrix.x_axis.truncate();
        let mut scale = Vec3::ZERO;
        scale.x = x.length();
        let mut x = x.normalize_or_zero();

        let y = matrix.y_axis.truncate();
        let y = y - x * x.dot(y);
        scale.y = y.length();
        let mut y = y.normalize_or_zero();

        let z = matrix.z_axis.truncate();
        let z = z - x * x.dot(z);
        let z = z - y * y.dot(z);
        scale.z = z.length();
        let mut z = z.normalize_or_zero();

        if x.dot(y.cross(z)) < 0.0 {
            scale = -scale;
            x = -x;
            y = -y;
            z = -z;
        }

        let rotation = Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize();
        Self::from_components(position, rotation, scale)
    }

    /// Adds `delta` to the position.
    pub fn move_by(&mut self, delta: Vec3) {
        self.position += delta;
        self.invalidate();
    }

    /// Rotates by per-axis Euler angles in radians.
    ///
    /// The angles are combined as `Rz * Ry * Rx` (x is applied first) before
    /// being passed to [`Transform::rotate`].
    pub fn rotate_euler(&mut self, delta: Vec3) {
        self.rotate(Quat::from_euler(EulerRot::ZYX, delta.z, delta.y, delta.x));
    }

    /// Applies `delta` on top of the current rotation.
    pub fn rotate(&mut self, delta: Quat) {
        // delta goes on the left: it is applied after the existing rotation
        self.rotation = delta * self.rotation;
        self.invalidate();
    }

    /// Multiplies the scale component-wise by `factor`.
    pub fn scale_by(&mut self, factor: Vec3) {
        self.scale *= factor;
        self.invalidate();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.invalidate();
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.invalidate();
    }

    /// Returns the rotation as Euler angles `(x, y, z)` in radians.
    ///
    /// This is the inverse of the convention used by [`Transform::rotate_euler`]
    /// and is computed from the quaternion on every call.
    pub fn rotation_euler(&self) -> Vec3 {
        let (z, y, x) = self.rotation.to_euler(EulerRot::ZYX);
        Vec3::new(x, y, z)
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.invalidate();
    }

    /// Returns the model matrix, recomposing it only if a component changed
    /// since the last call.
    pub fn matrix(&self) -> Mat4 {
        if let Some(matrix) = self.matrix.get() {
            return matrix;
        }

        let matrix = Mat4::from_translation(self.position)
            * Mat4::from_quat(self.rotation)
            * Mat4::from_scale(self.scale);
        self.matrix.set(Some(matrix));
        matrix
    }

    fn invalidate(&mut self) {
        self.matrix.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn components() -> (Vec3, Quat, Vec3) {
        let rotation = Quat::from_euler(EulerRot::ZYX, 0.6, -0.4, 1.1);
        (Vec3::new(1.0, 2.0, 3.0), rotation, Vec3::new(7.0, 8.0, 9.0))
    }

    // q and -q describe the same rotation; decomposition may return either.
    fn same_rotation(a: Quat, b: Quat) -> bool {
        a.dot(b).abs() > 1.0 - EPS
    }

    #[test]
    fn default_is_identity() {
        let t = Transform::new();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.rotation(), Quat::IDENTITY);
        assert_eq!(t.scale(), Vec3::ONE);
        assert!(t.rotation_euler().abs_diff_eq(Vec3::ZERO, EPS));
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn components_are_kept() {
        let (p, r, s) = components();
        let t = Transform::from_components(p, r, s);
        assert_eq!(t.position(), p);
        assert_eq!(t.rotation(), r);
        assert_eq!(t.scale(), s);
    }

    #[test]
    fn matrix_is_translate_rotate_scale() {
        let (p, r, s) = components();
        let t = Transform::from_components(p, r, s);
        let expected = Mat4::from_translation(p) * Mat4::from_quat(r) * Mat4::from_scale(s);
        assert!(t.matrix().abs_diff_eq(expected, EPS));

        // scale first, then rotate, then translate
        let point = Vec3::new(0.5, -1.0, 2.0);
        let by_hand = p + r * (s * point);
        assert!(t.matrix().transform_point3(point).abs_diff_eq(by_hand, 1e-4));
    }

    #[test]
    fn decomposes_matrix() {
        let (p, r, s) = components();
        let matrix = Mat4::from_translation(p) * Mat4::from_quat(r) * Mat4::from_scale(s);

        let t = Transform::from_matrix(matrix);
        assert!(t.position().abs_diff_eq(p, EPS));
        assert!(same_rotation(t.rotation(), r));
        assert!(t.scale().abs_diff_eq(s, 1e-4));
        assert!(t.matrix().abs_diff_eq(matrix, 1e-4));
    }

    #[test]
    fn round_trips_through_matrix() {
        let (p, r, s) = components();
        let t1 = Transform::from_components(p, r, s);
        let t2 = Transform::from(t1.matrix());

        assert!(t2.position().abs_diff_eq(p, EPS));
        assert!(same_rotation(t2.rotation(), r));
        assert!(t2.scale().abs_diff_eq(s, 1e-4));
        assert!(t2.matrix().abs_diff_eq(t1.matrix(), 1e-4));
    }

    #[test]
    fn decomposition_drops_perspective() {
        let (p, r, s) = components();
        let mut matrix = Mat4::from_translation(p) * Mat4::from_quat(r) * Mat4::from_scale(s);
        matrix.x_axis.w = 0.25;
        matrix.w_axis.w = 1.0;

        let t = Transform::from_matrix(matrix);
        assert!(t.position().abs_diff_eq(p, EPS));
        assert_eq!(t.matrix().row(3), glam::Vec4::W);
    }

    #[test]
    fn decomposition_removes_shear() {
        let p = Vec3::new(1.0, -2.0, 3.0);
        let r = Quat::from_rotation_y(0.7);
        let mut shear = Mat4::IDENTITY;
        shear.y_axis.x = 0.8;
        let matrix = Mat4::from_translation(p)
            * Mat4::from_quat(r)
            * Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0))
            * shear;

        let t = Transform::from_matrix(matrix);
        assert!(t.rotation().is_normalized());
        assert!(same_rotation(t.rotation(), r));
        assert!(t.scale().abs_diff_eq(Vec3::new(2.0, 3.0, 4.0), 1e-4));
        assert!(t.position().abs_diff_eq(p, EPS));
    }

    #[test]
    fn decomposition_divides_by_w() {
        let (p, r, s) = components();
        let matrix = Mat4::from_translation(p) * Mat4::from_quat(r) * Mat4::from_scale(s);

        let t = Transform::from_matrix(matrix * 2.0);
        assert!(t.position().abs_diff_eq(p, EPS));
        assert!(same_rotation(t.rotation(), r));
        assert!(t.scale().abs_diff_eq(s, 1e-4));
    }

    #[test]
    fn mirrored_matrix_round_trips() {
        let (p, r, _) = components();
        let matrix = Mat4::from_translation(p)
            * Mat4::from_quat(r)
            * Mat4::from_scale(Vec3::new(-2.0, 3.0, 4.0));

        let t = Transform::from_matrix(matrix);
        assert!(t.rotation().is_normalized());
        assert!(t.scale().abs_diff_eq(Vec3::new(-2.0, -3.0, -4.0), 1e-4));
        assert!(t.matrix().abs_diff_eq(matrix, 1e-4));
    }

    #[test]
    fn move_is_pure_translation() {
        let mut t = Transform::new();
        t.move_by(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(t.matrix(), Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)));

        t.move_by(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn rotate_pre_multiplies() {
        let q0 = Quat::from_rotation_x(0.7);
        let qd = Quat::from_rotation_y(1.2);
        let mut t = Transform::from_components(Vec3::ZERO, q0, Vec3::ONE);
        t.rotate(qd);

        assert!(t.rotation().abs_diff_eq(qd * q0, EPS));
        assert!(!t.rotation().abs_diff_eq(q0 * qd, 1e-3));
    }

    #[test]
    fn rotate_euler_round_trips() {
        let angles = Vec3::new(0.3, -0.5, 1.2);
        let mut t = Transform::new();
        t.rotate_euler(angles);

        assert!(t.rotation_euler().abs_diff_eq(angles, EPS));

        let expected = Quat::from_rotation_z(angles.z)
            * Quat::from_rotation_y(angles.y)
            * Quat::from_rotation_x(angles.x);
        assert!(t.rotation().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn scale_accumulates() {
        let mut t = Transform::from_components(Vec3::ZERO, Quat::IDENTITY, Vec3::new(2.0, 3.0, 4.0));
        t.scale_by(Vec3::new(0.5, 2.0, 1.0));
        assert_eq!(t.scale(), Vec3::new(1.0, 6.0, 4.0));
    }

    #[test]
    fn zero_scale_collapses() {
        let mut t = Transform::new();
        t.scale_by(Vec3::ZERO);
        assert_eq!(t.matrix().transform_point3(Vec3::ONE), Vec3::ZERO);
    }

    #[test]
    fn cached_matrix_is_stable() {
        let (p, r, s) = components();
        let t = Transform::from_components(p, r, s);
        let first = t.matrix();
        let second = t.matrix();
        assert_eq!(first.to_cols_array(), second.to_cols_array());
    }

    #[test]
    fn setters_invalidate_cache() {
        let mut t = Transform::new();
        assert_eq!(t.matrix(), Mat4::IDENTITY);

        t.set_position(Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(t.matrix(), Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)));

        t.set_position(Vec3::ZERO);
        t.set_scale(Vec3::splat(2.0));
        assert_eq!(t.matrix(), Mat4::from_scale(Vec3::splat(2.0)));

        t.set_scale(Vec3::ONE);
        t.set_rotation(Quat::from_rotation_z(0.5));
        assert!(t.matrix().abs_diff_eq(Mat4::from_rotation_z(0.5), EPS));
    }
}
