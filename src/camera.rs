//! First-person camera producing view and projection matrices.
//!
//! [`Camera`] keeps a position and an Euler rotation where only pitch (`x`)
//! and yaw (`y`) take part in the view. It is moved with the dolly helpers:
//! translation happens in the camera's yaw-rotated frame so that moving
//! forward stays on the horizontal plane no matter where the camera looks.
//!
//! # Example
//!
//! ```
//! use glpp::{Camera, ProjectionMode, UVec2, Vec3};
//!
//! let mut camera = Camera::new(UVec2::new(800, 600))
//!     .with_projection(ProjectionMode::Perspective)
//!     .with_fov(90.0)
//!     .with_position(Vec3::new(0.0, 1.8, 0.0));
//!
//! // Look right a little, then step forward
//! camera.rotate_dolly(Vec3::new(0.0, 0.1, 0.0));
//! camera.move_dolly(Vec3::new(0.0, 0.0, -1.0));
//!
//! let mvp = camera.proj_matrix() * camera.view_matrix();
//! # let _ = mvp;
//! ```

use std::cell::Cell;

use glam::{Mat4, UVec2, Vec3};

/// Pitch limit in degrees, keeps the camera from flipping over the poles.
const PITCH_LIMIT_DEG: f32 = 89.0;

/// How [`Camera::proj_matrix`] projects the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectionMode {
    /// Perspective projection using the camera's field of view.
    #[default]
    Perspective,
    /// Pixel-space orthographic projection, origin in the top-left corner.
    Orthographic,
}

/// A dolly-style first person camera.
///
/// # Defaults
///
/// - `screen_size`: `(0, 0)`, set it before asking for a projection
/// - `projection`: [`ProjectionMode::Perspective`]
/// - `fov`: 70 degrees
/// - `position`, `rotation`: zero
/// - `near` / `far`: `0.1` / `100.0`
///
/// # Caching
///
/// The view matrix is cached and rebuilt on the next read after the position
/// or rotation changes. The projection is cheap and built on every call.
#[derive(Clone, Debug)]
pub struct Camera {
    screen_size: UVec2,
    projection: ProjectionMode,
    /// Degrees.
    fov: f32,
    position: Vec3,
    /// Pitch (x), yaw (y) and roll (z) in radians. Roll is never applied.
    rotation: Vec3,
    near: f32,
    far: f32,
    view: Cell<Option<Mat4>>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            screen_size: UVec2::ZERO,
            projection: ProjectionMode::Perspective,
            fov: 70.0,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            near: 0.1,
            far: 100.0,
            view: Cell::new(None),
        }
    }
}

impl Camera {
    /// Creates a camera for a screen of `screen_size` pixels with default settings.
    pub fn new(screen_size: UVec2) -> Self {
        Self {
            screen_size,
            ..Default::default()
        }
    }

    /// Set the projection mode.
    pub fn with_projection(mut self, projection: ProjectionMode) -> Self {
        self.projection = projection;
        self
    }

    /// Set the field of view in degrees.
    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees;
        self
    }

    /// Set the starting position.
    pub fn with_position(mut self, position: impl Into<Vec3>) -> Self {
        self.set_position(position.into());
        self
    }

    /// Set the starting Euler rotation (pitch, yaw, roll) in radians.
    ///
    /// The value is stored as given; the pitch clamp only applies to
    /// [`Camera::rotate_dolly`].
    pub fn with_rotation(mut self, rotation: impl Into<Vec3>) -> Self {
        self.set_rotation(rotation.into());
        self
    }

    /// Set near and far clipping planes.
    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn screen_size(&self) -> UVec2 {
        self.screen_size
    }

    /// Tell the camera the current screen size in pixels. Only the projection
    /// depends on it.
    pub fn set_screen_size(&mut self, screen_size: UVec2) {
        self.screen_size = screen_size;
    }

    /// Field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, fov_degrees: f32) {
        self.fov = fov_degrees;
    }

    pub fn projection(&self) -> ProjectionMode {
        self.projection
    }

    pub fn set_projection(&mut self, projection: ProjectionMode) {
        self.projection = projection;
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.view.set(None);
    }

    /// Euler rotation (pitch, yaw, roll) in radians.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.view.set(None);
    }

    /// Adds `delta.x` to pitch and `delta.y` to yaw, then clamps pitch to ±89°.
    ///
    /// `delta.z` (roll) is accepted and ignored.
    pub fn rotate_dolly(&mut self, delta: Vec3) {
        let limit = PITCH_LIMIT_DEG.to_radians();
        self.rotation.x += delta.x;
        self.rotation.y += delta.y;
        self.rotation.x = self.rotation.x.clamp(-limit, limit);
        self.view.set(None);
    }

    /// Moves by `delta` expressed in the camera's yaw-rotated frame.
    ///
    /// Pitch is left out so that forward and strafe motion stays horizontal.
    /// `delta.y` is applied to the world Y axis unchanged.
    pub fn move_dolly(&mut self, delta: Vec3) {
        let (sin, cos) = self.rotation.y.sin_cos();

        let dz = delta.x * sin + delta.z * cos;
        let dx = delta.x * cos - delta.z * sin;

        self.position += Vec3::new(dx, delta.y, dz);
        self.view.set(None);
    }

    /// Returns the view matrix `Rx(pitch) * Ry(yaw) * T(-position)`.
    pub fn view_matrix(&self) -> Mat4 {
        if let Some(view) = self.view.get() {
            return view;
        }

        let view = Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_translation(-self.position);
        self.view.set(Some(view));
        view
    }

    /// Returns the projection matrix for the current screen size.
    ///
    /// Perspective uses `fov`, the `width / height` aspect ratio and the clip
    /// planes. Orthographic maps `[0, width] x [height, 0]` so that pixel
    /// `(0, 0)` is the top-left corner, with a depth range of `[-1, 1]`.
    ///
    /// A zero screen height yields a non-finite aspect ratio; it is not
    /// checked here.
    pub fn proj_matrix(&self) -> Mat4 {
        let width = self.screen_size.x as f32;
        let height = self.screen_size.y as f32;

        match self.projection {
            ProjectionMode::Perspective => {
                Mat4::perspective_rh(self.fov.to_radians(), width / height, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0)
            }
        }
    }
}
