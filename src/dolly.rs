//! Keyboard and mouse control for a [`Camera`].
//!
//! # Controls
//!
//! - **Mouse**: look (pitch from vertical motion, yaw from horizontal)
//! - **W/S**: forward/backward
//! - **A/D**: strafe left/right
//! - **Q/E**: down/up
//! - **Left Control**: faster
//! - **Left Shift**: slower
//!
//! # Example
//!
//! ```
//! use glpp::{Camera, DollyController, Input, KeyCode, UVec2, Vec3};
//!
//! let mut camera = Camera::new(UVec2::new(640, 480));
//! let controller = DollyController::default();
//! let mut input = Input::new();
//!
//! input.set_key(KeyCode::KeyD, true);
//! controller.update(&input, &mut camera);
//! assert!(camera.position().x > 0.0);
//! ```

use glam::{Vec2, Vec3};
use winit::keyboard::KeyCode;

use crate::camera::Camera;
use crate::input::Input;

/// Tuning for [`DollyController`].
#[derive(Clone, Debug, PartialEq)]
pub struct DollyConfig {
    /// Radians of rotation per pixel (or raw motion unit) of mouse movement.
    pub look_sensitivity: f32,
    /// Distance moved per update while a movement key is held.
    pub move_step: f32,
    /// Added to `move_step` while Left Control is held.
    pub boost: f32,
    /// Subtracted from `move_step` while Left Shift is held.
    pub slow: f32,
    /// Read raw device motion instead of cursor movement. Use this when the
    /// cursor is grabbed.
    pub raw_motion: bool,
}

impl Default for DollyConfig {
    fn default() -> Self {
        Self {
            look_sensitivity: 0.01,
            move_step: 0.1,
            boost: 0.05,
            slow: 0.05,
            raw_motion: false,
        }
    }
}

/// Turns [`Input`] state into [`Camera::rotate_dolly`] and
/// [`Camera::move_dolly`] calls, once per frame.
#[derive(Clone, Debug, Default)]
pub struct DollyController {
    pub config: DollyConfig,
}

impl DollyController {
    pub fn new(config: DollyConfig) -> Self {
        Self { config }
    }

    /// Applies this frame's mouse and keyboard input to `camera`.
    pub fn update(&self, input: &Input, camera: &mut Camera) {
        let look = if self.config.raw_motion {
            input.motion_delta()
        } else {
            input.cursor_delta()
        };
        if look != Vec2::ZERO {
            camera.rotate_dolly(self.look_delta(look));
        }

        let movement = self.move_delta(input);
        if movement != Vec3::ZERO {
            camera.move_dolly(movement);
        }
    }

    /// Mouse `(dx, dy)` becomes a pitch change from `dy` and a yaw change
    /// from `dx`.
    pub fn look_delta(&self, mouse: Vec2) -> Vec3 {
        let s = self.config.look_sensitivity;
        Vec3::new(mouse.y * s, mouse.x * s, 0.0)
    }

    /// Camera-local movement for the keys currently held.
    pub fn move_delta(&self, input: &Input) -> Vec3 {
        let axis = |negative: KeyCode, positive: KeyCode| {
            input.key_axis(positive) - input.key_axis(negative)
        };

        let direction = Vec3::new(
            axis(KeyCode::KeyA, KeyCode::KeyD),
            axis(KeyCode::KeyQ, KeyCode::KeyE),
            axis(KeyCode::KeyW, KeyCode::KeyS),
        );

        let mut step = self.config.move_step;
        if input.key_down(KeyCode::ControlLeft) {
            step += self.config.boost;
        }
        if input.key_down(KeyCode::ShiftLeft) {
            step -= self.config.slow;
        }

        direction * step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::UVec2;

    const EPS: f32 = 1e-6;

    fn camera() -> Camera {
        Camera::new(UVec2::new(640, 480))
    }

    #[test]
    fn idle_input_leaves_camera_alone() {
        let mut cam = camera();
        DollyController::default().update(&Input::new(), &mut cam);
        assert_eq!(cam.position(), Vec3::ZERO);
        assert_eq!(cam.rotation(), Vec3::ZERO);
    }

    #[test]
    fn mouse_maps_to_pitch_and_yaw() {
        let controller = DollyController::default();
        let delta = controller.look_delta(Vec2::new(10.0, -5.0));
        assert!(delta.abs_diff_eq(Vec3::new(-0.05, 0.1, 0.0), EPS));
    }

    #[test]
    fn cursor_motion_rotates_camera() {
        let mut input = Input::new();
        input.move_cursor(Vec2::new(100.0, 100.0));
        input.move_cursor(Vec2::new(120.0, 100.0));

        let mut cam = camera();
        DollyController::default().update(&input, &mut cam);
        assert!(cam.rotation().abs_diff_eq(Vec3::new(0.0, 0.2, 0.0), EPS));
    }

    #[test]
    fn raw_motion_when_configured() {
        let mut input = Input::new();
        input.move_cursor(Vec2::new(0.0, 0.0));
        input.move_cursor(Vec2::new(50.0, 0.0));

        let controller = DollyController::new(DollyConfig {
            raw_motion: true,
            ..Default::default()
        });
        let mut cam = camera();
        controller.update(&input, &mut cam);
        assert_eq!(cam.rotation(), Vec3::ZERO);
    }

    #[test]
    fn keys_map_to_local_axes() {
        let controller = DollyController::default();
        let mut input = Input::new();

        input.set_key(KeyCode::KeyW, true);
        assert!(controller.move_delta(&input).abs_diff_eq(Vec3::new(0.0, 0.0, -0.1), EPS));

        input.set_key(KeyCode::KeyD, true);
        input.set_key(KeyCode::KeyE, true);
        assert!(controller.move_delta(&input).abs_diff_eq(Vec3::new(0.1, 0.1, -0.1), EPS));

        // opposite keys cancel
        input.set_key(KeyCode::KeyS, true);
        input.set_key(KeyCode::KeyA, true);
        input.set_key(KeyCode::KeyQ, true);
        assert_eq!(controller.move_delta(&input), Vec3::ZERO);
    }

    #[test]
    fn modifiers_change_step() {
        let controller = DollyController::default();
        let mut input = Input::new();
        input.set_key(KeyCode::KeyD, true);

        input.set_key(KeyCode::ControlLeft, true);
        assert!((controller.move_delta(&input).x - 0.15).abs() < EPS);

        input.set_key(KeyCode::ControlLeft, false);
        input.set_key(KeyCode::ShiftLeft, true);
        assert!((controller.move_delta(&input).x - 0.05).abs() < EPS);
    }

    #[test]
    fn forward_follows_yaw() {
        let mut cam = camera();
        cam.set_rotation(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));

        let mut input = Input::new();
        input.set_key(KeyCode::KeyW, true);
        DollyController::default().update(&input, &mut cam);

        // local -z with yaw 90° is world +x
        assert!(cam.position().abs_diff_eq(Vec3::new(0.1, 0.0, 0.0), EPS));
    }
}
