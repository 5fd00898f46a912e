use std::collections::HashSet;

use glam::Vec2;
use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keyboard and mouse state gathered from winit events.
///
/// Feed it every window (and optionally device) event, read it while
/// updating, and call [`Input::begin_frame`] before the next batch of events.
#[derive(Clone, Debug, Default)]
pub struct Input {
    keys_down: HashSet<KeyCode>,
    cursor: Option<Vec2>,
    cursor_delta: Vec2,
    motion_delta: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the per-frame mouse deltas. Held keys are kept.
    pub fn begin_frame(&mut self) {
        self.cursor_delta = Vec2::ZERO;
        self.motion_delta = Vec2::ZERO;
    }

    /// Process a window event.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.set_key(key, event.state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::Focused(false) => {
                // key releases are not delivered to unfocused windows
                self.keys_down.clear();
            }
            _ => {}
        }
    }

    /// Process a device event. Only raw mouse motion is used; it keeps
    /// arriving when the cursor is grabbed and hidden.
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.motion_delta += Vec2::new(*dx as f32, *dy as f32);
        }
    }

    /// Marks `key` as held or released.
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Moves the cursor to `position` in window pixels. The first position
    /// after the cursor enters the window produces no delta.
    pub fn move_cursor(&mut self, position: Vec2) {
        if let Some(last) = self.cursor {
            self.cursor_delta += position - last;
        }
        self.cursor = Some(position);
    }

    /// Returns true if the key is currently held down.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// 1.0 if the key is held, 0.0 otherwise.
    pub fn key_axis(&self, key: KeyCode) -> f32 {
        if self.key_down(key) { 1.0 } else { 0.0 }
    }

    /// Last known cursor position in window pixels.
    pub fn cursor_position(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Cursor movement this frame, in window pixels.
    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    /// Raw mouse motion this frame, in device units.
    pub fn motion_delta(&self) -> Vec2 {
        self.motion_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_track_press_and_release() {
        let mut input = Input::new();
        input.set_key(KeyCode::KeyW, true);
        assert!(input.key_down(KeyCode::KeyW));
        assert_eq!(input.key_axis(KeyCode::KeyW), 1.0);

        input.begin_frame();
        assert!(input.key_down(KeyCode::KeyW));

        input.set_key(KeyCode::KeyW, false);
        assert!(!input.key_down(KeyCode::KeyW));
        assert_eq!(input.key_axis(KeyCode::KeyW), 0.0);
    }

    #[test]
    fn first_cursor_position_has_no_delta() {
        let mut input = Input::new();
        input.move_cursor(Vec2::new(300.0, 200.0));
        assert_eq!(input.cursor_delta(), Vec2::ZERO);

        input.move_cursor(Vec2::new(310.0, 195.0));
        input.move_cursor(Vec2::new(312.0, 190.0));
        assert_eq!(input.cursor_delta(), Vec2::new(12.0, -10.0));
        assert_eq!(input.cursor_position(), Some(Vec2::new(312.0, 190.0)));

        input.begin_frame();
        assert_eq!(input.cursor_delta(), Vec2::ZERO);
    }

    #[test]
    fn raw_motion_accumulates() {
        let mut input = Input::new();
        input.handle_device_event(&DeviceEvent::MouseMotion { delta: (1.5, -2.0) });
        input.handle_device_event(&DeviceEvent::MouseMotion { delta: (0.5, 1.0) });
        assert_eq!(input.motion_delta(), Vec2::new(2.0, -1.0));
        assert_eq!(input.cursor_delta(), Vec2::ZERO);
    }

    #[test]
    fn losing_focus_releases_keys() {
        let mut input = Input::new();
        input.set_key(KeyCode::KeyA, true);
        input.handle_window_event(&WindowEvent::Focused(false));
        assert!(!input.key_down(KeyCode::KeyA));
    }
}
