//! Frame-coherent pointer state with drag tracking.
//!
//! [`MouseState`] accumulates winit pointer events between frames. A drag
//! starts when a button goes down, accumulates cursor motion while it is held,
//! and ends on release. Wheel input is normalised to lines.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Roughly how many pixels a trackpad reports per wheel line.
const PIXELS_PER_LINE: f64 = 40.0;

/// Per-button press/release tracking for a single frame.
#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    pressed: bool,
    just_pressed: bool,
    just_released: bool,
    /// Cursor motion made while held this frame.
    drag: Vec2,
}

fn button_index(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back | MouseButton::Forward | MouseButton::Other(_) => 3,
    }
}

/// Frame-coherent pointer state.
///
/// Forward events through the `on_*` methods, read the accessors once per
/// frame, then call [`clear_transients`](Self::clear_transients).
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Option<Vec2>,
    delta: Vec2,
    buttons: [ButtonFrame; 4],
    scroll: f32,
    cursor_in_window: bool,
}

impl MouseState {
    /// Creates a new `MouseState` with no buttons held and no known position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event.
    ///
    /// The first position after entering has no predecessor and produces no
    /// delta, so a drag never jumps.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if let Some(prev) = self.position {
            let step = new_pos - prev;
            self.delta += step;
            for b in self.buttons.iter_mut().filter(|b| b.pressed) {
                b.drag += step;
            }
        }
        self.position = Some(new_pos);
    }

    /// Process a `MouseInput` event.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let b = &mut self.buttons[button_index(button)];
        match state {
            ElementState::Pressed => {
                b.just_pressed = !b.pressed;
                b.pressed = true;
            }
            ElementState::Released => {
                b.just_released = b.pressed;
                b.pressed = false;
            }
        }
    }

    /// Process a `MouseWheel` event. Positive values scroll up / away from the user.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(_x, y) => {
                self.scroll += y;
            }
            MouseScrollDelta::PixelDelta(pos) => {
                self.scroll += (pos.y / PIXELS_PER_LINE) as f32;
            }
        }
    }

    /// Process a `CursorEntered` event.
    pub fn on_cursor_entered(&mut self) {
        self.cursor_in_window = true;
    }

    /// Process a `CursorLeft` event. Held buttons are released so a drag
    /// cannot stay latched outside the canvas.
    pub fn on_cursor_left(&mut self) {
        self.cursor_in_window = false;
        self.position = None;
        for b in &mut self.buttons {
            if b.pressed {
                b.pressed = false;
                b.just_released = true;
            }
        }
    }

    /// Reset the per-frame delta, scroll, and edge flags. Held buttons stay held.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
        for b in &mut self.buttons {
            b.just_pressed = false;
            b.just_released = false;
            b.drag = Vec2::ZERO;
        }
    }

    /// Last known cursor position.
    #[must_use]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Movement accumulated since the last clear.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Movement made this frame while `button` was held. Motion before a
    /// press or after a release in the same frame is excluded.
    #[must_use]
    pub fn drag_delta(&self, button: MouseButton) -> Vec2 {
        self.buttons[button_index(button)].drag
    }

    /// Whether a button is currently held.
    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button_index(button)].pressed
    }

    /// Whether a button went down this frame.
    #[must_use]
    pub fn just_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button_index(button)].just_pressed
    }

    /// Whether a button went up this frame.
    #[must_use]
    pub fn just_button_released(&self, button: MouseButton) -> bool {
        self.buttons[button_index(button)].just_released
    }

    /// Wheel lines accumulated this frame (positive = scroll up).
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Whether the cursor is inside the canvas.
    #[must_use]
    pub fn is_cursor_in_window(&self) -> bool {
        self.cursor_in_window
    }
}
