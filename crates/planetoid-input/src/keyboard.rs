//! Held-key tracking for continuous camera controls.
//!
//! [`KeyboardState`] records which physical keys are down and which changed
//! this frame. Camera controls are continuous, so the main query is
//! [`axis`](KeyboardState::axis), which folds two groups of keys into a signed
//! direction.

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is a repeat event.
    pub repeat: bool,
}

impl RawKeyEvent {
    /// Non-repeat event for a known key code.
    pub fn new(code: KeyCode, state: ElementState) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state,
            repeat: false,
        }
    }
}

/// Keyboard state keyed by physical key codes, so bindings survive layout changes.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
    just_released: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Creates a new `KeyboardState` with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes a winit [`KeyEvent`].
    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Processes a [`RawKeyEvent`]. Repeats and unidentified keys are ignored.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        let PhysicalKey::Code(code) = event.key else {
            return;
        };
        match event.state {
            ElementState::Pressed => {
                if self.held.insert(code) {
                    self.just_pressed.insert(code);
                }
            }
            ElementState::Released => {
                if self.held.remove(&code) {
                    self.just_released.insert(code);
                }
            }
        }
    }

    /// Returns `true` while the key is held down.
    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Returns `true` if any of `keys` is held.
    #[must_use]
    pub fn any_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.held.contains(k))
    }

    /// Returns `true` only during the frame the key went down.
    #[must_use]
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Returns `true` only during the frame the key went up.
    #[must_use]
    pub fn just_released(&self, key: KeyCode) -> bool {
        self.just_released.contains(&key)
    }

    /// Signed direction from two key groups: `+1` if only a `positive` key is
    /// held, `-1` if only a `negative` key is held, `0` otherwise.
    #[must_use]
    pub fn axis(&self, negative: &[KeyCode], positive: &[KeyCode]) -> f32 {
        let neg = if self.any_pressed(negative) { 1.0 } else { 0.0 };
        let pos = if self.any_pressed(positive) { 1.0 } else { 0.0 };
        pos - neg
    }

    /// Releases every held key, e.g. when the canvas loses focus.
    pub fn release_all(&mut self) {
        if !self.held.is_empty() {
            tracing::trace!(count = self.held.len(), "releasing held keys");
        }
        self.just_released.extend(self.held.drain());
    }

    /// Clears `just_pressed` and `just_released`. Call at end of frame.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
