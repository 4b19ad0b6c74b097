//! Frame-coherent pointer and keyboard state fed from winit events.
//!
//! Events are accumulated between frames; the consumer reads the state once per
//! tick and then calls `clear_transients`.

pub mod keyboard;
pub mod mouse;

pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
