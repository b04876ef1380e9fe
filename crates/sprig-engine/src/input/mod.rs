//! Keyboard, pointer and window input.
//!
//! The public types carry no winit types; [`platform`] does the translation.

mod frame;
pub mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, MouseWheelDelta};
