//! Sprig engine crate.
//!
//! This crate owns the platform, GPU and device pieces used by the `sprig`
//! scene framework: the winit loop, the wgpu surface, the sprite renderer,
//! input translation, frame timing, fonts, sound effects and gamepads.

pub mod audio;
pub mod coords;
pub mod core;
pub mod device;
pub mod gamepad;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
pub mod time;
pub mod window;
