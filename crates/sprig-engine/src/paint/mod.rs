//! Color model shared between the framework and the renderer.
//!
//! Colors are stored as linear premultiplied RGBA, matching the blend state
//! the sprite pipeline uses.

pub mod color;

pub use color::Color;
