//! Font loading and CPU glyph rasterization.

mod font;

pub use font::{Font, FontLoadError};
