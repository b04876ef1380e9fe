//! Draw stream types.
//!
//! Responsibilities:
//! - store renderer-agnostic sprite draw commands
//! - provide deterministic ordering (z-index + insertion order)
//! - own the shared, immutable pixel data that commands reference

mod cmd;
mod key;
mod list;
mod texture;
mod z_index;

pub use cmd::SpriteCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use texture::{Texture, TextureId};
pub use z_index::ZIndex;
