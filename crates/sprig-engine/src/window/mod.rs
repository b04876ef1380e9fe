//! Window creation and the blocking game loop.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
