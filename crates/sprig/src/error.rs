use std::fmt;

use sprig_engine::text::FontLoadError;

use crate::object::SceneId;

/// A scene refused an object-level request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The object was never added to a scene, or was removed already.
    Detached,
    /// The object belongs to a different scene.
    ForeignScene { owner: SceneId, scene: SceneId },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Detached => write!(f, "object is not part of any scene"),
            SceneError::ForeignScene { owner, scene } => {
                write!(f, "object belongs to scene {owner}, not scene {scene}")
            }
        }
    }
}

impl std::error::Error for SceneError {}

/// An image, font or animation could not be loaded.
#[derive(Debug, Clone)]
pub enum AssetError {
    Image { path: String, message: String },
    Font(FontLoadError),
    /// An animation was given no frames.
    NoFrames,
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Image { path, message } => {
                write!(f, "unable to load image \"{path}\": {message}")
            }
            AssetError::Font(err) => err.fmt(f),
            AssetError::NoFrames => write!(f, "animation needs at least one frame"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Font(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FontLoadError> for AssetError {
    fn from(err: FontLoadError) -> Self {
        AssetError::Font(err)
    }
}
