//! One-shot sound effects over `kira`.

use std::fmt;
use std::path::Path;

use kira::sound::static_sound::StaticSoundData;
use kira::{AudioManager, AudioManagerSettings, DefaultBackend};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundError {
    /// No audio device was opened.
    Disabled,
    /// The file could not be read or decoded.
    Load { path: String, message: String },
    /// The mixer refused the sound.
    Play(String),
}

impl fmt::Display for SoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoundError::Disabled => write!(f, "sound is disabled"),
            SoundError::Load { path, message } => {
                write!(f, "unable to load sound file \"{path}\": {message}")
            }
            SoundError::Play(message) => write!(f, "unable to play sound: {message}"),
        }
    }
}

impl std::error::Error for SoundError {}

/// Plays sound files through the default output device.
///
/// A machine without audio still gets a player; it is simply disabled and
/// every [`play_file`](Self::play_file) returns [`SoundError::Disabled`].
pub struct SoundPlayer {
    manager: Option<AudioManager<DefaultBackend>>,
}

impl SoundPlayer {
    /// Opens the default output device, or returns a disabled player.
    pub fn new() -> Self {
        match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(manager) => Self {
                manager: Some(manager),
            },
            Err(err) => {
                log::warn!("unable to initialize sound ({err}); sound effects will not work");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { manager: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.manager.is_some()
    }

    /// Decodes `path` fully and starts playing it once.
    pub fn play_file(&mut self, path: impl AsRef<Path>) -> Result<(), SoundError> {
        let manager = self.manager.as_mut().ok_or(SoundError::Disabled)?;
        let path = path.as_ref();

        let data = StaticSoundData::from_file(path).map_err(|e| SoundError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        manager
            .play(data)
            .map_err(|e| SoundError::Play(format!("{e:?}")))?;
        log::debug!("playing {}", path.display());
        Ok(())
    }
}

impl Default for SoundPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SoundPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundPlayer")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_player_refuses_playback() {
        let mut player = SoundPlayer::disabled();
        assert!(!player.is_enabled());
        assert_eq!(player.play_file("boom.wav"), Err(SoundError::Disabled));
    }

    #[test]
    fn load_error_names_the_file() {
        let err = SoundError::Load {
            path: "missing.ogg".into(),
            message: "not found".into(),
        };
        assert!(err.to_string().contains("missing.ogg"));
    }
}
