use std::path::Path;

use sprig_engine::audio::{SoundError, SoundPlayer};
use sprig_engine::gamepad::{Gamepads, Joystick};

/// Which process-wide devices a [`Context`] opens.
#[derive(Debug, Clone)]
pub struct ContextConfig {
    pub audio: bool,
    pub gamepads: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            audio: true,
            gamepads: true,
        }
    }
}

/// Sound output and gamepads, created once and owned by a scene.
#[derive(Debug)]
pub struct Context {
    sound: SoundPlayer,
    gamepads: Gamepads,
}

impl Context {
    /// Opens the audio device right away; gamepads open on first use.
    /// Either may end up disabled, which is logged, not an error.
    pub fn new(config: ContextConfig) -> Self {
        Self {
            sound: if config.audio {
                SoundPlayer::new()
            } else {
                SoundPlayer::disabled()
            },
            gamepads: if config.gamepads {
                Gamepads::new()
            } else {
                Gamepads::disabled()
            },
        }
    }

    /// No audio, no gamepads. For tests and tools.
    pub fn headless() -> Self {
        Self::new(ContextConfig {
            audio: false,
            gamepads: false,
        })
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound.is_enabled()
    }

    pub fn gamepads_enabled(&self) -> bool {
        self.gamepads.is_open()
    }

    /// Plays a sound file once. Failures are logged and otherwise ignored.
    pub fn play_sfx(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match self.sound.play_file(path) {
            Ok(()) => {}
            Err(SoundError::Disabled) => log::debug!("sound disabled, skipping {}", path.display()),
            Err(err) => log::warn!("{err}"),
        }
    }

    pub fn joystick(&mut self) -> Option<Joystick<'_>> {
        self.gamepads.first()
    }

    pub(crate) fn poll_gamepads(&mut self) {
        self.gamepads.poll();
    }

    /// Releases the audio device and gamepad backend. The owning scene
    /// does this when it is dropped.
    pub fn shutdown(&mut self) {
        self.sound = SoundPlayer::disabled();
        self.gamepads = Gamepads::disabled();
        log::debug!("context shut down");
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(ContextConfig::default())
    }
}
