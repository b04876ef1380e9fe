use std::ops::{Deref, DerefMut};
use std::path::Path;

use crate::error::AssetError;
use crate::image::{load_image, Image};
use crate::object::{Entity, Object};
use crate::scene::UpdateCtx;
use crate::sprite::Sprite;
use crate::timer::Timer;

/// Outcome of [`Animation::step`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AnimationStep {
    Advanced,
    /// A repeating animation went back to its first frame.
    Wrapped,
    /// A non-repeating animation ran past its last frame.
    Finished,
}

/// A sprite that flips through frames at a fixed rate.
///
/// A non-repeating animation removes itself from its scene once it steps
/// past the last frame; the last frame stays on screen until then.
#[derive(Debug)]
pub struct Animation {
    sprite: Sprite,
    timer: Timer,
    frames: Vec<Image>,
    frame: usize,
    repeating: bool,
    finished: bool,
}

impl Animation {
    /// Builds an animation centered on `(x, y)` that shows each frame for
    /// `frame_time` seconds. Animations do not collide.
    pub fn new(
        x: f32,
        y: f32,
        frames: Vec<Image>,
        repeating: bool,
        frame_time: f32,
    ) -> Result<Self, AssetError> {
        let first = frames.first().cloned().ok_or(AssetError::NoFrames)?;
        Ok(Self {
            sprite: Sprite::new(x, y, first).with_collideable(false),
            timer: Timer::new(frame_time),
            frames,
            frame: 0,
            repeating,
            finished: false,
        })
    }

    /// Loads every frame with transparency keying, in order.
    pub fn load<P: AsRef<Path>>(
        x: f32,
        y: f32,
        paths: &[P],
        repeating: bool,
        frame_time: f32,
    ) -> Result<Self, AssetError> {
        let frames = paths
            .iter()
            .map(|p| load_image(p, true))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(x, y, frames, repeating, frame_time)
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Moves to the next frame.
    ///
    /// Past the last frame a repeating animation wraps to 0; otherwise the
    /// timer stops and every later call is a no-op returning `Finished`.
    pub fn step(&mut self) -> AnimationStep {
        if self.finished {
            return AnimationStep::Finished;
        }

        let next = self.frame + 1;
        let outcome = if next < self.frames.len() {
            self.frame = next;
            AnimationStep::Advanced
        } else if self.repeating {
            self.frame = 0;
            AnimationStep::Wrapped
        } else {
            self.finished = true;
            self.timer.stop();
            return AnimationStep::Finished;
        };

        self.sprite.set_image(self.frames[self.frame].clone());
        outcome
    }
}

impl Deref for Animation {
    type Target = Sprite;

    fn deref(&self) -> &Sprite {
        &self.sprite
    }
}

impl DerefMut for Animation {
    fn deref_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

impl Entity for Animation {
    fn object(&self) -> &Object {
        self.sprite.object()
    }

    fn object_mut(&mut self) -> &mut Object {
        self.sprite.object_mut()
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>, dt: f32) {
        if !self.timer.advance(dt) {
            return;
        }
        if self.step() == AnimationStep::Finished {
            if let Err(err) = ctx.destroy(self.sprite.object()) {
                log::debug!("finished animation not removed: {err}");
            }
        }
    }

    fn timer_mut(&mut self) -> Option<&mut Timer> {
        Some(&mut self.timer)
    }
}

#[cfg(test)]
mod tests {
    use sprig_engine::paint::Color;

    use super::*;

    fn frames(n: u32) -> Vec<Image> {
        (1..=n).map(|w| Image::solid(w, 1, Color::WHITE)).collect()
    }

    #[test]
    fn empty_frame_list_is_rejected() {
        let err = Animation::new(0.0, 0.0, Vec::new(), false, 0.1).unwrap_err();
        assert!(matches!(err, AssetError::NoFrames));
    }

    #[test]
    fn non_repeating_finishes_on_the_last_frame() {
        let mut anim = Animation::new(0.0, 0.0, frames(3), false, 0.1).unwrap();
        assert!(!anim.collideable);
        assert_eq!(anim.step(), AnimationStep::Advanced);
        assert_eq!(anim.step(), AnimationStep::Advanced);
        assert_eq!(anim.frame(), 2);
        assert_eq!(anim.width(), 3.0);

        assert_eq!(anim.step(), AnimationStep::Finished);
        assert_eq!(anim.frame(), 2);
        assert!(anim.is_finished());
        assert!(!anim.timer().is_running());

        assert_eq!(anim.step(), AnimationStep::Finished);
        assert_eq!(anim.frame(), 2);
    }

    #[test]
    fn repeating_wraps_to_the_first_frame() {
        let mut anim = Animation::new(0.0, 0.0, frames(2), true, 0.1).unwrap();
        assert_eq!(anim.step(), AnimationStep::Advanced);
        assert_eq!(anim.step(), AnimationStep::Wrapped);
        assert_eq!(anim.frame(), 0);
        assert_eq!(anim.width(), 1.0);
        assert!(!anim.is_finished());
    }

    #[test]
    fn load_reports_the_missing_frame() {
        let err = Animation::load(0.0, 0.0, &["nope/frame1.png"], false, 0.1).unwrap_err();
        assert!(matches!(err, AssetError::Image { ref path, .. } if path.contains("frame1")));
    }
}
