use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::object::SceneId;
use crate::scene::UpdateCtx;

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies a timer registered with a scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fires every `interval` seconds of accumulated frame time.
///
/// The counter only advances while running. A firing resets it to exactly
/// zero: leftover time is dropped and a long frame never fires twice.
#[derive(Debug, Clone, PartialEq)]
pub struct Timer {
    interval: f32,
    running: bool,
    counter: f32,
    scene: Option<SceneId>,
}

impl Timer {
    /// A running timer.
    pub fn new(interval_secs: f32) -> Self {
        Self {
            interval: interval_secs.max(0.0),
            running: true,
            counter: 0.0,
            scene: None,
        }
    }

    pub fn from_duration(interval: Duration) -> Self {
        Self::new(interval.as_secs_f32())
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn set_interval(&mut self, interval_secs: f32) {
        self.interval = interval_secs.max(0.0);
    }

    /// Seconds accumulated since the last firing.
    pub fn counter(&self) -> f32 {
        self.counter
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.counter = 0.0;
    }

    /// Adds `dt` seconds. Returns `true` when the counter went past the
    /// interval, in which case it is back at zero.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.counter += dt.max(0.0);
        if self.counter > self.interval {
            self.counter = 0.0;
            true
        } else {
            false
        }
    }

    /// The scene this timer is registered with, if any.
    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    pub(crate) fn set_scene(&mut self, scene: Option<SceneId>) {
        self.scene = scene;
    }
}

/// A timer registered with a scene, plus what it does when it fires.
pub trait TimerTask: 'static {
    fn timer(&self) -> &Timer;
    fn timer_mut(&mut self) -> &mut Timer;

    /// Called each time the timer fires.
    fn tick(&mut self, ctx: &mut UpdateCtx<'_>) {
        let _ = ctx;
    }
}

/// A [`TimerTask`] that calls a closure.
///
/// ```rust,ignore
/// scene.add_timer(Interval::new(2.0, |ctx| {
///     ctx.spawn(Coin::random(ctx.scene_size()));
/// }));
/// ```
pub struct Interval<F> {
    timer: Timer,
    on_tick: F,
}

impl<F> Interval<F>
where
    F: FnMut(&mut UpdateCtx<'_>) + 'static,
{
    pub fn new(interval_secs: f32, on_tick: F) -> Self {
        Self {
            timer: Timer::new(interval_secs),
            on_tick,
        }
    }
}

impl<F> TimerTask for Interval<F>
where
    F: FnMut(&mut UpdateCtx<'_>) + 'static,
{
    fn timer(&self) -> &Timer {
        &self.timer
    }

    fn timer_mut(&mut self) -> &mut Timer {
        &mut self.timer
    }

    fn tick(&mut self, ctx: &mut UpdateCtx<'_>) {
        (self.on_tick)(ctx);
    }
}

impl<F> fmt::Debug for Interval<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interval").field("timer", &self.timer).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_past_the_interval_and_resets() {
        let mut timer = Timer::new(1.0);
        assert!(!timer.advance(0.6));
        assert!(timer.advance(0.6));
        assert_eq!(timer.counter(), 0.0);
    }

    #[test]
    fn reaching_the_interval_exactly_does_not_fire() {
        let mut timer = Timer::new(1.0);
        assert!(!timer.advance(0.5));
        assert!(!timer.advance(0.5));
        assert!(timer.advance(0.001));
    }

    #[test]
    fn a_long_frame_fires_only_once() {
        let mut timer = Timer::new(0.1);
        assert!(timer.advance(5.0));
        assert_eq!(timer.counter(), 0.0);
        assert!(!timer.advance(0.05));
    }

    #[test]
    fn stopped_timers_do_not_accumulate() {
        let mut timer = Timer::new(1.0);
        timer.stop();
        assert!(!timer.advance(3.0));
        assert_eq!(timer.counter(), 0.0);

        timer.start();
        assert!(timer.advance(1.5));
    }
}
