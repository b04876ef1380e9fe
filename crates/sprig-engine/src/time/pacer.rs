use std::time::{Duration, Instant};

/// Caps the frame rate.
///
/// The runtime asks [`is_due`](Self::is_due) before drawing and sleeps the
/// event loop until [`deadline`](Self::deadline) otherwise. `None` as the
/// rate means "as fast as presentation allows".
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Option<Duration>,
    next: Option<Instant>,
}

impl FramePacer {
    pub fn new(fps: Option<u32>) -> Self {
        let interval = fps
            .filter(|&fps| fps > 0)
            .map(|fps| Duration::from_secs_f64(1.0 / fps as f64));
        Self { interval, next: None }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// `true` when a frame may be drawn at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.next {
            Some(next) => now >= next,
            None => true,
        }
    }

    /// Earliest instant of the next frame, if the rate is capped and a frame
    /// has already been drawn.
    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Records that a frame started at `now`.
    pub fn mark(&mut self, now: Instant) {
        self.next = self.interval.map(|interval| now + interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_always_due() {
        let pacer = FramePacer::new(Some(30));
        assert!(pacer.is_due(Instant::now()));
        assert!(pacer.deadline().is_none());
    }

    #[test]
    fn waits_one_interval_after_a_frame() {
        let mut pacer = FramePacer::new(Some(50));
        let t0 = Instant::now();
        pacer.mark(t0);
        assert!(!pacer.is_due(t0 + Duration::from_millis(10)));
        assert!(pacer.is_due(t0 + Duration::from_millis(20)));
        assert_eq!(pacer.deadline(), Some(t0 + Duration::from_millis(20)));
    }

    #[test]
    fn uncapped_and_zero_fps_never_wait() {
        for fps in [None, Some(0)] {
            let mut pacer = FramePacer::new(fps);
            let t0 = Instant::now();
            pacer.mark(t0);
            assert!(pacer.is_due(t0));
            assert!(pacer.interval().is_none());
        }
    }
}
