use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A function to run once, `after` from now, on its own thread.
///
/// The frame loop never waits for it. Because the function runs on another
/// thread it cannot touch the scene; hand results back through a channel or
/// an atomic and pick them up in an `update`.
pub struct Delay<F> {
    function: F,
    after: Duration,
}

impl<F> Delay<F>
where
    F: FnOnce() + Send + 'static,
{
    pub fn new(function: F, after: Duration) -> Self {
        Self { function, after }
    }

    pub fn after(&self) -> Duration {
        self.after
    }

    /// Starts the countdown and returns immediately.
    pub fn start(self) -> DelayHandle {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let Delay { function, after } = self;
        let deadline = Instant::now() + after;

        let thread = thread::spawn(move || {
            match cancel_rx.recv_timeout(after) {
                Ok(()) => {
                    log::debug!("delay cancelled");
                    return false;
                }
                Err(RecvTimeoutError::Timeout) => {}
                // Handle dropped: detached, keep waiting out the delay.
                Err(RecvTimeoutError::Disconnected) => {
                    thread::sleep(deadline.saturating_duration_since(Instant::now()));
                }
            }
            function();
            log::debug!("delay fired after {after:?}");
            true
        });

        DelayHandle {
            cancel: Some(cancel_tx),
            thread: Some(thread),
        }
    }
}

/// Control over a started [`Delay`].
///
/// Dropping the handle detaches the delay; it still fires.
#[derive(Debug)]
pub struct DelayHandle {
    cancel: Option<Sender<()>>,
    thread: Option<JoinHandle<bool>>,
}

impl DelayHandle {
    /// Prevents the function from running if it has not started yet.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            // The thread may already be gone.
            let _ = tx.send(());
        }
    }

    /// `true` once the waiting thread has exited, fired or not.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Waits for the delay to resolve. Returns `true` if the function ran.
    ///
    /// A panic inside the function counts as not run.
    pub fn join(mut self) -> bool {
        self.thread
            .take()
            .map(|t| t.join().unwrap_or(false))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn fires_once_after_the_delay() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let started = Instant::now();

        let handle = Delay::new(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            Duration::from_millis(30),
        )
        .start();

        assert!(handle.join());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn cancelled_delay_never_runs() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let mut handle = Delay::new(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            Duration::from_secs(5),
        )
        .start();
        handle.cancel();

        assert!(!handle.join());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn start_returns_immediately() {
        let started = Instant::now();
        let mut handle = Delay::new(|| {}, Duration::from_secs(5)).start();
        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(!handle.is_finished());
        handle.cancel();
        handle.join();
    }

    #[test]
    fn dropped_handle_still_fires() {
        let (tx, rx) = mpsc::channel();
        drop(Delay::new(move || tx.send(7).unwrap(), Duration::from_millis(10)).start());
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(7));
    }
}
