use super::ctx::FrameCtx;

/// Returned by [`App::on_frame`] to keep the loop going or stop it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// A game driven by [`Runtime`](crate::window::Runtime).
pub trait App {
    /// Called once per paced frame. An error stops the loop and is returned
    /// from [`Runtime::run`](crate::window::Runtime::run).
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> anyhow::Result<AppControl>;

    /// Called once after the last frame, before the window is destroyed.
    fn on_exit(&mut self) {}
}
