/// What the frame loop should do after the surface refused a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was configured again; the next frame may render.
    Reconfigured,
    /// Drop this frame and keep running.
    SkipFrame,
    /// Unrecoverable (out of memory). The game loop stops.
    Fatal,
}

impl SurfaceErrorAction {
    #[inline]
    pub fn is_fatal(self) -> bool {
        matches!(self, SurfaceErrorAction::Fatal)
    }

    /// `Err` for [`Fatal`](Self::Fatal) so the loop can stop with a reason;
    /// `Ok` for anything the next frame can recover from.
    pub fn into_result(self, err: &wgpu::SurfaceError) -> anyhow::Result<()> {
        match self {
            SurfaceErrorAction::Fatal => {
                Err(anyhow::anyhow!("surface failed beyond recovery: {err}"))
            }
            SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fatal_actions_become_errors() {
        let oom = wgpu::SurfaceError::OutOfMemory;
        let err = SurfaceErrorAction::Fatal.into_result(&oom).unwrap_err();
        assert!(err.to_string().contains("beyond recovery"));

        let lost = wgpu::SurfaceError::Lost;
        assert!(SurfaceErrorAction::Reconfigured.into_result(&lost).is_ok());
        assert!(SurfaceErrorAction::SkipFrame.into_result(&lost).is_ok());
    }
}
