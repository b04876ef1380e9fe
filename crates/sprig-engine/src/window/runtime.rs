use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::{FrameClock, FramePacer};

/// Game window and loop settings.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Frame-rate cap. `None` draws as fast as presentation allows.
    pub target_fps: Option<u32>,

    pub cursor_visible: bool,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "sprig".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
            target_fps: Some(60),
            cursor_visible: true,
            resizable: false,
        }
    }
}

/// Blocking single-window game loop.
pub struct Runtime;

impl Runtime {
    /// Opens the window and calls `app` once per paced frame until it returns
    /// [`AppControl::Exit`].
    ///
    /// Closing the window does not stop the loop by itself: it arrives as
    /// [`InputEvent::CloseRequested`](crate::input::InputEvent::CloseRequested)
    /// and the app decides.
    pub fn run<A: CoreApp>(config: RuntimeConfig, gpu_init: GpuInit, app: &mut A) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit event loop")?;
        let mut state = RuntimeState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct RuntimeState<'app, A: CoreApp> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: &'app mut A,

    entry: Option<WindowEntry>,
    pacer: FramePacer,
    error: Option<anyhow::Error>,
    exiting: bool,
}

impl<'app, A: CoreApp> RuntimeState<'app, A> {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: &'app mut A) -> Self {
        let pacer = FramePacer::new(config.target_fps);
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            pacer,
            error: None,
            exiting: false,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        window.set_cursor_visible(self.config.cursor_visible);

        let gpu_init = self.gpu_init.clone();
        let mut entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;
        // GPU setup can take a while; the first frame should not see it.
        entry.with_clock_mut(|clock| clock.reset());

        log::info!(
            "sprig: window \"{}\" opened at {}x{}",
            self.config.title,
            self.config.initial_size.width,
            self.config.initial_size.height
        );

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("sprig: {err:#}");
        self.error = Some(err);
        self.exiting = true;
        event_loop.exit();
    }

    /// Runs one app frame. Returns the app's verdict.
    fn frame(&mut self, window_id: WindowId) -> Result<AppControl> {
        let (app, entry) = (&mut *self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return Ok(AppControl::Continue);
        };

        entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: window_id,
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                    input_frame: fields.input_frame,
                    time,
                };
                app.on_frame(&mut ctx)
            };
            fields.input_frame.clear();
            control
        })
    }
}

impl<'app, A: CoreApp> ApplicationHandler for RuntimeState<'app, A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exiting {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            event_loop.exit();
            return;
        }
        let Some(entry) = self.entry.as_ref() else { return };

        let now = Instant::now();
        match self.pacer.deadline() {
            Some(deadline) if now < deadline => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            _ => {
                event_loop.set_control_flow(ControlFlow::Wait);
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exiting {
            return;
        }
        let Some(entry) = self.entry.as_mut() else { return };

        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, fields.input_state, &event) {
                fields.input_state.apply(&ev);
                fields.input_frame.events.push(ev);
            }
        });

        match &event {
            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                // System-initiated redraws must not speed the game up.
                if !self.pacer.is_due(now) {
                    return;
                }
                self.pacer.mark(now);

                match self.frame(window_id) {
                    Ok(AppControl::Continue) => {}
                    Ok(AppControl::Exit) => {
                        self.exiting = true;
                        event_loop.exit();
                    }
                    Err(err) => self.fail(event_loop, err),
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.app.on_exit();
        // Surface must go before the window it borrows; ouroboros drops in order.
        self.entry = None;
        log::debug!("sprig: event loop finished");
    }
}
