//! Runs a [`Scene`] inside the engine's window loop.

use winit::dpi::LogicalSize;

use sprig_engine::core::{App as EngineApp, AppControl, FrameCtx};
use sprig_engine::device::GpuInit;
use sprig_engine::render::SpriteRenderer;
use sprig_engine::scene::DrawList;
use sprig_engine::window::{Runtime, RuntimeConfig};

use crate::scene::Scene;

struct SceneApp<'s> {
    scene: &'s mut Scene,
    renderer: SpriteRenderer,
    draw_list: DrawList,
}

impl EngineApp for SceneApp<'_> {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> anyhow::Result<AppControl> {
        self.scene.handle_events(&ctx.input_frame.events);
        self.scene.update(ctx.time.dt);

        self.draw_list.clear();
        self.scene.draw(&mut self.draw_list);

        let renderer = &mut self.renderer;
        let draw_list = &mut self.draw_list;
        ctx.render(self.scene.clear_color(), |rctx, target| {
            renderer.render(rctx, target, draw_list);
        })?;

        Ok(if self.scene.is_running() {
            AppControl::Continue
        } else {
            AppControl::Exit
        })
    }

    fn on_exit(&mut self) {
        log::debug!(
            "scene {}: window closed, {} textures were resident",
            self.scene.id(),
            self.renderer.cached_textures()
        );
    }
}

pub(crate) fn run(scene: &mut Scene, fps: u32) -> anyhow::Result<()> {
    let config = RuntimeConfig {
        title: scene.title().to_string(),
        initial_size: LogicalSize::new(f64::from(scene.width()), f64::from(scene.height())),
        target_fps: (fps > 0).then_some(fps),
        cursor_visible: scene.config().show_cursor,
        resizable: false,
    };

    let mut app = SceneApp {
        scene,
        renderer: SpriteRenderer::new(),
        draw_list: DrawList::new(),
    };
    Runtime::run(config, GpuInit::default(), &mut app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_the_window_leaves_devices_to_the_scene() {
        let mut scene = Scene::new(64, 64);
        let sound = scene.context().sound_enabled();
        let gamepads = scene.context().gamepads_enabled();

        let mut app = SceneApp {
            scene: &mut scene,
            renderer: SpriteRenderer::new(),
            draw_list: DrawList::new(),
        };
        app.on_exit();

        assert_eq!(scene.context().sound_enabled(), sound);
        assert_eq!(scene.context().gamepads_enabled(), gamepads);
    }
}
