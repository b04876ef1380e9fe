mod art;
mod game;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use sprig::prelude::*;

use game::{Hint, Player, ScoreBoard, coin_spawner};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = SceneConfig {
        title: "Sprig coins".to_string(),
        width: WIDTH,
        height: HEIGHT,
        show_cursor: true,
        clear_color: Color::rgb(16, 18, 32),
    };
    let mut scene = Scene::with_config(config, Context::default());
    scene.set_background(art::checkerboard(WIDTH, HEIGHT, 32));

    let score = ScoreBoard::counter();
    scene.add(Player::new(WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0, score.clone()));
    scene.add_timer(coin_spawner(1.2, 0x5eed));

    let hint_expired = Arc::new(AtomicBool::new(false));
    let mut hint_delay = None;

    match load_font() {
        Some(font) => {
            scene.add(ScoreBoard::new(font.clone(), score));
            scene.add(Hint::new(
                WIDTH as f32 / 2.0,
                HEIGHT as f32 - 40.0,
                font.with_size(18.0),
                Arc::clone(&hint_expired),
            ));

            let flag = Arc::clone(&hint_expired);
            hint_delay = Some(
                Delay::new(
                    move || flag.store(true, Ordering::Release),
                    Duration::from_secs(4),
                )
                .start(),
            );
        }
        None => log::warn!("no system font found; score and hint are not shown"),
    }

    scene.begin(60)?;

    if let Some(mut handle) = hint_delay {
        handle.cancel();
    }
    log::info!("bye");
    Ok(())
}

fn load_font() -> Option<Font> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| Font::from_file(p, 24.0).ok())
}
