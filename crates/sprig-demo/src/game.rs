use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sprig::prelude::*;

use crate::art;

const PLAYER_SPEED: f32 = 240.0;
const COIN_LIFETIME: f32 = 5.0;

/// Steers with the arrow keys, WASD or the left stick; picks up coins.
pub struct Player {
    sprite: Sprite,
    score: Rc<Cell<u32>>,
}

impl Player {
    pub fn new(x: f32, y: f32, score: Rc<Cell<u32>>) -> Self {
        let mut sprite = Sprite::new(x, y, art::disc(14, [90, 200, 255, 255]));
        sprite.set_z_order(1.0);
        Self { sprite, score }
    }

    fn steer(&self, ctx: &mut UpdateCtx<'_>) -> Vec2 {
        let axis = |neg: [Key; 2], pos: [Key; 2]| {
            let held = |keys: [Key; 2]| keys.iter().any(|k| ctx.key_held(*k));
            match (held(neg), held(pos)) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            }
        };
        let keys = Vec2::new(
            axis([Key::ArrowLeft, Key::A], [Key::ArrowRight, Key::D]),
            axis([Key::ArrowUp, Key::W], [Key::ArrowDown, Key::S]),
        );
        if keys != Vec2::zero() {
            return keys;
        }
        ctx.get_joystick()
            .map(|pad| pad.left_stick())
            .unwrap_or_else(Vec2::zero)
    }
}

impl Entity for Player {
    fn object(&self) -> &Object {
        self.sprite.object()
    }

    fn object_mut(&mut self) -> &mut Object {
        self.sprite.object_mut()
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>, dt: f32) {
        if ctx.key_pressed(Key::Escape) {
            ctx.quit();
            return;
        }

        let dir = self.steer(ctx);
        let size = ctx.scene_size();
        let (hw, hh) = (self.sprite.width() / 2.0, self.sprite.height() / 2.0);
        self.sprite.x = (self.sprite.x + dir.x * PLAYER_SPEED * dt).clamp(hw, size.x - hw);
        self.sprite.y = (self.sprite.y + dir.y * PLAYER_SPEED * dt).clamp(hh, size.y - hh);
        self.sprite.rotation += dir.x * -180.0 * dt;

        for id in ctx.overlapping_objects(self.sprite.object()) {
            let Some(coin) = ctx.get::<Coin>(id) else { continue };
            let (x, y) = (coin.sprite.x, coin.sprite.y);
            ctx.remove(id);
            self.score.set(self.score.get() + 1);
            ctx.play_sfx("assets/coin.ogg");
            match Animation::new(x, y, art::burst(6, 24), false, 0.05) {
                Ok(burst) => {
                    ctx.spawn(burst);
                }
                Err(err) => log::warn!("no burst: {err}"),
            }
        }
    }
}

/// Sits still until picked up or until its own timer runs out.
pub struct Coin {
    sprite: Sprite,
    lifetime: Timer,
}

impl Coin {
    fn new(x: f32, y: f32) -> Self {
        let mut sprite = Sprite::new(x, y, art::disc(8, [255, 200, 40, 255]));
        sprite.set_z_order(2.0);
        Self {
            sprite,
            lifetime: Timer::new(COIN_LIFETIME),
        }
    }
}

impl Entity for Coin {
    fn object(&self) -> &Object {
        self.sprite.object()
    }

    fn object_mut(&mut self) -> &mut Object {
        self.sprite.object_mut()
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>, dt: f32) {
        if self.lifetime.advance(dt) {
            self.lifetime.stop();
            if let Err(err) = ctx.destroy(self.sprite.object()) {
                log::debug!("expired coin: {err}");
            }
        }
    }

    fn timer_mut(&mut self) -> Option<&mut Timer> {
        Some(&mut self.lifetime)
    }
}

/// Drops a coin somewhere in the scene every `every` seconds.
pub fn coin_spawner(every: f32, seed: u64) -> impl TimerTask {
    let mut rng = XorShift(seed.max(1));
    Interval::new(every, move |ctx| {
        let size = ctx.scene_size();
        let x = 16.0 + rng.unit() * (size.x - 32.0);
        let y = 16.0 + rng.unit() * (size.y - 32.0);
        ctx.spawn(Coin::new(x, y));
    })
}

struct XorShift(u64);

impl XorShift {
    fn unit(&mut self) -> f32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// Top-left score line; redraws only when the count changes.
pub struct ScoreBoard {
    text: Text,
    score: Rc<Cell<u32>>,
    shown: u32,
}

impl ScoreBoard {
    pub fn counter() -> Rc<Cell<u32>> {
        Rc::new(Cell::new(0))
    }

    pub fn new(font: Font, score: Rc<Cell<u32>>) -> Self {
        let mut text = Text::new(0.0, 0.0, font, "Score: 0");
        text.set_z_order(-1.0);
        let mut board = Self {
            text,
            score,
            shown: 0,
        };
        board.pin();
        board
    }

    fn pin(&mut self) {
        self.text.x = 12.0 + self.text.width() / 2.0;
        self.text.y = 12.0 + self.text.height() / 2.0;
    }
}

impl Entity for ScoreBoard {
    fn object(&self) -> &Object {
        self.text.object()
    }

    fn object_mut(&mut self) -> &mut Object {
        self.text.object_mut()
    }

    fn update(&mut self, _ctx: &mut UpdateCtx<'_>, _dt: f32) {
        let score = self.score.get();
        if score != self.shown {
            self.shown = score;
            self.text.set_text(format!("Score: {score}"));
            self.pin();
        }
    }
}

/// A line of help text that goes away once a [`Delay`] flips its flag.
pub struct Hint {
    text: Text,
    expired: Arc<AtomicBool>,
}

impl Hint {
    pub fn new(x: f32, y: f32, font: Font, expired: Arc<AtomicBool>) -> Self {
        let text = Text::with_color(
            x,
            y,
            font,
            "Arrows or WASD to move, Esc to quit",
            Color::rgb(200, 200, 220),
        );
        Self { text, expired }
    }
}

impl Entity for Hint {
    fn object(&self) -> &Object {
        self.text.object()
    }

    fn object_mut(&mut self) -> &mut Object {
        self.text.object_mut()
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>, _dt: f32) {
        if self.expired.load(Ordering::Acquire) {
            if let Err(err) = ctx.destroy(self.text.object()) {
                log::debug!("hint: {err}");
            }
        }
    }
}
