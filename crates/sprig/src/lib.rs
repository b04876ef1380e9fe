//! Sprig: scenes, sprites and timers on top of `sprig-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use sprig::prelude::*;
//!
//! struct Ship {
//!     sprite: Sprite,
//! }
//!
//! impl Entity for Ship {
//!     fn object(&self) -> &Object { self.sprite.object() }
//!     fn object_mut(&mut self) -> &mut Object { self.sprite.object_mut() }
//!
//!     fn update(&mut self, ctx: &mut UpdateCtx<'_>, dt: f32) {
//!         if ctx.key_held(Key::ArrowRight) {
//!             self.sprite.x += 200.0 * dt;
//!         }
//!     }
//! }
//!
//! let mut scene = Scene::new(640, 480);
//! scene.add(Ship { sprite: Sprite::new(320.0, 240.0, load_image("ship.png", true)?) });
//! scene.begin(40)?;
//! ```
//!
//! Objects are drawn in descending z-order: the lowest z-order ends up on
//! top. Inside `update`, an entity changes the scene through [`UpdateCtx`];
//! those changes apply as soon as its `update` returns.

pub mod animation;
mod app;
pub mod context;
pub mod delay;
pub mod error;
pub mod image;
pub mod input;
pub mod object;
pub mod scene;
pub mod sprite;
pub mod text;
pub mod timer;

pub use animation::{Animation, AnimationStep};
pub use context::{Context, ContextConfig};
pub use delay::{Delay, DelayHandle};
pub use error::{AssetError, SceneError};
pub use image::{apply_color_key, load_image, Image};
pub use object::{Entity, Object, ObjectId, SceneId};
pub use scene::{Scene, SceneConfig, UpdateCtx};
pub use sprite::Sprite;
pub use text::Text;
pub use timer::{Interval, Timer, TimerId, TimerTask};

/// Everything a game needs. Import this in your game modules.
pub mod prelude {
    pub use crate::animation::{Animation, AnimationStep};
    pub use crate::context::{Context, ContextConfig};
    pub use crate::delay::{Delay, DelayHandle};
    pub use crate::error::{AssetError, SceneError};
    pub use crate::image::{load_image, Image};
    pub use crate::object::{Entity, Object, ObjectId};
    pub use crate::scene::{Scene, SceneConfig, UpdateCtx};
    pub use crate::sprite::Sprite;
    pub use crate::text::Text;
    pub use crate::timer::{Interval, Timer, TimerId, TimerTask};

    pub use sprig_engine::coords::{Rect, Vec2};
    pub use sprig_engine::gamepad::{Joystick, JoystickAxis, JoystickButton};
    pub use sprig_engine::input::{Key, MouseButton};
    pub use sprig_engine::logging::{init_logging, LoggingConfig};
    pub use sprig_engine::paint::Color;
    pub use sprig_engine::text::Font;
}
