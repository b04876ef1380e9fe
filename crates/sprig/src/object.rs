use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use sprig_engine::coords::{Rect, Vec2};
use sprig_engine::scene::SpriteCmd;

use crate::image::Image;
use crate::scene::UpdateCtx;
use crate::timer::Timer;

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies a [`Scene`](crate::Scene) for the lifetime of the process.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SceneId(u64);

impl SceneId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies an object once it has been added to a scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    pub(crate) fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upcast to [`Any`] so scene lookups can hand back concrete types.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Anything a scene can own, update and draw.
///
/// Implementors embed an [`Object`] and expose it through
/// [`object`](Entity::object) / [`object_mut`](Entity::object_mut).
///
/// ```rust,ignore
/// struct Ship { sprite: Sprite, speed: f32 }
///
/// impl Entity for Ship {
///     fn object(&self) -> &Object { self.sprite.object() }
///     fn object_mut(&mut self) -> &mut Object { self.sprite.object_mut() }
///
///     fn update(&mut self, ctx: &mut UpdateCtx<'_>, dt: f32) {
///         if ctx.key_held(Key::ArrowLeft) {
///             self.sprite.x -= self.speed * dt;
///         }
///     }
/// }
/// ```
pub trait Entity: AsAny {
    fn object(&self) -> &Object;
    fn object_mut(&mut self) -> &mut Object;

    /// Called once per unpaused frame with the seconds since the last frame.
    fn update(&mut self, ctx: &mut UpdateCtx<'_>, dt: f32) {
        let _ = (ctx, dt);
    }

    /// The timer this entity drives itself, if any.
    ///
    /// [`Scene::quit`](crate::Scene::quit) stops it.
    fn timer_mut(&mut self) -> Option<&mut Timer> {
        None
    }
}

/// Downcasts a type-erased entity.
pub(crate) fn downcast_ref<T: Entity>(entity: &dyn Entity) -> Option<&T> {
    entity.as_any().downcast_ref::<T>()
}

pub(crate) fn downcast_mut<T: Entity>(entity: &mut dyn Entity) -> Option<&mut T> {
    entity.as_any_mut().downcast_mut::<T>()
}

/// Position, size, rotation and look of something in a scene.
///
/// `x`/`y` name the center. The size always follows the surface: it is
/// recomputed whenever [`set_surface`](Self::set_surface) runs, so the box
/// stays centered on `(x, y)`.
#[derive(Debug)]
pub struct Object {
    pub x: f32,
    pub y: f32,
    /// Degrees, counter-clockwise on screen.
    pub rotation: f32,
    pub collideable: bool,

    z_order: f32,
    surface: Option<Image>,
    width: f32,
    height: f32,

    handle: Option<(SceneId, ObjectId)>,
    resort: bool,
}

impl Object {
    pub fn new(x: f32, y: f32, collideable: bool) -> Self {
        Self {
            x,
            y,
            rotation: 0.0,
            collideable,
            z_order: 0.0,
            surface: None,
            width: 0.0,
            height: 0.0,
            handle: None,
            resort: false,
        }
    }

    pub fn with_surface(x: f32, y: f32, surface: Image, collideable: bool) -> Self {
        let mut object = Self::new(x, y, collideable);
        object.set_surface(surface);
        object
    }

    pub fn surface(&self) -> Option<&Image> {
        self.surface.as_ref()
    }

    /// Replaces the surface and resizes the object to match.
    pub fn set_surface(&mut self, surface: Image) {
        self.width = surface.width() as f32;
        self.height = surface.height() as f32;
        self.surface = Some(surface);
    }

    pub fn clear_surface(&mut self) {
        self.surface = None;
        self.width = 0.0;
        self.height = 0.0;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn z_order(&self) -> f32 {
        self.z_order
    }

    /// Changes the paint order key. Higher values are drawn first, so they
    /// end up underneath.
    ///
    /// The owning scene re-sorts before anything reads its order again.
    pub fn set_z_order(&mut self, z_order: f32) {
        self.z_order = z_order;
        self.resort = true;
    }

    /// Bounding box centered on `(x, y)`. Rotation is not taken into account.
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.position(), Vec2::new(self.width, self.height))
    }

    /// `true` when both boxes share area; touching edges do not count.
    pub fn overlaps(&self, other: &Object) -> bool {
        self.rect().intersects(other.rect())
    }

    pub fn scene(&self) -> Option<SceneId> {
        self.handle.map(|(scene, _)| scene)
    }

    pub fn id(&self) -> Option<ObjectId> {
        self.handle.map(|(_, id)| id)
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    pub(crate) fn handle(&self) -> Option<(SceneId, ObjectId)> {
        self.handle
    }

    pub(crate) fn attach(&mut self, scene: SceneId, id: ObjectId) {
        self.handle = Some((scene, id));
        self.resort = false;
    }

    pub(crate) fn detach(&mut self) {
        self.handle = None;
    }

    pub(crate) fn take_resort(&mut self) -> bool {
        std::mem::take(&mut self.resort)
    }

    /// `None` without a surface or with a zero-area one.
    pub(crate) fn draw_cmd(&self) -> Option<SpriteCmd> {
        let surface = self.surface.as_ref().filter(|s| s.width() > 0 && s.height() > 0)?;
        Some(SpriteCmd::new(surface.texture().clone(), self.position()).with_rotation(self.rotation))
    }
}

impl Entity for Object {
    fn object(&self) -> &Object {
        self
    }

    fn object_mut(&mut self) -> &mut Object {
        self
    }
}

#[cfg(test)]
mod tests {
    use sprig_engine::paint::Color;

    use super::*;

    #[test]
    fn surface_drives_size() {
        let mut obj = Object::new(50.0, 50.0, true);
        assert_eq!((obj.width(), obj.height()), (0.0, 0.0));

        obj.set_surface(Image::solid(10, 4, Color::WHITE));
        assert_eq!((obj.width(), obj.height()), (10.0, 4.0));
        assert_eq!(obj.rect(), Rect::new(45.0, 48.0, 10.0, 4.0));

        obj.clear_surface();
        assert!(obj.rect().is_empty());
    }

    #[test]
    fn centered_boxes_overlap_and_separated_ones_do_not() {
        let img = Image::solid(10, 10, Color::WHITE);
        let a = Object::with_surface(0.0, 0.0, img.clone(), true);
        let b = Object::with_surface(5.0, 5.0, img.clone(), true);
        let c = Object::with_surface(20.0, 0.0, img.clone(), true);
        let touching = Object::with_surface(10.0, 0.0, img, true);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&touching));
    }

    #[test]
    fn new_objects_are_detached() {
        let obj = Object::new(0.0, 0.0, false);
        assert!(obj.scene().is_none());
        assert!(obj.id().is_none());
        assert!(obj.draw_cmd().is_none());
    }

    #[test]
    fn z_order_change_flags_a_resort_once() {
        let mut obj = Object::new(0.0, 0.0, true);
        obj.set_z_order(3.0);
        assert_eq!(obj.z_order(), 3.0);
        assert!(obj.take_resort());
        assert!(!obj.take_resort());
    }

    #[test]
    fn draw_cmd_carries_rotation_and_center() {
        let mut obj = Object::with_surface(7.0, 9.0, Image::solid(2, 2, Color::BLACK), true);
        obj.rotation = 90.0;
        let cmd = obj.draw_cmd().expect("has surface");
        assert_eq!(cmd.center, Vec2::new(7.0, 9.0));
        assert_eq!(cmd.rotation_deg, 90.0);
        assert_eq!(cmd.size, Vec2::new(2.0, 2.0));
    }
}
