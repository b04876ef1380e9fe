use std::path::Path;

use sprig_engine::coords::Vec2;
use sprig_engine::gamepad::Joystick;
use sprig_engine::input::{InputEvent, Key, MouseButton};
use sprig_engine::paint::Color;
use sprig_engine::scene::{DrawList, SpriteCmd, ZIndex};

use crate::context::Context;
use crate::error::SceneError;
use crate::image::Image;
use crate::input::InputSnapshot;
use crate::object::{downcast_mut, downcast_ref, Entity, Object, ObjectId, SceneId};
use crate::timer::{Timer, TimerId, TimerTask};

/// Window and look of a scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// The mouse cursor is hidden over the window unless this is set.
    pub show_cursor: bool,
    pub clear_color: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "sprig".to_string(),
            width: 640,
            height: 480,
            show_cursor: false,
            clear_color: Color::BLACK,
        }
    }
}

pub(crate) struct Slot {
    id: ObjectId,
    seq: u64,
    // `None` only while the entity is inside its own `update`.
    entity: Option<Box<dyn Entity>>,
}

impl Slot {
    fn z(&self) -> f32 {
        self.entity.as_deref().map_or(0.0, |e| e.object().z_order())
    }
}

struct TimerSlot {
    id: TimerId,
    task: Option<Box<dyn TimerTask>>,
}

enum Command {
    Spawn(ObjectId, Box<dyn Entity>),
    Remove(ObjectId),
    SetZOrder(ObjectId, f32),
    AddTimer(TimerId, Box<dyn TimerTask>),
    RemoveTimer(TimerId),
    SetBackground(Option<Image>),
    Pause,
    Unpause,
    Quit,
}

/// The scene as seen from inside an entity's `update` or a timer's `tick`.
///
/// Queries answer from the scene as it was when the callback started.
/// Commands are queued and applied as soon as the callback returns, before
/// the next entity runs.
pub struct UpdateCtx<'a> {
    scene: SceneId,
    size: Vec2,
    paused: bool,
    slots: &'a [Slot],
    input: &'a InputSnapshot,
    context: &'a mut Context,
    commands: &'a mut Vec<Command>,
}

impl<'a> UpdateCtx<'a> {
    pub fn scene_id(&self) -> SceneId {
        self.scene
    }

    pub fn scene_size(&self) -> Vec2 {
        self.size
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // ── input ─────────────────────────────────────────────────────────────

    pub fn key_pressed(&self, key: Key) -> bool {
        self.input.key_pressed(key)
    }

    pub fn key_held(&self, key: Key) -> bool {
        self.input.key_held(key)
    }

    pub fn mouse_pos(&self) -> Vec2 {
        self.input.mouse_pos()
    }

    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.input.mouse_pressed(button)
    }

    pub fn get_joystick(&mut self) -> Option<Joystick<'_>> {
        self.context.joystick()
    }

    pub fn play_sfx(&mut self, path: impl AsRef<Path>) {
        self.context.play_sfx(path);
    }

    // ── registry queries ──────────────────────────────────────────────────

    /// Collideable objects whose boxes overlap `object`'s. The entity being
    /// updated is never part of the result.
    pub fn overlapping_objects(&self, object: &Object) -> Vec<ObjectId> {
        overlapping_in(self.slots, object)
    }

    pub fn get<T: Entity>(&self, id: ObjectId) -> Option<&T> {
        find_entity(self.slots, id).and_then(downcast_ref::<T>)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        find_entity(self.slots, id).map(|e| e.object())
    }

    // ── commands ──────────────────────────────────────────────────────────

    /// Adds an entity once the callback returns. The id is valid right away.
    pub fn spawn<E: Entity>(&mut self, entity: E) -> ObjectId {
        let id = ObjectId::next();
        self.commands.push(Command::Spawn(id, Box::new(entity)));
        id
    }

    pub fn remove(&mut self, id: ObjectId) {
        self.commands.push(Command::Remove(id));
    }

    /// Removes `object` from this scene, typically the entity's own object.
    pub fn destroy(&mut self, object: &Object) -> Result<(), SceneError> {
        let id = owned_id(self.scene, object)?;
        self.commands.push(Command::Remove(id));
        Ok(())
    }

    /// Moves another object in the paint order. An entity changing its own
    /// z-order can call [`Object::set_z_order`] directly.
    pub fn set_z_order(&mut self, id: ObjectId, z: f32) {
        self.commands.push(Command::SetZOrder(id, z));
    }

    pub fn add_timer<T: TimerTask>(&mut self, task: T) -> TimerId {
        let id = TimerId::next();
        self.commands.push(Command::AddTimer(id, Box::new(task)));
        id
    }

    pub fn remove_timer(&mut self, id: TimerId) {
        self.commands.push(Command::RemoveTimer(id));
    }

    pub fn set_background(&mut self, image: Image) {
        self.commands.push(Command::SetBackground(Some(image)));
    }

    pub fn clear_background(&mut self) {
        self.commands.push(Command::SetBackground(None));
    }

    pub fn pause(&mut self) {
        self.commands.push(Command::Pause);
    }

    pub fn unpause(&mut self) {
        self.commands.push(Command::Unpause);
    }

    pub fn quit(&mut self) {
        self.commands.push(Command::Quit);
    }
}

fn find_entity(slots: &[Slot], id: ObjectId) -> Option<&dyn Entity> {
    slots.iter().find(|s| s.id == id)?.entity.as_deref()
}

fn overlapping_in(slots: &[Slot], object: &Object) -> Vec<ObjectId> {
    let query = object.rect();
    let own = object.id();
    slots
        .iter()
        .filter(|slot| Some(slot.id) != own)
        .filter_map(|slot| Some((slot.id, slot.entity.as_deref()?.object())))
        .filter(|(_, other)| other.collideable && query.intersects(other.rect()))
        .map(|(id, _)| id)
        .collect()
}

fn owned_id(scene: SceneId, object: &Object) -> Result<ObjectId, SceneError> {
    match object.handle() {
        None => Err(SceneError::Detached),
        Some((owner, _)) if owner != scene => Err(SceneError::ForeignScene { owner, scene }),
        Some((_, id)) => Ok(id),
    }
}

/// A window's worth of game: objects, timers, background and input.
///
/// Objects live in a registry sorted by descending z-order; equal z-orders
/// keep the order they were added in. Drawing walks the registry front to
/// back, so the object with the lowest z-order is painted last and ends up
/// on top.
///
/// ```rust,ignore
/// let mut scene = Scene::new(640, 480);
/// scene.add(Sprite::new(320.0, 240.0, load_image("ship.png", true)?));
/// scene.begin(40)?;
/// ```
pub struct Scene {
    id: SceneId,
    config: SceneConfig,
    background: Option<Image>,

    slots: Vec<Slot>,
    next_seq: u64,
    timers: Vec<TimerSlot>,

    input: InputSnapshot,
    running: bool,
    paused: bool,

    context: Context,
}

impl Scene {
    /// A scene with default settings and a full [`Context`].
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(
            SceneConfig {
                width,
                height,
                ..SceneConfig::default()
            },
            Context::default(),
        )
    }

    /// A scene without audio or gamepads, for tests and tools.
    pub fn headless(width: u32, height: u32) -> Self {
        Self::with_config(
            SceneConfig {
                width,
                height,
                ..SceneConfig::default()
            },
            Context::headless(),
        )
    }

    pub fn with_config(config: SceneConfig, context: Context) -> Self {
        Self {
            id: SceneId::next(),
            config,
            background: None,
            slots: Vec::new(),
            next_seq: 0,
            timers: Vec::new(),
            input: InputSnapshot::default(),
            running: false,
            paused: false,
            context,
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.config.width as f32, self.config.height as f32)
    }

    pub fn clear_color(&self) -> Color {
        self.config.clear_color
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    // ── background ────────────────────────────────────────────────────────

    /// Drawn at the top-left corner under every object, from the next frame.
    pub fn set_background(&mut self, image: Image) {
        self.background = Some(image);
    }

    pub fn clear_background(&mut self) {
        self.background = None;
    }

    pub fn background(&self) -> Option<&Image> {
        self.background.as_ref()
    }

    // ── objects ───────────────────────────────────────────────────────────

    pub fn add<E: Entity>(&mut self, entity: E) -> ObjectId {
        self.add_boxed(Box::new(entity))
    }

    pub fn add_boxed(&mut self, entity: Box<dyn Entity>) -> ObjectId {
        let id = ObjectId::next();
        self.insert(id, entity);
        id
    }

    fn insert(&mut self, id: ObjectId, mut entity: Box<dyn Entity>) {
        entity.object_mut().attach(self.id, id);
        entity.object_mut().take_resort();
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots.push(Slot {
            id,
            seq,
            entity: Some(entity),
        });
        self.sort();
        log::debug!("scene {}: object {id} added", self.id);
    }

    /// Detaches the object and hands it back. `None` if it is not here.
    pub fn remove(&mut self, id: ObjectId) -> Option<Box<dyn Entity>> {
        let pos = self.position(id)?;
        let mut entity = self.slots.remove(pos).entity?;
        entity.object_mut().detach();
        log::debug!("scene {}: object {id} removed", self.id);
        Some(entity)
    }

    /// Removes the object `object` describes.
    ///
    /// Fails without touching any scene when `object` is detached or belongs
    /// to another scene.
    pub fn destroy(&mut self, object: &Object) -> Result<Option<Box<dyn Entity>>, SceneError> {
        let id = owned_id(self.id, object)?;
        Ok(self.remove(id))
    }

    /// Removes every object. Timers are kept.
    pub fn clear(&mut self) {
        for slot in self.slots.drain(..) {
            if let Some(mut entity) = slot.entity {
                entity.object_mut().detach();
            }
        }
        log::debug!("scene {}: cleared", self.id);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.position(id).is_some()
    }

    pub fn get<T: Entity>(&self, id: ObjectId) -> Option<&T> {
        find_entity(&self.slots, id).and_then(downcast_ref::<T>)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        find_entity(&self.slots, id).map(|e| e.object())
    }

    /// Runs `f` on the entity if it is a `T`. Z-order changes made inside
    /// are applied before this returns.
    pub fn with_entity_mut<T: Entity, R>(
        &mut self,
        id: ObjectId,
        f: impl FnOnce(&mut T) -> R,
    ) -> Option<R> {
        let pos = self.position(id)?;
        let entity = self.slots[pos].entity.as_deref_mut()?;
        let out = f(downcast_mut::<T>(entity)?);
        if entity.object_mut().take_resort() {
            self.sort();
        }
        Some(out)
    }

    /// Sets an object's z-order and re-sorts. `false` if it is not here.
    pub fn set_z_order(&mut self, id: ObjectId, z_order: f32) -> bool {
        let Some(entity) = self
            .position(id)
            .and_then(|pos| self.slots[pos].entity.as_deref_mut())
        else {
            return false;
        };
        entity.object_mut().set_z_order(z_order);
        entity.object_mut().take_resort();
        self.sort();
        true
    }

    /// Object ids in paint order (first drawn first).
    pub fn render_order(&self) -> Vec<ObjectId> {
        self.slots.iter().map(|s| s.id).collect()
    }

    /// Collideable objects in this scene overlapping `object`, excluding it.
    pub fn overlapping_objects(&self, object: &Object) -> Vec<ObjectId> {
        overlapping_in(&self.slots, object)
    }

    fn position(&self, id: ObjectId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }

    fn sort(&mut self) {
        self.slots
            .sort_by(|a, b| b.z().total_cmp(&a.z()).then(a.seq.cmp(&b.seq)));
    }

    // ── timers ────────────────────────────────────────────────────────────

    pub fn add_timer<T: TimerTask>(&mut self, task: T) -> TimerId {
        self.add_timer_boxed(Box::new(task))
    }

    pub fn add_timer_boxed(&mut self, task: Box<dyn TimerTask>) -> TimerId {
        let id = TimerId::next();
        self.insert_timer(id, task);
        id
    }

    fn insert_timer(&mut self, id: TimerId, mut task: Box<dyn TimerTask>) {
        task.timer_mut().set_scene(Some(self.id));
        self.timers.push(TimerSlot {
            id,
            task: Some(task),
        });
    }

    /// Unregisters a timer and hands it back. `None` if it is not here.
    pub fn remove_timer(&mut self, id: TimerId) -> Option<Box<dyn TimerTask>> {
        let pos = self.timers.iter().position(|t| t.id == id)?;
        let mut task = self.timers.remove(pos).task?;
        task.timer_mut().set_scene(None);
        log::debug!("scene {}: timer {id} removed", self.id);
        Some(task)
    }

    pub fn clear_timers(&mut self) {
        for slot in self.timers.drain(..) {
            if let Some(mut task) = slot.task {
                task.timer_mut().set_scene(None);
            }
        }
    }

    pub fn timer(&self, id: TimerId) -> Option<&Timer> {
        self.timers
            .iter()
            .find(|t| t.id == id)?
            .task
            .as_deref()
            .map(|task| task.timer())
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    // ── input & devices ───────────────────────────────────────────────────

    pub fn key_pressed(&self, key: Key) -> bool {
        self.input.key_pressed(key)
    }

    pub fn key_held(&self, key: Key) -> bool {
        self.input.key_held(key)
    }

    pub fn mouse_pos(&self) -> Vec2 {
        self.input.mouse_pos()
    }

    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.input.mouse_pressed(button)
    }

    /// First connected joystick. The gamepad backend opens on first call.
    pub fn get_joystick(&mut self) -> Option<Joystick<'_>> {
        self.context.joystick()
    }

    /// Plays a sound once; failures are logged, never returned.
    pub fn play_sfx(&mut self, path: impl AsRef<Path>) {
        self.context.play_sfx(path);
    }

    // ── run state ─────────────────────────────────────────────────────────

    /// Skips the update pass until [`unpause`](Self::unpause). Input and
    /// drawing continue.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn unpause(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ends [`begin`](Self::begin) after the current frame and stops every
    /// timer: registered ones and those driven by objects.
    pub fn quit(&mut self) {
        self.running = false;
        for entity in self.slots.iter_mut().filter_map(|s| s.entity.as_deref_mut()) {
            if let Some(timer) = entity.timer_mut() {
                timer.stop();
            }
        }
        for task in self.timers.iter_mut().filter_map(|t| t.task.as_deref_mut()) {
            task.timer_mut().stop();
        }
        log::debug!("scene {}: quit", self.id);
    }

    /// Opens the window and runs the frame loop at up to `fps` frames per
    /// second (0 for uncapped) until [`quit`](Self::quit) or the window is
    /// closed.
    ///
    /// Sound and gamepads stay open afterwards; they are released when the
    /// scene is dropped. A fatal surface error is returned.
    pub fn begin(&mut self, fps: u32) -> anyhow::Result<()> {
        self.running = true;
        log::info!(
            "scene {}: starting \"{}\" at {} fps",
            self.id,
            self.config.title,
            fps
        );
        let result = crate::app::run(self, fps);
        self.running = false;
        result
    }

    // ── frame steps ───────────────────────────────────────────────────────

    /// Folds this frame's input into the scene. A close request quits.
    pub fn handle_events(&mut self, events: &[InputEvent]) {
        for event in events {
            if self.input.apply(event) {
                self.quit();
            }
        }
        self.context.poll_gamepads();
    }

    /// The update pass: every object in registry order, then every
    /// registered timer. Does nothing while paused.
    pub fn update(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        self.update_entities(dt);
        self.update_timers(dt);
    }

    fn update_entities(&mut self, dt: f32) {
        let ids: Vec<ObjectId> = self.slots.iter().map(|s| s.id).collect();
        let size = self.size();

        for id in ids {
            // Removed earlier in this pass.
            let Some(pos) = self.position(id) else { continue };
            let Some(mut entity) = self.slots[pos].entity.take() else { continue };

            let mut commands = Vec::new();
            {
                let mut ctx = UpdateCtx {
                    scene: self.id,
                    size,
                    paused: self.paused,
                    slots: &self.slots,
                    input: &self.input,
                    context: &mut self.context,
                    commands: &mut commands,
                };
                entity.update(&mut ctx, dt);
            }

            let resort = entity.object_mut().take_resort();
            self.slots[pos].entity = Some(entity);
            if resort {
                self.sort();
            }
            self.apply(commands);
        }
    }

    fn update_timers(&mut self, dt: f32) {
        let ids: Vec<TimerId> = self.timers.iter().map(|t| t.id).collect();
        let size = self.size();

        for id in ids {
            let Some(pos) = self.timers.iter().position(|t| t.id == id) else { continue };
            let Some(mut task) = self.timers[pos].task.take() else { continue };

            let mut commands = Vec::new();
            if task.timer_mut().advance(dt) {
                let mut ctx = UpdateCtx {
                    scene: self.id,
                    size,
                    paused: self.paused,
                    slots: &self.slots,
                    input: &self.input,
                    context: &mut self.context,
                    commands: &mut commands,
                };
                task.tick(&mut ctx);
            }

            self.timers[pos].task = Some(task);
            self.apply(commands);
        }
    }

    fn apply(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Spawn(id, entity) => self.insert(id, entity),
                Command::Remove(id) => {
                    self.remove(id);
                }
                Command::SetZOrder(id, z) => {
                    if !self.set_z_order(id, z) {
                        log::debug!("scene {}: z-order for missing object {id:?}", self.id);
                    }
                }
                Command::AddTimer(id, task) => self.insert_timer(id, task),
                Command::RemoveTimer(id) => {
                    self.remove_timer(id);
                }
                Command::SetBackground(image) => self.background = image,
                Command::Pause => self.paused = true,
                Command::Unpause => self.paused = false,
                Command::Quit => self.quit(),
            }
        }
    }

    /// Records the background and every object, in paint order.
    pub fn draw(&self, list: &mut DrawList) {
        if let Some(background) = &self.background {
            list.push(
                ZIndex::BACKGROUND,
                SpriteCmd::at_top_left(background.texture().clone(), Vec2::zero()),
            );
        }
        for slot in &self.slots {
            if let Some(cmd) = slot.entity.as_deref().and_then(|e| e.object().draw_cmd()) {
                list.push(ZIndex::OBJECTS, cmd);
            }
        }
    }

    /// One headless frame: input, update, then a fresh draw list.
    pub fn step(&mut self, events: &[InputEvent], dt: f32, list: &mut DrawList) {
        self.handle_events(events);
        self.update(dt);
        list.clear();
        self.draw(list);
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.context.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use sprig_engine::input::KeyState;

    use super::*;
    use crate::sprite::Sprite;
    use crate::timer::Interval;

    fn block(x: f32, y: f32) -> Sprite {
        Sprite::new(x, y, Image::solid(10, 10, Color::WHITE))
    }

    fn with_z(z: f32) -> Object {
        let mut obj = Object::with_surface(0.0, 0.0, Image::solid(1, 1, Color::WHITE), true);
        obj.set_z_order(z);
        obj
    }

    #[test]
    fn registry_is_sorted_by_descending_z_with_stable_ties() {
        let mut scene = Scene::headless(100, 100);
        let a = scene.add(with_z(1.0));
        let b = scene.add(with_z(5.0));
        let c = scene.add(with_z(1.0));
        let d = scene.add(with_z(-2.0));

        assert_eq!(scene.render_order(), vec![b, a, c, d]);

        assert!(scene.set_z_order(d, 10.0));
        assert_eq!(scene.render_order(), vec![d, b, a, c]);

        scene.with_entity_mut::<Object, _>(b, |o| o.set_z_order(0.0));
        assert_eq!(scene.render_order(), vec![d, a, c, b]);
    }

    #[test]
    fn remove_hands_the_entity_back_detached() {
        let mut scene = Scene::headless(100, 100);
        let id = scene.add(block(0.0, 0.0));
        let removed = scene.remove(id).expect("present");
        assert!(removed.object().scene().is_none());
        assert!(scene.is_empty());
        assert!(scene.remove(id).is_none());
    }

    #[test]
    fn destroy_checks_ownership() {
        let mut scene = Scene::headless(100, 100);
        let mut other = Scene::headless(100, 100);
        other.add(block(0.0, 0.0));

        let detached = Object::new(0.0, 0.0, true);
        assert_eq!(scene.destroy(&detached).err(), Some(SceneError::Detached));

        let foreign_id = scene.add(block(0.0, 0.0));
        let foreign = scene.object(foreign_id).expect("added");
        let err = other.destroy(foreign).err();
        assert!(matches!(err, Some(SceneError::ForeignScene { .. })));
        assert_eq!(other.len(), 1);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn overlapping_skips_self_and_non_collideable() {
        let mut scene = Scene::headless(100, 100);
        let me = scene.add(block(0.0, 0.0));
        let near = scene.add(block(5.0, 5.0));
        scene.add(block(5.0, 5.0).with_collideable(false));
        scene.add(block(50.0, 50.0));

        let hits = scene.overlapping_objects(scene.object(me).expect("added"));
        assert_eq!(hits, vec![near]);
    }

    #[test]
    fn background_is_drawn_first_at_the_top_left() {
        let mut scene = Scene::headless(100, 100);
        scene.add(block(50.0, 50.0));
        scene.set_background(Image::solid(100, 100, Color::BLACK));

        let mut list = DrawList::new();
        scene.draw(&mut list);
        let centers: Vec<Vec2> = list.iter_in_paint_order().map(|i| i.cmd.center).collect();
        assert_eq!(centers, vec![Vec2::new(50.0, 50.0), Vec2::new(50.0, 50.0)]);
        assert_eq!(list.iter_in_paint_order().next().map(|i| i.cmd.size.x), Some(100.0));
    }

    #[test]
    fn registered_timers_tick_and_can_be_removed() {
        let mut scene = Scene::headless(100, 100);
        let id = scene.add_timer(Interval::new(1.0, |ctx| {
            ctx.spawn(Object::new(0.0, 0.0, false));
        }));
        assert_eq!(scene.timer(id).and_then(Timer::scene), Some(scene.id()));

        scene.update(0.6);
        assert!(scene.is_empty());
        scene.update(0.6);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.timer(id).map(Timer::counter), Some(0.0));

        let task = scene.remove_timer(id).expect("registered");
        assert!(task.timer().scene().is_none());
        assert!(scene.remove_timer(id).is_none());
    }

    #[test]
    fn quit_stops_every_timer() {
        let mut scene = Scene::headless(100, 100);
        let id = scene.add_timer(Interval::new(1.0, |_| {}));
        scene.quit();
        assert!(!scene.is_running());
        assert_eq!(scene.timer(id).map(Timer::is_running), Some(false));
    }

    #[test]
    fn close_request_quits() {
        let mut scene = Scene::headless(100, 100);
        scene.running = true;
        scene.handle_events(&[
            InputEvent::key(Key::A, KeyState::Pressed),
            InputEvent::CloseRequested,
        ]);
        assert!(!scene.is_running());
        assert!(scene.key_pressed(Key::A));
    }

    #[test]
    fn timers_can_reorder_objects() {
        let mut scene = Scene::headless(100, 100);
        let a = scene.add(with_z(2.0));
        let b = scene.add(with_z(1.0));
        scene.add_timer(Interval::new(0.5, move |ctx| ctx.set_z_order(b, 3.0)));

        scene.update(0.6);
        assert_eq!(scene.render_order(), vec![b, a]);
        assert_eq!(scene.object(b).map(Object::z_order), Some(3.0));
    }

    #[test]
    fn quitting_keeps_the_context_open() {
        let mut scene = Scene::new(100, 100);
        let sound = scene.context().sound_enabled();
        let gamepads = scene.context().gamepads_enabled();

        scene.running = true;
        scene.handle_events(&[InputEvent::CloseRequested]);

        assert!(!scene.is_running());
        assert_eq!(scene.context().sound_enabled(), sound);
        assert_eq!(scene.context().gamepads_enabled(), gamepads);
    }
}
