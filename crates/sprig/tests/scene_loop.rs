use std::cell::RefCell;
use std::rc::Rc;

use sprig::prelude::*;
use sprig_engine::input::{InputEvent, KeyState};
use sprig_engine::scene::DrawList;

fn square(x: f32, y: f32, size: u32) -> Sprite {
    Sprite::new(x, y, Image::solid(size, size, Color::WHITE))
}

/// Records its tag every time it is updated.
struct Recorder {
    object: Object,
    tag: u32,
    log: Rc<RefCell<Vec<u32>>>,
}

impl Recorder {
    fn new(tag: u32, z: f32, log: &Rc<RefCell<Vec<u32>>>) -> Self {
        let mut object = Object::with_surface(0.0, 0.0, Image::solid(4, 4, Color::WHITE), false);
        object.set_z_order(z);
        Self {
            object,
            tag,
            log: Rc::clone(log),
        }
    }
}

impl Entity for Recorder {
    fn object(&self) -> &Object {
        &self.object
    }

    fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }

    fn update(&mut self, _ctx: &mut UpdateCtx<'_>, _dt: f32) {
        self.log.borrow_mut().push(self.tag);
    }
}

/// Moves right; removes whatever it touches and then itself.
struct Bullet {
    sprite: Sprite,
    speed: f32,
}

impl Entity for Bullet {
    fn object(&self) -> &Object {
        self.sprite.object()
    }

    fn object_mut(&mut self) -> &mut Object {
        self.sprite.object_mut()
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>, dt: f32) {
        self.sprite.x += self.speed * dt;
        let hits = ctx.overlapping_objects(self.object());
        if hits.is_empty() {
            return;
        }
        for id in hits {
            ctx.remove(id);
        }
        ctx.destroy(self.sprite.object()).expect("bullet is in this scene");
    }
}

/// Spawns a marker on the first update and remembers its id.
struct Spawner {
    object: Object,
    spawned: Option<ObjectId>,
}

impl Entity for Spawner {
    fn object(&self) -> &Object {
        &self.object
    }

    fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>, _dt: f32) {
        if self.spawned.is_none() {
            self.spawned = Some(ctx.spawn(square(1.0, 1.0, 2)));
            ctx.set_background(Image::solid(8, 8, Color::BLACK));
        }
    }
}

#[test]
fn entities_update_in_registry_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut scene = Scene::headless(64, 64);
    scene.add(Recorder::new(1, 0.0, &log));
    scene.add(Recorder::new(2, 9.0, &log));
    scene.add(Recorder::new(3, 0.0, &log));

    scene.update(0.016);
    assert_eq!(*log.borrow(), vec![2, 1, 3]);
}

#[test]
fn render_order_follows_every_z_change() {
    let mut scene = Scene::headless(64, 64);
    let low = scene.add(square(0.0, 0.0, 4));
    let high = scene.add(square(0.0, 0.0, 4));
    scene.set_z_order(high, 3.0);
    assert_eq!(scene.render_order(), vec![high, low]);

    scene.with_entity_mut::<Sprite, _>(low, |s| s.set_z_order(7.0));
    assert_eq!(scene.render_order(), vec![low, high]);

    let z: Vec<f32> = scene
        .render_order()
        .into_iter()
        .filter_map(|id| scene.object(id).map(Object::z_order))
        .collect();
    assert!(z.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn bullet_removes_what_it_hits_and_itself() {
    let mut scene = Scene::headless(200, 50);
    let target = scene.add(square(30.0, 10.0, 10));
    let bystander = scene.add(square(150.0, 10.0, 10));
    let bullet = scene.add(Bullet {
        sprite: square(0.0, 10.0, 4),
        speed: 100.0,
    });

    scene.update(0.1);
    assert!(scene.contains(bullet));
    assert!(scene.contains(target));

    scene.update(0.15);
    assert!(!scene.contains(target));
    assert!(!scene.contains(bullet));
    assert!(scene.contains(bystander));
}

#[test]
fn spawned_objects_and_background_apply_after_update() {
    let mut scene = Scene::headless(8, 8);
    let spawner = scene.add(Spawner {
        object: Object::new(0.0, 0.0, false),
        spawned: None,
    });

    let mut list = DrawList::new();
    scene.step(&[], 0.016, &mut list);

    let spawned = scene
        .get::<Spawner>(spawner)
        .and_then(|s| s.spawned)
        .expect("spawned on first update");
    assert!(scene.contains(spawned));
    assert_eq!(scene.object(spawned).and_then(Object::scene), Some(scene.id()));
    assert!(scene.background().is_some());
    // Background plus the spawned square; the spawner has no surface.
    assert_eq!(list.len(), 2);
}

#[test]
fn destroy_rejects_foreign_and_detached_objects() {
    let mut first = Scene::headless(10, 10);
    let mut second = Scene::headless(10, 10);
    let id = first.add(square(0.0, 0.0, 2));
    second.add(square(0.0, 0.0, 2));

    let object = first.object(id).expect("added");
    assert_eq!(
        second.destroy(object).err(),
        Some(SceneError::ForeignScene {
            owner: first.id(),
            scene: second.id(),
        })
    );
    assert_eq!(second.len(), 1);

    let removed = first.remove(id).expect("present");
    assert_eq!(
        first.destroy(removed.object()).err(),
        Some(SceneError::Detached)
    );
}

#[test]
fn non_repeating_animation_removes_itself() {
    let frames = (1..=3).map(|w| Image::solid(w, 2, Color::WHITE)).collect();
    let mut scene = Scene::headless(10, 10);
    let id = scene.add(Animation::new(5.0, 5.0, frames, false, 0.1).expect("frames"));

    scene.update(0.15);
    assert_eq!(scene.get::<Animation>(id).map(Animation::frame), Some(1));
    scene.update(0.15);
    assert_eq!(scene.get::<Animation>(id).map(Animation::frame), Some(2));
    scene.update(0.15);
    assert!(!scene.contains(id));

    scene.update(0.15);
    assert!(scene.is_empty());
}

#[test]
fn timer_fires_once_counter_passes_the_interval() {
    let fired = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&fired);
    let mut scene = Scene::headless(10, 10);
    scene.add_timer(Interval::new(1.0, move |_| *counter.borrow_mut() += 1));

    scene.update(0.6);
    assert_eq!(*fired.borrow(), 0);
    scene.update(0.6);
    assert_eq!(*fired.borrow(), 1);
    scene.update(0.6);
    assert_eq!(*fired.borrow(), 1);
}

#[test]
fn paused_scene_skips_updates_but_tracks_input() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut scene = Scene::headless(10, 10);
    scene.add(Recorder::new(1, 0.0, &log));
    scene.pause();

    let mut list = DrawList::new();
    scene.step(&[InputEvent::key(Key::P, KeyState::Pressed)], 0.016, &mut list);
    assert!(log.borrow().is_empty());
    assert!(scene.key_pressed(Key::P));
    assert_eq!(list.len(), 1);

    scene.unpause();
    scene.update(0.016);
    assert_eq!(*log.borrow(), vec![1]);
}

#[test]
fn quit_stops_object_and_registered_timers() {
    let frames = vec![Image::solid(1, 1, Color::WHITE); 2];
    let mut scene = Scene::headless(10, 10);
    let anim = scene.add(Animation::new(0.0, 0.0, frames, true, 0.1).expect("frames"));
    let timer = scene.add_timer(Interval::new(0.5, |_| {}));

    scene.quit();

    assert!(!scene.is_running());
    assert_eq!(scene.timer(timer).map(Timer::is_running), Some(false));
    assert_eq!(
        scene.get::<Animation>(anim).map(|a| a.timer().is_running()),
        Some(false)
    );
}
