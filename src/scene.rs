//! The entity list, its camera and the per-pass hook context.
//!
//! A [`Scene`] owns its entities in a flat list, each optionally paired with
//! a [`Behavior`]. Passes walk the list in order and hand every hook a
//! [`Frame`]: the hooked entity mutably, every *other* entity read-only, the
//! input snapshot, the clock and the camera. Spawns and despawns requested
//! through the frame are queued and applied once the pass is over, so the
//! list never changes under an iterating pass.

use crate::components::hitbox::CollisionSide;
use crate::components::sprite::Sprite;
use crate::components::tags::{DEFAULT_TAG, Tags};
use crate::entity::{Behavior, Entity, EntityId};
use crate::resources::camera2d::{Camera, DEFAULT_TRAP_SIZE};
use crate::resources::input::InputState;
use crate::resources::tilemap::{LayerKind, MapObject, Tilemap};
use crate::resources::worldtime::WorldTime;
use crate::systems::render::{DrawList, render_order};

/// Tile size used until a map says otherwise.
pub const DEFAULT_TILESIZE: u32 = 16;

pub(crate) struct Slot {
    pub(crate) entity: Entity,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
}

/// Spawns and despawns requested during a pass.
#[derive(Default)]
pub struct SceneCommands {
    spawns: Vec<(Entity, Option<Box<dyn Behavior>>)>,
    despawns: Vec<EntityId>,
}

impl SceneCommands {
    pub fn is_empty(&self) -> bool {
        self.spawns.is_empty() && self.despawns.is_empty()
    }
}

/// Context handed to a behavior hook.
pub struct Frame<'a> {
    pub input: &'a InputState,
    pub time: &'a WorldTime,
    pub camera: &'a mut Camera,
    before: &'a [Slot],
    after: &'a [Slot],
    commands: &'a mut SceneCommands,
}

impl<'a> Frame<'a> {
    /// Milliseconds since the previous frame.
    pub fn dt(&self) -> f32 {
        self.time.delta
    }

    /// Every entity in the scene except the one being updated.
    pub fn others(&self) -> impl Iterator<Item = &'a Entity> + use<'a> {
        let (before, after) = (self.before, self.after);
        before.iter().chain(after.iter()).map(|slot| &slot.entity)
    }

    /// Other entities carrying `tag`.
    pub fn get_all<'t>(&self, tag: &'t str) -> impl Iterator<Item = &'a Entity> + use<'a, 't> {
        self.others().filter(move |e| e.has_tag(tag))
    }

    pub fn get(&self, id: EntityId) -> Option<&'a Entity> {
        self.others().find(|e| e.id == id)
    }

    /// Push `entity` out of every other entity tagged `tag`.
    ///
    /// See [`Entity::bounce`].
    pub fn bounce(&self, entity: &mut Entity, tag: &str) -> CollisionSide {
        entity.bounce(tag, self.others())
    }

    /// Queue an entity to be added once the pass finishes.
    pub fn spawn(&mut self, entity: Entity, behavior: Option<Box<dyn Behavior>>) {
        self.commands.spawns.push((entity, behavior));
    }

    /// Queue an entity for removal once the pass finishes.
    pub fn despawn(&mut self, id: EntityId) {
        self.commands.despawns.push(id);
    }
}

pub struct Scene {
    slots: Vec<Slot>,
    next_id: u64,
    pub camera: Camera,
    pub tilesize: u32,
    /// Scene size in pixels, set by [`Scene::load_tilemap`].
    pub width: f32,
    pub height: f32,
    /// Object-group objects of the loaded map.
    pub objects: Vec<MapObject>,
}

impl Scene {
    /// Empty scene whose camera looks through a `view_width x view_height`
    /// canvas.
    pub fn new(view_width: f32, view_height: f32) -> Self {
        Self {
            slots: Vec::new(),
            next_id: 1,
            camera: Camera::new(
                0.0,
                0.0,
                DEFAULT_TRAP_SIZE,
                DEFAULT_TRAP_SIZE,
                view_width,
                view_height,
            ),
            tilesize: DEFAULT_TILESIZE,
            width: 0.0,
            height: 0.0,
            objects: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Add an entity without behavior.
    pub fn add(&mut self, entity: Entity) -> EntityId {
        self.spawn(entity, None)
    }

    /// Add an entity, running the behavior's `init` hook first.
    pub fn spawn(&mut self, mut entity: Entity, mut behavior: Option<Box<dyn Behavior>>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.id = id;
        if let Some(behavior) = behavior.as_mut() {
            behavior.init(&mut entity);
        }
        self.slots.push(Slot { entity, behavior });
        id
    }

    /// Remove an entity. Absent ids are ignored.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.slots.iter().position(|s| s.entity.id == id)?;
        Some(self.slots.remove(index).entity)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.objects.clear();
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities_mut().find(|e| e.id == id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().map(|s| &s.entity)
    }

    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.slots.iter_mut().map(|s| &mut s.entity)
    }

    pub fn get_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities().filter(move |e| e.has_tag(tag))
    }

    /// Update pass: `on_update`, `input`, then integrate velocity, per entity.
    pub fn update(&mut self, input: &InputState, time: &WorldTime) {
        self.run_pass(input, time, |behavior, entity, frame| {
            if let Some(behavior) = behavior {
                behavior.on_update(entity, frame);
                behavior.input(entity, frame);
            }
            entity.update_pos(frame.time);
        });
    }

    /// Fixed pass: `fixed_update` per entity.
    pub fn fixed_update(&mut self, input: &InputState, time: &WorldTime) {
        self.run_pass(input, time, |behavior, entity, frame| {
            if let Some(behavior) = behavior {
                behavior.fixed_update(entity, frame);
            }
        });
    }

    /// Stable sort into painter's order.
    pub fn sort_for_render(&mut self) {
        self.slots.sort_by(|a, b| render_order(&a.entity, &b.entity));
    }

    /// Draw pass: each entity's `draw` hook, in list order.
    pub fn draw(&self, list: &mut DrawList) {
        for slot in &self.slots {
            match &slot.behavior {
                Some(behavior) => behavior.draw(&slot.entity, list),
                None => list.entity(&slot.entity),
            }
        }
    }

    fn run_pass<F>(&mut self, input: &InputState, time: &WorldTime, mut hook: F)
    where
        F: FnMut(Option<&mut Box<dyn Behavior>>, &mut Entity, &mut Frame<'_>),
    {
        let mut commands = SceneCommands::default();
        for i in 0..self.slots.len() {
            let (before, rest) = self.slots.split_at_mut(i);
            let Some((current, after)) = rest.split_first_mut() else {
                break;
            };
            let mut frame = Frame {
                input,
                time,
                camera: &mut self.camera,
                before,
                after,
                commands: &mut commands,
            };
            hook(current.behavior.as_mut(), &mut current.entity, &mut frame);
        }
        self.apply(commands);
    }

    fn apply(&mut self, commands: SceneCommands) {
        if commands.is_empty() {
            return;
        }
        for id in commands.despawns {
            self.remove(id);
        }
        for (entity, behavior) in commands.spawns {
            self.spawn(entity, behavior);
        }
    }

    /// Build tile entities and map objects from a parsed Tiled map.
    ///
    /// `tileset` holds the sprites sliced from the map's first tileset. Each
    /// non-empty cell of a tile layer becomes a `tilesize` square entity on
    /// draw layer = layer index, tagged with the layer name. Cells whose gid
    /// falls outside `tileset` get no sprite but still collide. Hidden layers
    /// are loaded without sprites. Returns the number of tile entities added.
    pub fn load_tilemap(&mut self, map: &Tilemap, tileset: &[Sprite]) -> usize {
        self.tilesize = map.tilewidth;
        self.width = map.pixel_width();
        self.height = map.pixel_height();
        self.objects = map.objects();

        let first_tileset = map.first_tileset();
        let size = self.tilesize;
        let mut spawned = 0;

        for (index, layer) in map.layers.iter().enumerate() {
            match layer.kind {
                LayerKind::Tilelayer => {
                    for (col, row, gid) in layer.tiles(map.width) {
                        let sprite = if layer.visible {
                            first_tileset
                                .and_then(|ts| ts.local_index(gid))
                                .and_then(|i| tileset.get(i))
                                .cloned()
                        } else {
                            None
                        };
                        let (x, y) = (col as f32 * size as f32, row as f32 * size as f32);
                        let mut tile = Entity::new(x, y, size, size)
                            .with_layer(index as i32)
                            .with_tags(Tags::from_iter([DEFAULT_TAG, layer.name.as_str()]));
                        tile.sprite = sprite;
                        self.add(tile);
                        spawned += 1;
                    }
                }
                LayerKind::Objectgroup => {}
                other => {
                    log::debug!("Skipping layer '{}' of kind {:?}", layer.name, other);
                }
            }
        }

        log::info!(
            "Loaded tilemap {}x{} ({} tiles, {} objects)",
            map.width,
            map.height,
            spawned,
            self.objects.len()
        );
        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::hitbox::Hitbox;

    struct Falling;

    impl Behavior for Falling {
        fn fixed_update(&mut self, entity: &mut Entity, _frame: &mut Frame<'_>) {
            entity.yv += 1.0;
        }
    }

    struct Spawner {
        done: bool,
    }

    impl Behavior for Spawner {
        fn on_update(&mut self, _entity: &mut Entity, frame: &mut Frame<'_>) {
            if !self.done {
                frame.spawn(Entity::new(0.0, 0.0, 4, 4).with_tag("bullet"), None);
                self.done = true;
            }
        }
    }

    struct Lander {
        landed: CollisionSide,
    }

    impl Behavior for Lander {
        fn on_update(&mut self, entity: &mut Entity, frame: &mut Frame<'_>) {
            self.landed = frame.bounce(entity, "solid");
            entity.layer = if self.landed == CollisionSide::Bottom { 5 } else { 1 };
        }
    }

    #[test]
    fn test_new_scene_defaults() {
        let scene = Scene::new(600.0, 600.0);
        assert!(scene.is_empty());
        assert_eq!(scene.tilesize, DEFAULT_TILESIZE);
        assert_eq!((scene.camera.x, scene.camera.y), (0.0, 0.0));
        assert_eq!((scene.camera.trap.w, scene.camera.trap.h), (100.0, 100.0));
    }

    #[test]
    fn test_ids_are_unique_and_remove_is_idempotent() {
        let mut scene = Scene::new(100.0, 100.0);
        let a = scene.add(Entity::default());
        let b = scene.add(Entity::default());
        assert_ne!(a, b);
        assert!(scene.remove(a).is_some());
        assert!(scene.remove(a).is_none());
        assert_eq!(scene.len(), 1);
        assert!(scene.get(b).is_some());
    }

    #[test]
    fn test_update_integrates_velocity() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = scene.add(Entity::default().with_velocity(1.0, 2.0));
        scene.update(&InputState::default(), &WorldTime::with_delta(20.0));
        let e = scene.get(id).unwrap();
        assert_eq!((e.x, e.y), (2.0, 4.0));
    }

    #[test]
    fn test_fixed_update_runs_hook_without_moving() {
        let mut scene = Scene::new(100.0, 100.0);
        let id = scene.spawn(Entity::default(), Some(Box::new(Falling)));
        scene.fixed_update(&InputState::default(), &WorldTime::with_delta(20.0));
        let e = scene.get(id).unwrap();
        assert_eq!(e.yv, 1.0);
        assert_eq!(e.y, 0.0);
    }

    #[test]
    fn test_spawn_applied_after_pass() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.spawn(Entity::default(), Some(Box::new(Spawner { done: false })));
        scene.update(&InputState::default(), &WorldTime::with_delta(10.0));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get_all("bullet").count(), 1);
        scene.update(&InputState::default(), &WorldTime::with_delta(10.0));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_hook_sees_other_entities() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.add(Entity::new(0.0, 50.0, 100, 10).with_tag("solid"));
        let id = scene.spawn(
            Entity::new(20.0, 42.0, 10, 10),
            Some(Box::new(Lander {
                landed: CollisionSide::None,
            })),
        );
        scene.update(&InputState::default(), &WorldTime::with_delta(0.0));
        let e = scene.get(id).unwrap();
        assert_eq!(e.y, 40.0);
        assert_eq!(e.layer, 5);
    }

    #[test]
    fn test_sort_for_render_orders_by_layer_then_feet() {
        let mut scene = Scene::new(100.0, 100.0);
        let top = scene.add(Entity::new(0.0, 10.0, 10, 10).with_layer(2));
        let bottom = scene.add(Entity::new(0.0, 0.0, 10, 10).with_layer(1));
        let front = scene.add(Entity::new(0.0, 50.0, 10, 10).with_layer(1));
        scene.sort_for_render();
        let order: Vec<_> = scene.entities().map(|e| e.id).collect();
        assert_eq!(order, vec![bottom, front, top]);
    }

    #[test]
    fn test_load_tilemap_builds_tiles() {
        let map = Tilemap::from_json_str(
            r#"{
                "width": 2, "height": 2, "tilewidth": 8, "tileheight": 8,
                "tilesets": [{ "firstgid": 1, "image": "t.png" }],
                "layers": [
                    { "name": "ground", "type": "tilelayer", "data": [0, 1, 2, 9] },
                    { "name": "things", "type": "objectgroup",
                      "objects": [{ "name": "player", "x": 3, "y": 4 }] }
                ]
            }"#,
        )
        .unwrap();
        let sheet = crate::components::sprite::slice_sheet("t", 16, 8, 8);
        let mut scene = Scene::new(100.0, 100.0);

        let spawned = scene.load_tilemap(&map, &sheet);

        assert_eq!(spawned, 3);
        assert_eq!(scene.tilesize, 8);
        assert_eq!((scene.width, scene.height), (16.0, 16.0));
        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.objects[0].layer, "things");

        let tiles: Vec<_> = scene.get_all("ground").collect();
        assert_eq!(tiles.len(), 3);
        assert_eq!((tiles[0].x, tiles[0].y), (8.0, 0.0));
        assert_eq!((tiles[1].x, tiles[1].y), (0.0, 8.0));
        assert_eq!(tiles[0].layer, 0);
        assert!(tiles[0].has_tag("Entity"));
        assert_eq!(tiles[0].sprite.as_ref().map(|s| s.offset.x), Some(0.0));
        assert_eq!(tiles[1].sprite.as_ref().map(|s| s.offset.x), Some(8.0));
        // gid 9 is outside the two-tile sheet
        assert!(tiles[2].sprite.is_none());
    }

    #[test]
    fn test_load_tilemap_hidden_layer_collides_without_sprites() {
        let map = Tilemap::from_json_str(
            r#"{
                "width": 2, "height": 1, "tilewidth": 8, "tileheight": 8,
                "tilesets": [{ "firstgid": 1, "image": "t.png" }],
                "layers": [
                    { "name": "solid", "type": "tilelayer", "data": [1, 2], "visible": false }
                ]
            }"#,
        )
        .unwrap();
        let sheet = crate::components::sprite::slice_sheet("t", 16, 8, 8);
        let mut scene = Scene::new(100.0, 100.0);

        assert_eq!(scene.load_tilemap(&map, &sheet), 2);
        let tiles: Vec<_> = scene.get_all("solid").collect();
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|t| t.sprite.is_none()));
        assert_eq!(tiles[1].hitbox(), Hitbox::new(8.0, 0.0, 8.0, 8.0));
    }
}
