//! Tiled map loading into a scene, from a file on disk through to collision
//! and drawing.

use std::path::{Path, PathBuf};

use raylib::prelude::KeyboardKey;

use lemonengine::components::sprite::slice_sheet;
use lemonengine::game::{PLAYER_TAG, SOLID_TAG, spawn_player};
use lemonengine::lemon::load_json;
use lemonengine::resources::input::InputState;
use lemonengine::resources::tilemap::Tilemap;
use lemonengine::resources::worldtime::WorldTime;
use lemonengine::scene::Scene;
use lemonengine::systems::render::{DrawCmd, DrawList};

/// 6x4 room of 16px tiles: a floor layer, a solid border and a spawn point.
const ROOM: &str = r#"{
    "width": 6, "height": 4, "tilewidth": 16, "tileheight": 16,
    "tilesets": [{ "firstgid": 1, "name": "dungeon", "image": "img/dungeon.png" }],
    "layers": [
        { "name": "floor", "type": "tilelayer",
          "data": [0,0,0,0,0,0, 0,2,2,2,2,0, 0,2,2,2,2,0, 0,0,0,0,0,0] },
        { "name": "solid", "type": "tilelayer",
          "data": [1,1,1,1,1,1, 1,0,0,0,0,1, 1,0,0,0,0,1, 1,1,1,1,1,1] },
        { "name": "markers", "type": "objectgroup",
          "objects": [{ "id": 1, "name": "player", "type": "spawn", "x": 20, "y": 20, "width": 0, "height": 0 }] }
    ]
}"#;

fn write_map(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lemon_tilemap_{}", name));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("room.json");
    std::fs::write(&path, ROOM).unwrap();
    path
}

fn load_room(name: &str) -> Scene {
    let path = write_map(name);
    let map = Tilemap::load_from_file(&path).unwrap();
    let tileset = map.first_tileset().unwrap();
    let image = tileset
        .image_path(path.parent().unwrap_or(Path::new(".")))
        .unwrap();
    // 32x16 sheet: two tiles
    let sprites = slice_sheet(&image.to_string_lossy(), 32, 16, tileset.tile_size(&map));
    let mut scene = Scene::new(96.0, 64.0);
    scene.load_tilemap(&map, &sprites);
    scene
}

#[test]
fn map_file_becomes_tile_entities() {
    let scene = load_room("entities");
    assert_eq!(scene.get_all("floor").count(), 8);
    assert_eq!(scene.get_all(SOLID_TAG).count(), 16);
    assert_eq!((scene.width, scene.height), (96.0, 64.0));
    assert_eq!(scene.tilesize, 16);

    let floor = scene.get_all("floor").next().unwrap();
    assert_eq!((floor.x, floor.y), (16.0, 16.0));
    assert_eq!(floor.layer, 0);
    let sprite = floor.sprite.as_ref().unwrap();
    assert_eq!(sprite.offset.x, 16.0);
    assert!(sprite.tex_key.ends_with("dungeon.png"));

    let wall = scene.get_all(SOLID_TAG).next().unwrap();
    assert_eq!(wall.layer, 1);
    assert_eq!(wall.sprite.as_ref().unwrap().offset.x, 0.0);
}

#[test]
fn map_objects_place_the_player() {
    let mut scene = load_room("objects");
    assert_eq!(scene.objects.len(), 1);
    assert_eq!(scene.objects[0].class, "spawn");

    spawn_player(&mut scene);
    let player = scene.get_all(PLAYER_TAG).next().unwrap();
    assert_eq!((player.x, player.y), (20.0, 20.0));
}

#[test]
fn player_cannot_leave_the_room() {
    let mut scene = load_room("walls");
    spawn_player(&mut scene);

    let mut input = InputState::default();
    input.set_key(KeyboardKey::KEY_A, true);
    input.set_key(KeyboardKey::KEY_W, true);
    for _ in 0..100 {
        scene.update(&input, &WorldTime::with_delta(10.0));
    }

    let player = scene.get_all(PLAYER_TAG).next().unwrap();
    assert!(player.x >= 16.0 - 2.0, "x = {}", player.x);
    assert!(player.y >= 16.0 - 2.0, "y = {}", player.y);
}

#[test]
fn tiles_draw_in_layer_order() {
    let mut scene = load_room("draw");
    scene.sort_for_render();
    let mut list = DrawList::culled_to(scene.camera.view_rect());
    scene.draw(&mut list);

    assert_eq!(list.world.len(), 24);
    let first_wall = list
        .world
        .iter()
        .position(|c| matches!(c, DrawCmd::Sprite { source, .. } if source.x == 0.0))
        .unwrap();
    let last_floor = list
        .world
        .iter()
        .rposition(|c| matches!(c, DrawCmd::Sprite { source, .. } if source.x == 16.0))
        .unwrap();
    assert!(last_floor < first_wall);
}

#[test]
fn load_json_gives_raw_access_to_map() {
    let path = write_map("json");
    let value = load_json(&path).unwrap();
    assert_eq!(value["tilewidth"], 16);
    assert_eq!(value["layers"][1]["name"], "solid");
}
