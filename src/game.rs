//! Demo game: a player square walking around a walled room or a Tiled map.
//!
//! Solid geometry is anything tagged [`SOLID_TAG`]. With a Tiled map, name
//! the collision tile layer `solid` and place an object named `player` to
//! choose the spawn point.

use raylib::prelude::{Color, GamepadAxis, KeyboardKey, Vector2};

use crate::entity::{Behavior, Entity};
use crate::math::VectorExt;
use crate::scene::{Frame, Scene};
use crate::systems::render::DrawList;

pub const SOLID_TAG: &str = "solid";
pub const PLAYER_TAG: &str = "player";
/// Player speed in pixels per 10ms.
pub const PLAYER_SPEED: f32 = 2.0;
const PLAYER_SIZE: u32 = 14;
const STICK_DEADZONE: f32 = 0.2;

/// Keyboard/gamepad controlled square that collides with solids and drags
/// the camera along.
#[derive(Debug, Default)]
pub struct Player;

impl Player {
    /// Desired direction from WASD/arrows, or the left stick of gamepad 0.
    pub fn direction(frame: &Frame<'_>) -> Vector2 {
        let input = frame.input;
        let held = |a: KeyboardKey, b: KeyboardKey| input.key_down(a) || input.key_down(b);

        let mut dir = Vector2::zero();
        if held(KeyboardKey::KEY_A, KeyboardKey::KEY_LEFT) {
            dir.x -= 1.0;
        }
        if held(KeyboardKey::KEY_D, KeyboardKey::KEY_RIGHT) {
            dir.x += 1.0;
        }
        if held(KeyboardKey::KEY_W, KeyboardKey::KEY_UP) {
            dir.y -= 1.0;
        }
        if held(KeyboardKey::KEY_S, KeyboardKey::KEY_DOWN) {
            dir.y += 1.0;
        }

        if dir == Vector2::zero() {
            let stick = Vector2::new(
                input.gamepad_axis(0, GamepadAxis::GAMEPAD_AXIS_LEFT_X),
                input.gamepad_axis(0, GamepadAxis::GAMEPAD_AXIS_LEFT_Y),
            );
            if stick.length() > STICK_DEADZONE {
                dir = stick;
            }
        }
        dir
    }
}

impl Behavior for Player {
    fn init(&mut self, entity: &mut Entity) {
        log::debug!("Player spawned at ({}, {})", entity.x, entity.y);
    }

    fn on_update(&mut self, entity: &mut Entity, frame: &mut Frame<'_>) {
        frame.bounce(entity, SOLID_TAG);
        frame.camera.follow(entity, 1.0, frame.time);
    }

    fn input(&mut self, entity: &mut Entity, frame: &mut Frame<'_>) {
        let dir = Self::direction(frame);
        entity.set_velocity(dir.normalise() * PLAYER_SPEED);
    }

    fn draw(&self, entity: &Entity, list: &mut DrawList) {
        if entity.sprite.is_some() {
            list.entity(entity);
        } else {
            list.rect(entity.x, entity.y, entity.width, entity.height, Color::GOLD);
        }
    }
}

/// Untextured solid block.
#[derive(Debug, Default)]
pub struct Block;

impl Behavior for Block {
    fn draw(&self, entity: &Entity, list: &mut DrawList) {
        list.rect(entity.x, entity.y, entity.width, entity.height, Color::DARKGRAY);
    }
}

/// Fill `scene` with a walled `width x height` room and some pillars.
pub fn build_room(scene: &mut Scene, width: u32, height: u32) {
    const WALL: u32 = 16;
    let (w, h) = (width as f32, height as f32);
    let walls = [
        (0.0, 0.0, width, WALL),
        (0.0, h - WALL as f32, width, WALL),
        (0.0, 0.0, WALL, height),
        (w - WALL as f32, 0.0, WALL, height),
    ];
    for (x, y, ww, wh) in walls {
        scene.spawn(
            Entity::new(x, y, ww, wh).with_tag(SOLID_TAG).with_layer(0),
            Some(Box::new(Block)),
        );
    }
    for i in 1..4 {
        let x = w * i as f32 / 4.0 - 24.0;
        scene.spawn(
            Entity::new(x, h / 3.0, 48, 48).with_tag(SOLID_TAG),
            Some(Box::new(Block)),
        );
    }
    scene.width = w;
    scene.height = h;
}

/// Spawn the player at the map object named `player`, or the scene centre.
pub fn spawn_player(scene: &mut Scene) {
    let spawn = scene
        .objects
        .iter()
        .find(|o| o.name == PLAYER_TAG)
        .map(|o| (o.x, o.y))
        .unwrap_or((scene.width / 2.0, scene.height * 0.75));
    let player = Entity::new(spawn.0, spawn.1, PLAYER_SIZE, PLAYER_SIZE)
        .with_tag(PLAYER_TAG)
        .with_layer(2);
    scene.spawn(player, Some(Box::new(Player)));
}
