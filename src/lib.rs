//! Lemon engine library.
//!
//! A small 2D engine on top of raylib: a fixed-timestep loop, entities with
//! sprites and AABB hitboxes, a scrolling camera, sprite-sheet animation and
//! a Tiled JSON map loader. Exposed as a library for games and for
//! integration tests.

pub mod components;
pub mod entity;
pub mod game;
pub mod lemon;
pub mod math;
pub mod resources;
pub mod scene;
pub mod systems;

pub use entity::{Behavior, Entity, EntityId};
pub use lemon::{Lemon, load_json};
pub use scene::{Frame, Scene};
