//! Entities and their behavior hooks.
//!
//! An [`Entity`] is a plain game object: position, velocity, size, draw
//! layer, optional sprite/animation, tags and an optional custom hitbox.
//! Game-specific logic lives in a [`Behavior`] paired with the entity inside
//! a [`Scene`](crate::scene::Scene). The scene calls the hooks in a fixed
//! order every frame:
//!
//! - update pass: [`Behavior::on_update`], [`Behavior::input`], then
//!   [`Entity::update_pos`]
//! - fixed pass (every fixed step): [`Behavior::fixed_update`]
//! - draw pass: [`Behavior::draw`]
//!
//! # Example
//! ```ignore
//! struct Gravity;
//! impl Behavior for Gravity {
//!     fn fixed_update(&mut self, entity: &mut Entity, _frame: &mut Frame<'_>) {
//!         entity.yv += 0.1;
//!     }
//! }
//! scene.spawn(Entity::new(0.0, 0.0, 16, 16), Some(Box::new(Gravity)));
//! ```

use raylib::prelude::Vector2;

use crate::components::animation::Animation;
use crate::components::hitbox::{CollisionSide, Hitbox};
use crate::components::sprite::Sprite;
use crate::components::tags::Tags;
use crate::math::VectorExt;
use crate::resources::worldtime::WorldTime;
use crate::scene::Frame;
use crate::systems::render::DrawList;

/// Draw layer new entities start on.
pub const DEFAULT_LAYER: i32 = 1;

/// Stable handle of an entity inside a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Assigned by the scene on insertion.
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    /// Velocity in pixels per 10ms.
    pub xv: f32,
    pub yv: f32,
    pub layer: i32,
    /// Rotation in degrees around the sprite pivot.
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
    pub sprite: Option<Sprite>,
    pub animation: Option<Animation>,
    pub tags: Tags,
    /// Hitbox relative to the entity position. `None` uses the full size.
    pub custom_hitbox: Option<Hitbox>,
}

impl Default for Entity {
    fn default() -> Self {
        Entity::new(0.0, 0.0, 1, 1)
    }
}

impl Entity {
    pub fn new(x: f32, y: f32, width: u32, height: u32) -> Self {
        Self {
            id: EntityId::default(),
            x,
            y,
            xv: 0.0,
            yv: 0.0,
            layer: DEFAULT_LAYER,
            rotation: 0.0,
            width: width as f32,
            height: height as f32,
            sprite: None,
            animation: None,
            tags: Tags::default(),
            custom_hitbox: None,
        }
    }

    pub fn with_sprite(mut self, sprite: Sprite) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Replace the tag list.
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Add one tag to the existing list.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_hitbox(mut self, hitbox: Hitbox) -> Self {
        self.custom_hitbox = Some(hitbox);
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_velocity(mut self, xv: f32, yv: f32) -> Self {
        self.xv = xv;
        self.yv = yv;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.has(tag)
    }

    /// World-space hitbox.
    pub fn hitbox(&self) -> Hitbox {
        match self.custom_hitbox {
            None => Hitbox::new(self.x, self.y, self.width, self.height),
            Some(hb) => Hitbox::new(self.x + hb.x, self.y + hb.y, hb.w, hb.h),
        }
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Integrate velocity over this frame's delta.
    pub fn update_pos(&mut self, time: &WorldTime) {
        let scale = time.step_scale();
        self.x += self.xv * scale;
        self.y += self.yv * scale;
    }

    pub fn velocity(&self) -> Vector2 {
        Vector2::new(self.xv, self.yv)
    }

    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.xv = velocity.x;
        self.yv = velocity.y;
    }

    /// Set speed while maintaining the current direction of velocity.
    ///
    /// If the current velocity is zero there is no direction to keep and the
    /// call is ignored.
    pub fn set_total_velocity(&mut self, speed: f32) {
        let velocity = self.velocity();
        if velocity.length() > 0.0 {
            self.set_velocity(velocity.with_length(speed));
        } else {
            log::warn!("set_total_velocity called with zero velocity - operation ignored");
        }
    }

    /// Push this entity out of every entity in `others` tagged `tag`.
    ///
    /// Each candidate is resolved along its axis of least penetration,
    /// recomputing this entity's hitbox after every push. Returns the side
    /// of the last collision, or [`CollisionSide::None`].
    pub fn bounce<'a>(
        &mut self,
        tag: &str,
        others: impl IntoIterator<Item = &'a Entity>,
    ) -> CollisionSide {
        let mut side = CollisionSide::None;
        for other in others {
            if other.id == self.id || !other.has_tag(tag) {
                continue;
            }
            if let Some((hit, push)) = self.hitbox().resolve_against(&other.hitbox()) {
                if hit.is_none() {
                    continue;
                }
                side = hit;
                self.x += push.x;
                self.y += push.y;
            }
        }
        side
    }
}

/// Per-entity game logic.
///
/// Every hook has a default, so implementors override only what they need.
pub trait Behavior {
    /// Called once when the entity is added to a scene.
    fn init(&mut self, _entity: &mut Entity) {}

    fn on_update(&mut self, _entity: &mut Entity, _frame: &mut Frame<'_>) {}

    /// Called after [`Behavior::on_update`] in the update pass; meant for
    /// reading [`Frame::input`].
    fn input(&mut self, _entity: &mut Entity, _frame: &mut Frame<'_>) {}

    fn fixed_update(&mut self, _entity: &mut Entity, _frame: &mut Frame<'_>) {}

    /// Queue draw commands for this entity. Draws the sprite by default.
    fn draw(&self, entity: &Entity, list: &mut DrawList) {
        list.entity(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn wall(id: u64, x: f32, y: f32, w: u32, h: u32) -> Entity {
        let mut e = Entity::new(x, y, w, h).with_tag("solid");
        e.id = EntityId(id);
        e
    }

    fn mover(x: f32, y: f32) -> Entity {
        let mut e = Entity::new(x, y, 10, 10);
        e.id = EntityId(100);
        e
    }

    #[test]
    fn test_defaults() {
        let e = Entity::default();
        assert_eq!((e.x, e.y, e.width, e.height), (0.0, 0.0, 1.0, 1.0));
        assert_eq!(e.layer, DEFAULT_LAYER);
        assert!(e.has_tag("Entity"));
        assert!(e.sprite.is_none());
        assert!(e.custom_hitbox.is_none());
    }

    #[test]
    fn test_hitbox_default_and_custom() {
        let e = Entity::new(10.0, 20.0, 16, 32);
        assert_eq!(e.hitbox(), Hitbox::new(10.0, 20.0, 16.0, 32.0));

        let e = e.with_hitbox(Hitbox::new(2.0, 8.0, 12.0, 24.0));
        assert_eq!(e.hitbox(), Hitbox::new(12.0, 28.0, 12.0, 24.0));
    }

    #[test]
    fn test_update_pos_scales_by_delta() {
        let mut e = Entity::new(0.0, 0.0, 1, 1).with_velocity(2.0, -1.0);
        e.update_pos(&WorldTime::with_delta(25.0));
        assert!(approx_eq(e.x, 5.0));
        assert!(approx_eq(e.y, -2.5));
    }

    #[test]
    fn test_set_total_velocity_keeps_direction() {
        let mut e = Entity::default().with_velocity(3.0, 4.0);
        e.set_total_velocity(10.0);
        assert!(approx_eq(e.xv, 6.0));
        assert!(approx_eq(e.yv, 8.0));
    }

    #[test]
    fn test_set_total_velocity_zero_is_ignored() {
        let mut e = Entity::default();
        e.set_total_velocity(10.0);
        assert_eq!(e.velocity(), Vector2::zero());
    }

    #[test]
    fn test_bounce_no_contact() {
        let mut e = mover(100.0, 100.0);
        let walls = [wall(1, 0.0, 0.0, 10, 10)];
        assert_eq!(e.bounce("solid", walls.iter()), CollisionSide::None);
        assert_eq!((e.x, e.y), (100.0, 100.0));
    }

    #[test]
    fn test_bounce_ignores_other_tags() {
        let mut e = mover(5.0, 0.0);
        let walls = [wall(1, 0.0, 0.0, 10, 10)];
        assert_eq!(e.bounce("lava", walls.iter()), CollisionSide::None);
        assert_eq!(e.x, 5.0);
    }

    #[test]
    fn test_bounce_lands_on_floor() {
        // 2px into a wide floor: least penetration is vertical.
        let mut e = mover(20.0, 42.0);
        let floor = [wall(1, 0.0, 50.0, 100, 10)];
        let side = e.bounce("solid", floor.iter());
        assert_eq!(side, CollisionSide::Bottom);
        assert!(approx_eq(e.y, 40.0));
        assert!(approx_eq(e.x, 20.0));
    }

    #[test]
    fn test_bounce_hits_ceiling() {
        // Head 3px into a low ceiling: pushed down by the vertical overlap.
        let mut e = mover(20.0, 7.0);
        let ceiling = [wall(1, 0.0, 0.0, 100, 10)];
        let side = e.bounce("solid", ceiling.iter());
        assert_eq!(side, CollisionSide::Top);
        assert!(approx_eq(e.y, 10.0));
        assert!(approx_eq(e.x, 20.0));
        assert_eq!(e.center(), Vector2::new(25.0, 15.0));
    }

    #[test]
    fn test_bounce_off_right_wall() {
        let mut e = mover(47.0, 20.0);
        let walls = [wall(1, 55.0, 0.0, 10, 100)];
        let side = e.bounce("solid", walls.iter());
        assert_eq!(side, CollisionSide::Right);
        assert!(approx_eq(e.x, 45.0));
    }

    #[test]
    fn test_bounce_last_collision_wins_and_hitbox_is_recomputed() {
        // Corner: floor below, wall to the left.
        let mut e = mover(8.0, 42.0);
        let solids = [wall(1, 0.0, 50.0, 100, 10), wall(2, -10.0, 0.0, 20, 100)];
        let side = e.bounce("solid", solids.iter());
        assert!(approx_eq(e.y, 40.0));
        assert!(approx_eq(e.x, 10.0));
        assert_eq!(side, CollisionSide::Left);
    }

    #[test]
    fn test_bounce_skips_itself() {
        let mut e = mover(0.0, 0.0).with_tag("solid");
        let me = e.clone();
        assert_eq!(e.bounce("solid", [&me]), CollisionSide::None);
    }

    #[test]
    fn test_bounce_uses_custom_hitbox() {
        // Feet-only hitbox: 10x4 at the bottom of a 10x10 sprite.
        let mut e = mover(20.0, 38.0).with_hitbox(Hitbox::new(0.0, 6.0, 10.0, 4.0));
        let floor = [wall(1, 0.0, 46.0, 100, 10)];
        assert_eq!(e.bounce("solid", floor.iter()), CollisionSide::Bottom);
        assert!(approx_eq(e.y, 36.0));
    }
}
