//! Axis-aligned hitbox and the push-out resolution used by `bounce`.
//!
//! A [`Hitbox`] is a rectangle in world pixels. Entities either use their
//! full `width x height` rectangle or a custom box relative to their
//! position (see [`crate::entity::Entity::hitbox`]).

use raylib::prelude::Vector2;

/// Side of the *moving* entity that touched the obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionSide {
    #[default]
    None,
    Left,
    Right,
    Top,
    Bottom,
}

impl CollisionSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionSide::None => "none",
            CollisionSide::Left => "left",
            CollisionSide::Right => "right",
            CollisionSide::Top => "top",
            CollisionSide::Bottom => "bottom",
        }
    }

    pub fn is_none(&self) -> bool {
        *self == CollisionSide::None
    }
}

/// Axis-aligned rectangle in world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Default for Hitbox {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: 1.0,
            h: 1.0,
        }
    }
}

impl Hitbox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict AABB overlap test. Boxes that only share an edge do not collide.
    pub fn collides_with(&self, other: &Hitbox) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Copy of this box translated by `(dx, dy)`.
    pub fn moved(&self, dx: f32, dy: f32) -> Hitbox {
        Hitbox::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Point containment, edges inclusive.
    pub fn contains_point(&self, point: Vector2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.w
            && point.y >= self.y
            && point.y <= self.y + self.h
    }

    /// Minimum translation that pushes `self` out of `other` along the axis
    /// of least penetration.
    ///
    /// Returns `None` when the boxes do not overlap. When both overlaps are
    /// equal the side is reported as [`CollisionSide::None`] with a zero push,
    /// since neither axis is preferred.
    pub fn resolve_against(&self, other: &Hitbox) -> Option<(CollisionSide, Vector2)> {
        let delta = self.center() - other.center();
        let half_widths = self.w / 2.0 + other.w / 2.0;
        let half_heights = self.h / 2.0 + other.h / 2.0;

        if half_widths <= delta.x.abs() || half_heights <= delta.y.abs() {
            return None;
        }

        let overlap_x = half_widths - delta.x.abs();
        let overlap_y = half_heights - delta.y.abs();

        if overlap_y > overlap_x {
            if delta.x > 0.0 {
                Some((CollisionSide::Left, Vector2::new(overlap_x, 0.0)))
            } else {
                Some((CollisionSide::Right, Vector2::new(-overlap_x, 0.0)))
            }
        } else if overlap_y < overlap_x {
            if delta.y > 0.0 {
                Some((CollisionSide::Top, Vector2::new(0.0, overlap_y)))
            } else {
                Some((CollisionSide::Bottom, Vector2::new(0.0, -overlap_y)))
            }
        } else {
            Some((CollisionSide::None, Vector2::zero()))
        }
    }
}
