//! Scrolling 2D camera.
//!
//! The camera position is the world coordinate drawn at the top-left of the
//! canvas. [`Camera::follow`] scrolls only when the target leaves a centred
//! dead-zone ("trap"); [`Camera::look_at`] eases towards centring the target.
//! Both scale their movement by the frame delta so that speeds match the
//! entity velocity unit.
//!
//! Rendering goes through raylib's [`Camera2D`] (see [`Camera::to_camera2d`]).

use raylib::prelude::{Camera2D, Vector2};

use crate::components::hitbox::Hitbox;
use crate::entity::Entity;
use crate::resources::worldtime::WorldTime;

/// Trap size used by a scene's default camera.
pub const DEFAULT_TRAP_SIZE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    /// Canvas size in pixels.
    pub view_width: f32,
    pub view_height: f32,
    /// Dead-zone box in canvas coordinates.
    pub trap: Hitbox,
}

impl Camera {
    /// Camera at `(x, y)` with a `trap_w x trap_h` dead-zone centred in a
    /// `view_width x view_height` canvas.
    pub fn new(x: f32, y: f32, trap_w: f32, trap_h: f32, view_width: f32, view_height: f32) -> Self {
        Self {
            x,
            y,
            view_width,
            view_height,
            trap: Hitbox::new(
                (view_width - trap_w) / 2.0,
                (view_height - trap_h) / 2.0,
                trap_w,
                trap_h,
            ),
        }
    }

    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Resize the canvas the camera looks through, keeping the trap centred.
    pub fn set_view_size(&mut self, view_width: f32, view_height: f32) {
        *self = Camera::new(self.x, self.y, self.trap.w, self.trap.h, view_width, view_height);
    }

    /// Scroll so the target stays inside the trap.
    ///
    /// Each side is handled independently; the excess distance is applied
    /// scaled by `factor` and the frame delta.
    pub fn follow(&mut self, target: &Entity, factor: f32, time: &WorldTime) {
        let scale = factor * time.step_scale();

        let ent_right = (target.x + target.width) - self.x;
        let ent_left = target.x - self.x;
        let ent_bottom = (target.y + target.height) - self.y;
        let ent_top = target.y - self.y;

        let trap_right = self.view_width / 2.0 + self.trap.w / 2.0;
        let trap_left = self.view_width / 2.0 - self.trap.w / 2.0;
        let trap_bottom = self.view_height / 2.0 + self.trap.h / 2.0;
        let trap_top = self.view_height / 2.0 - self.trap.h / 2.0;

        if ent_right > trap_right {
            self.x += (ent_right - trap_right) * scale;
        }
        if ent_left < trap_left {
            self.x -= (trap_left - ent_left) * scale;
        }
        if ent_bottom > trap_bottom {
            self.y += (ent_bottom - trap_bottom) * scale;
        }
        if ent_top < trap_top {
            self.y -= (trap_top - ent_top) * scale;
        }
    }

    /// Ease towards centring the target on the canvas.
    pub fn look_at(&mut self, target: &Entity, factor: f32, time: &WorldTime) {
        let scale = factor * time.step_scale();
        let goal_x = (target.x + target.width / 2.0) - self.view_width / 2.0;
        let goal_y = (target.y + target.height / 2.0) - self.view_height / 2.0;
        self.x += (goal_x - self.x) * scale;
        self.y += (goal_y - self.y) * scale;
    }

    /// World rectangle currently visible.
    pub fn view_rect(&self) -> Hitbox {
        Hitbox::new(self.x, self.y, self.view_width, self.view_height)
    }

    pub fn screen_to_world(&self, screen: Vector2) -> Vector2 {
        Vector2::new(screen.x + self.x, screen.y + self.y)
    }

    pub fn to_camera2d(&self) -> Camera2D {
        Camera2D {
            target: Vector2::new(self.x, self.y),
            offset: Vector2::zero(),
            rotation: 0.0,
            zoom: 1.0,
        }
    }
}
