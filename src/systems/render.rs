//! Rendering.
//!
//! Drawing is split in two. Entity `draw` hooks and the debug overlay only
//! *record* [`DrawCmd`]s into a [`DrawList`], which is plain data and can be
//! inspected in tests. [`render_frame`] then replays the list with raylib:
//! world commands through the scene camera into the offscreen canvas,
//! overlay commands in canvas space on top, and finally the canvas is
//! stretched over the window.

use raylib::prelude::*;
use std::cmp::Ordering;

use crate::components::hitbox::Hitbox;
use crate::components::sprite::Sprite;
use crate::entity::Entity;
use crate::resources::camera2d::Camera;
use crate::resources::input::InputState;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::texturestore::TextureStore;
use crate::scene::Scene;

const DEBUG_FONT_SIZE: i32 = 10;

/// Painter's order: layer first, then the entity's vertical centre.
pub fn render_order(a: &Entity, b: &Entity) -> Ordering {
    a.layer.cmp(&b.layer).then_with(|| {
        let a_key = a.y + a.height / 2.0;
        let b_key = b.y + b.height / 2.0;
        a_key.total_cmp(&b_key)
    })
}

/// True when `a` must be drawn before `b`.
pub fn render_sort(a: &Entity, b: &Entity) -> bool {
    render_order(a, b) == Ordering::Less
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Sprite {
        tex_key: String,
        source: Rectangle,
        dest: Rectangle,
        origin: Vector2,
        rotation: f32,
    },
    Rect {
        rect: Rectangle,
        color: Color,
        filled: bool,
    },
    Line {
        from: Vector2,
        to: Vector2,
        color: Color,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        size: i32,
        color: Color,
    },
}

/// Recorded draw commands for one frame.
///
/// `world` commands are in world coordinates and go through the camera;
/// `overlay` commands are in canvas pixels.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub world: Vec<DrawCmd>,
    pub overlay: Vec<DrawCmd>,
    /// World rectangle outside of which sprites are culled.
    view: Option<Hitbox>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// List that drops sprites falling completely outside `view`.
    pub fn culled_to(view: Hitbox) -> Self {
        Self {
            view: Some(view),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.world.len() + self.overlay.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty() && self.overlay.is_empty()
    }

    fn visible(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        match self.view {
            None => true,
            Some(view) => {
                !(x + w < view.x || x > view.x + view.w || y + h < view.y || y > view.y + view.h)
            }
        }
    }

    /// Draw `sprite` with its top-left at `(x, y)`, rotated by `angle`
    /// degrees around `center` (the sprite pivot when `None`).
    pub fn sprite(&mut self, sprite: &Sprite, x: f32, y: f32, angle: f32, center: Option<Vector2>) {
        if !self.visible(x, y, sprite.width, sprite.height) {
            return;
        }
        let origin = center.unwrap_or_else(|| sprite.pivot());
        self.world.push(DrawCmd::Sprite {
            tex_key: sprite.tex_key.clone(),
            source: sprite.source_rect(),
            dest: Rectangle::new(x + origin.x, y + origin.y, sprite.width, sprite.height),
            origin,
            rotation: angle,
        });
    }

    /// Default entity drawing: its sprite at its position and rotation.
    pub fn entity(&mut self, entity: &Entity) {
        if let Some(sprite) = &entity.sprite {
            self.sprite(sprite, entity.x, entity.y, entity.rotation, None);
        }
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        if self.visible(x, y, w, h) {
            self.world.push(DrawCmd::Rect {
                rect: Rectangle::new(x, y, w, h),
                color,
                filled: true,
            });
        }
    }

    pub fn rect_lines(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        if self.visible(x, y, w, h) {
            self.world.push(DrawCmd::Rect {
                rect: Rectangle::new(x, y, w, h),
                color,
                filled: false,
            });
        }
    }

    pub fn line(&mut self, from: Vector2, to: Vector2, color: Color) {
        self.world.push(DrawCmd::Line { from, to, color });
    }

    /// Text in canvas pixels, drawn above the world.
    pub fn overlay_text(&mut self, text: impl Into<String>, x: i32, y: i32, size: i32, color: Color) {
        self.overlay.push(DrawCmd::Text {
            text: text.into(),
            x,
            y,
            size,
            color,
        });
    }
}

/// Record hitbox outlines and position crosses for every entity, plus the
/// debug text block.
pub fn debug_overlay(list: &mut DrawList, scene: &Scene, input: &InputState, fps: u32) {
    for entity in scene.entities() {
        let hb = entity.hitbox();
        list.rect_lines(hb.x, hb.y, hb.w, hb.h, Color::RED);
        list.line(
            Vector2::new(entity.x - 5.0, entity.y),
            Vector2::new(entity.x + 5.0, entity.y),
            Color::GREEN,
        );
        list.line(
            Vector2::new(entity.x, entity.y - 5.0),
            Vector2::new(entity.x, entity.y + 5.0),
            Color::GREEN,
        );
    }

    let color = Color::RAYWHITE;
    list.overlay_text(
        format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps),
        10,
        10,
        DEBUG_FONT_SIZE,
        color,
    );
    list.overlay_text(format!("Entities: {}", scene.len()), 10, 30, DEBUG_FONT_SIZE, color);
    list.overlay_text(
        format!("Cursor world: ({:.1}, {:.1})", input.cursor.x, input.cursor.y),
        10,
        50,
        DEBUG_FONT_SIZE,
        color,
    );
    let cam = &scene.camera;
    list.overlay_text(
        format!("Camera pos: ({:.1}, {:.1})", cam.x, cam.y),
        10,
        cam.view_height as i32 - 30,
        DEBUG_FONT_SIZE,
        color,
    );
}

/// Replay `cmds` on any raylib draw handle.
pub fn execute<D: RaylibDraw>(d: &mut D, cmds: &[DrawCmd], textures: &TextureStore) {
    for cmd in cmds {
        match cmd {
            DrawCmd::Sprite {
                tex_key,
                source,
                dest,
                origin,
                rotation,
            } => {
                if let Some(tex) = textures.get(tex_key) {
                    d.draw_texture_pro(tex, *source, *dest, *origin, *rotation, Color::WHITE);
                } else {
                    log::trace!("Texture '{}' not loaded", tex_key);
                }
            }
            DrawCmd::Rect { rect, color, filled } => {
                if *filled {
                    d.draw_rectangle_rec(*rect, *color);
                } else {
                    d.draw_rectangle_lines(
                        rect.x as i32,
                        rect.y as i32,
                        rect.width as i32,
                        rect.height as i32,
                        *color,
                    );
                }
            }
            DrawCmd::Line { from, to, color } => {
                d.draw_line_v(*from, *to, *color);
            }
            DrawCmd::Text {
                text,
                x,
                y,
                size,
                color,
            } => {
                d.draw_text(text, *x, *y, *size, *color);
            }
        }
    }
}

/// Render one frame: canvas cleared to black, world through `camera`,
/// overlay on top, then the canvas scaled by `scale` onto the window.
pub fn render_frame(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    target: &mut RenderTarget,
    textures: &TextureStore,
    camera: &Camera,
    list: &DrawList,
    scale: f32,
) {
    let src = target.source_rect();
    let dest = target.dest_rect(scale);

    let mut d = rl.begin_drawing(th);
    {
        let mut canvas = d.begin_texture_mode(th, &mut target.texture);
        canvas.clear_background(Color::BLACK);
        {
            let mut world = canvas.begin_mode2D(camera.to_camera2d());
            execute(&mut world, &list.world, textures);
        }
        execute(&mut canvas, &list.overlay, textures);
    }

    d.clear_background(Color::BLACK);
    d.draw_texture_pro(target.texture.texture(), src, dest, Vector2::zero(), 0.0, Color::WHITE);
}
