//! The engine context.
//!
//! [`Lemon`] owns the window, the offscreen canvas, loaded textures, the
//! input snapshot, the clock and the current [`Scene`]. A game builds its
//! scene and then drives the engine one frame at a time:
//!
//! ```ignore
//! let mut lemon = Lemon::init(GameConfig::new())?;
//! lemon.scene.spawn(Entity::new(0.0, 0.0, 16, 16), Some(Box::new(Player)));
//! while !lemon.should_end() {
//!     lemon.step();
//! }
//! ```

use raylib::prelude::*;
use std::error::Error;
use std::fmt::Display;
use std::path::Path;

use crate::components::sprite::{Sprite, slice_sheet};
use crate::entity::Entity;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{GamepadState, InputState, MAX_CONTROLLERS};
use crate::resources::rendertarget::RenderTarget;
use crate::resources::texturestore::TextureStore;
use crate::resources::tilemap::{Tilemap, Tileset};
use crate::resources::worldtime::WorldTime;
use crate::scene::Scene;
use crate::systems::animation::advance_animations;
use crate::systems::input::update_input_state;
use crate::systems::render::{DrawList, debug_overlay, render_frame};

pub struct Lemon {
    pub rl: RaylibHandle,
    pub thread: RaylibThread,
    pub canvas: RenderTarget,
    pub textures: TextureStore,
    pub config: GameConfig,
    pub scene: Scene,
    pub input: InputState,
    pub time: WorldTime,
    /// Draw hitboxes and the debug text block. Toggled with F11.
    pub debug: bool,
    should_end: bool,
}

impl Lemon {
    /// Open the window and set up an empty scene.
    pub fn init(config: GameConfig) -> Result<Self, String> {
        let (window_width, window_height) = config.window_size();

        let mut builder = raylib::init();
        builder.size(window_width, window_height).title(&config.title);
        if config.vsync {
            builder.vsync();
        }
        let (mut rl, thread) = builder.build();
        if config.target_fps > 0 {
            rl.set_target_fps(config.target_fps);
        }
        // ESC is game input, not a quit key
        rl.set_exit_key(None);

        let canvas = RenderTarget::new(&mut rl, &thread, config.width, config.height, config.filter)?;

        let gamepads = (0..MAX_CONTROLLERS as i32)
            .filter(|i| rl.is_gamepad_available(*i))
            .count();
        log::info!("{} gamepad(s) connected", gamepads);

        let scene = Scene::new(config.width as f32, config.height as f32);
        let time = WorldTime::default().with_fixed_update_interval(config.fixed_update_interval);
        let debug = config.debug;

        log::info!("Initialized");

        Ok(Self {
            rl,
            thread,
            canvas,
            textures: TextureStore::new(),
            config,
            scene,
            input: InputState::default(),
            time,
            debug,
            should_end: false,
        })
    }

    /// Run one frame: at most one fixed update, then update and draw.
    pub fn step(&mut self) {
        let now = self.now();
        if self.time.tick(now) {
            self.fixed_update();
        }
        self.update();
        if !self.should_end {
            self.draw();
        }
        self.input.end_frame();
    }

    /// Poll input and run the scene's update pass.
    ///
    /// A close request still runs this frame's update; only drawing is
    /// skipped.
    pub fn update(&mut self) {
        if self.rl.window_should_close() {
            log::info!("Window close requested");
            self.should_end = true;
        }

        update_input_state(
            &self.rl,
            &mut self.input,
            &self.scene.camera,
            self.config.scale,
        );
        if self.input.key_pressed(KeyboardKey::KEY_F11) {
            self.debug = !self.debug;
            log::info!("Debug mode {}", if self.debug { "on" } else { "off" });
        }

        self.scene.update(&self.input, &self.time);
    }

    pub fn fixed_update(&mut self) {
        self.scene.fixed_update(&self.input, &self.time);
    }

    /// Sort, draw and present the scene, then advance animations.
    pub fn draw(&mut self) {
        self.scene.sort_for_render();

        let mut list = DrawList::culled_to(self.scene.camera.view_rect());
        self.scene.draw(&mut list);
        if self.debug {
            debug_overlay(&mut list, &self.scene, &self.input, self.rl.get_fps());
        }

        render_frame(
            &mut self.rl,
            &self.thread,
            &mut self.canvas,
            &self.textures,
            &self.scene.camera,
            &list,
            self.config.scale,
        );

        advance_animations(&mut self.scene, &self.time);
    }

    /// Milliseconds since the window opened.
    pub fn now(&self) -> f64 {
        self.rl.get_time() * 1000.0
    }

    pub fn should_end(&self) -> bool {
        self.should_end
    }

    /// Ask the loop to stop after the current frame.
    pub fn end(&mut self) {
        self.should_end = true;
    }

    /// Load a texture under `key`. Returns its size in pixels.
    pub fn load_texture(&mut self, key: &str, path: impl AsRef<Path>) -> Result<(u32, u32), String> {
        self.textures
            .load(&mut self.rl, &self.thread, key, path.as_ref())
    }

    /// Load a tileset's sheet and slice it into tile sprites, row-major.
    ///
    /// The image path is resolved against `map_dir`.
    pub fn load_tileset(
        &mut self,
        tileset: &Tileset,
        map: &Tilemap,
        map_dir: &Path,
    ) -> Result<Vec<Sprite>, Box<dyn Error>> {
        let path = tileset
            .image_path(map_dir)
            .ok_or_else(|| format!("Tileset '{}' has no embedded image", tileset.name))?;
        let key = path.to_string_lossy().into_owned();
        let (width, height) = self.load_texture(&key, &path)?;
        let sprites = slice_sheet(&key, width, height, tileset.tile_size(map));
        log::info!("Sliced tileset '{}' into {} sprites", key, sprites.len());
        Ok(sprites)
    }

    /// Load a Tiled JSON map into the current scene.
    ///
    /// Returns the number of tile entities created.
    pub fn load_tilemap(&mut self, path: impl AsRef<Path>) -> Result<usize, Box<dyn Error>> {
        let path = path.as_ref();
        let map = Tilemap::load_from_file(path)?;
        let map_dir = path.parent().unwrap_or_else(|| Path::new("."));

        let sprites = match map.first_tileset() {
            Some(tileset) if tileset.image.is_some() => self.load_tileset(tileset, &map, map_dir)?,
            _ => {
                log::warn!(
                    "Map {} has no embedded tileset image; tiles will be invisible",
                    path.display()
                );
                Vec::new()
            }
        };

        Ok(self.scene.load_tilemap(&map, &sprites))
    }

    /// All entities of the current scene carrying `tag`.
    pub fn get_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.scene.get_all(tag)
    }

    pub fn get_gamepad_state(&self, slot: usize) -> Option<GamepadState> {
        self.input.gamepad(slot).copied()
    }

    pub fn get_gamepad_button(&self, slot: usize, button: GamepadButton) -> bool {
        self.input.gamepad_button(slot, button)
    }

    pub fn get_gamepad_axis(&self, slot: usize, axis: GamepadAxis) -> f32 {
        self.input.gamepad_axis(slot, axis)
    }

    pub fn print(&self, msg: impl Display) {
        log::info!(target: "Lemon", "{}", msg);
    }
}

/// Parse a JSON file.
pub fn load_json(path: impl AsRef<Path>) -> Result<serde_json::Value, Box<dyn Error>> {
    let file_content = std::fs::read_to_string(path.as_ref())?;
    let value = serde_json::from_str(&file_content)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_json_reads_file() {
        let path = std::env::temp_dir().join("lemon_load_json_test.json");
        std::fs::write(&path, r#"{ "name": "level", "tiles": [1, 2, 3] }"#).unwrap();
        let value = load_json(&path).unwrap();
        assert_eq!(value["name"], "level");
        assert_eq!(value["tiles"][2], 3);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_json_reports_errors() {
        assert!(load_json("definitely/not/here.json").is_err());

        let path = std::env::temp_dir().join("lemon_load_json_bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load_json(&path).is_err());
        std::fs::remove_file(&path).ok();
    }
}
