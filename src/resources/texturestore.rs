//! Loaded textures keyed by string IDs.
//!
//! Sprites refer to textures by key, so a sheet is loaded once and shared
//! by every sprite sliced from it.

use raylib::prelude::*;
use rustc_hash::FxHashMap;
use std::path::Path;

#[derive(Default)]
pub struct TextureStore {
    pub map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&Texture2D> {
        self.map.get(key.as_ref())
    }

    /// Load `path` under `key` unless that key is already present.
    ///
    /// Returns the texture size in pixels.
    pub fn load(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        key: &str,
        path: &Path,
    ) -> Result<(u32, u32), String> {
        if let Some(tex) = self.map.get(key) {
            return Ok((tex.width as u32, tex.height as u32));
        }
        let path_str = path
            .to_str()
            .ok_or_else(|| format!("Texture path is not valid UTF-8: {:?}", path))?;
        let texture = rl
            .load_texture(th, path_str)
            .map_err(|e| format!("Failed to load texture {}: {}", path.display(), e))?;
        let size = (texture.width as u32, texture.height as u32);
        log::debug!("Loaded texture '{}' ({}x{})", key, size.0, size.1);
        self.map.insert(key.to_string(), texture);
        Ok(size)
    }
}
