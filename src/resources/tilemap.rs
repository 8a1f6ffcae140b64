//! Tiled JSON map format.
//!
//! Only the parts the engine consumes are modelled: map size, the tile
//! size, embedded tilesets, tile layers stored as plain arrays (CSV/array
//! encoding) and object groups. Unknown fields are ignored.
//!
//! ```json
//! {
//!   "width": 3, "height": 2, "tilewidth": 16, "tileheight": 16,
//!   "tilesets": [{ "firstgid": 1, "image": "tiles.png", "tilewidth": 16 }],
//!   "layers": [
//!     { "name": "ground", "type": "tilelayer", "data": [1, 0, 2, 3, 3, 3] },
//!     { "name": "spawns", "type": "objectgroup",
//!       "objects": [{ "name": "player", "type": "spawn", "x": 8, "y": 4 }] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// High bits Tiled uses for flipped/rotated tiles.
pub const GID_FLAG_MASK: u32 = 0xF000_0000;

/// Strip Tiled's flip flags from a global tile id.
pub fn clean_gid(gid: u32) -> u32 {
    gid & !GID_FLAG_MASK
}

fn default_firstgid() -> u32 {
    1
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tilemap {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Tile width in pixels.
    pub tilewidth: u32,
    pub tileheight: u32,
    #[serde(default)]
    pub tilesets: Vec<Tileset>,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tileset {
    #[serde(default = "default_firstgid")]
    pub firstgid: u32,
    #[serde(default)]
    pub name: String,
    /// Sheet image, relative to the map file. Absent for external tilesets.
    #[serde(default)]
    pub image: Option<String>,
    /// Tile size in pixels; falls back to the map's tile width.
    #[serde(default)]
    pub tilewidth: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Tilelayer,
    Objectgroup,
    Imagelayer,
    Group,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Layer {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Global tile ids, row-major. 0 is an empty cell.
    #[serde(default)]
    pub data: Vec<u32>,
    #[serde(default)]
    pub objects: Vec<MapObject>,
}

/// An object from an object-group layer, in pixels.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MapObject {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    /// Tiled's "type" (renamed "class" in Tiled 1.9+).
    #[serde(default, rename = "type", alias = "class")]
    pub class: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    /// Name of the layer the object came from. Filled in on load.
    #[serde(skip)]
    pub layer: String,
}

impl Tilemap {
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Loads a map from a Tiled JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path.as_ref())?;
        let map = Self::from_json_str(&file_content)?;
        Ok(map)
    }

    /// Map width in pixels.
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tilewidth as f32
    }

    /// Map height in pixels.
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tileheight as f32
    }

    pub fn first_tileset(&self) -> Option<&Tileset> {
        self.tilesets.first()
    }

    /// Every object of every object group, tagged with its layer name.
    pub fn objects(&self) -> Vec<MapObject> {
        self.layers
            .iter()
            .filter(|l| l.kind == LayerKind::Objectgroup)
            .flat_map(|l| {
                l.objects.iter().cloned().map(move |mut o| {
                    o.layer = l.name.clone();
                    o
                })
            })
            .collect()
    }
}

impl Tileset {
    /// Tile size in pixels, defaulting to the map's tile width.
    pub fn tile_size(&self, map: &Tilemap) -> u32 {
        self.tilewidth.unwrap_or(map.tilewidth)
    }

    /// Index of `gid` within this tileset, if it belongs to it.
    pub fn local_index(&self, gid: u32) -> Option<usize> {
        let gid = clean_gid(gid);
        gid.checked_sub(self.firstgid).map(|i| i as usize)
    }

    /// Sheet image path resolved against the directory of the map file.
    pub fn image_path(&self, map_dir: &Path) -> Option<PathBuf> {
        self.image.as_ref().map(|image| map_dir.join(image))
    }
}

impl Layer {
    /// Non-empty cells as `(column, row, gid)`, row-major.
    pub fn tiles(&self, map_width: u32) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        let width = map_width.max(1);
        self.data
            .iter()
            .enumerate()
            .filter(|(_, gid)| clean_gid(**gid) != 0)
            .map(move |(i, gid)| (i as u32 % width, i as u32 / width, *gid))
    }
}
