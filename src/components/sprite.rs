use raylib::prelude::{Rectangle, Vector2};

/// Sprite is identified by a texture key, its size in pixels and an offset if the texture is a spritesheet.
/// The offset is the top-left of the source rectangle, so it selects the frame or tile.
/// The origin is the rotation pivot relative to the sprite's top-left; `None` means its centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
    pub offset: Vector2,
    pub origin: Option<Vector2>,
}

impl Sprite {
    pub fn new(tex_key: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            width,
            height,
            offset: Vector2::new(x, y),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: Vector2) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Source rectangle inside the texture.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle::new(self.offset.x, self.offset.y, self.width, self.height)
    }

    pub fn pivot(&self) -> Vector2 {
        self.origin
            .unwrap_or_else(|| Vector2::new(self.width / 2.0, self.height / 2.0))
    }
}

/// Slice a sheet of `sheet_width x sheet_height` pixels into square tiles,
/// left to right, top to bottom. Partial tiles at the right or bottom edge
/// are dropped.
pub fn slice_sheet(
    tex_key: &str,
    sheet_width: u32,
    sheet_height: u32,
    tile_size: u32,
) -> Vec<Sprite> {
    if tile_size == 0 {
        return Vec::new();
    }
    let cols = sheet_width / tile_size;
    let rows = sheet_height / tile_size;
    let size = tile_size as f32;

    let mut tiles = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            tiles.push(Sprite::new(
                tex_key,
                col as f32 * size,
                row as f32 * size,
                size,
                size,
            ));
        }
    }
    tiles
}
