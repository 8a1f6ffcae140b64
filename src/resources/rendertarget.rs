//! Offscreen canvas for fixed-resolution rendering.
//!
//! The scene is drawn into a texture at the game's canvas size, which is then
//! blitted to the window scaled by the configured integer or fractional scale.

use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Texture filtering mode for scaling the canvas.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum RenderFilter {
    /// Point/nearest-neighbor filtering - sharp pixels, no blur.
    #[default]
    Nearest,
    /// Bilinear filtering - smooth scaling with interpolation.
    Bilinear,
}

impl RenderFilter {
    fn raylib_filter(self) -> i32 {
        match self {
            RenderFilter::Nearest => TextureFilter::TEXTURE_FILTER_POINT as i32,
            RenderFilter::Bilinear => TextureFilter::TEXTURE_FILTER_BILINEAR as i32,
        }
    }
}

impl FromStr for RenderFilter {
    type Err = String;

    /// Parse the `[window] filter` config value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "point" => Ok(RenderFilter::Nearest),
            "bilinear" | "linear" => Ok(RenderFilter::Bilinear),
            other => Err(format!("Unknown render filter '{}'", other)),
        }
    }
}

impl fmt::Display for RenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderFilter::Nearest => write!(f, "nearest"),
            RenderFilter::Bilinear => write!(f, "bilinear"),
        }
    }
}

/// Canvas texture plus the size it was created with.
///
/// Holds GPU resources, so it lives on the main thread alongside the
/// raylib handle.
pub struct RenderTarget {
    pub texture: RenderTexture2D,
    pub game_width: u32,
    pub game_height: u32,
    pub filter: RenderFilter,
}

impl RenderTarget {
    /// Create a canvas of `width x height` pixels scaled with `filter`.
    pub fn new(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
        filter: RenderFilter,
    ) -> Result<Self, String> {
        let texture = rl
            .load_render_texture(th, width, height)
            .map_err(|e| format!("Failed to create render texture: {}", e))?;

        let mut target = Self {
            texture,
            game_width: width,
            game_height: height,
            filter,
        };
        target.apply_filter();

        Ok(target)
    }

    fn apply_filter(&mut self) {
        unsafe {
            ffi::SetTextureFilter(self.texture.texture, self.filter.raylib_filter());
        }
    }

    /// Source rectangle for blitting the canvas.
    ///
    /// The height is negative to flip the Y axis, compensating for OpenGL's
    /// inverted render-texture coordinates.
    pub fn source_rect(&self) -> Rectangle {
        canvas_source_rect(self.game_width, self.game_height)
    }

    /// Window rectangle the canvas is stretched over.
    pub fn dest_rect(&self, scale: f32) -> Rectangle {
        canvas_dest_rect(self.game_width, self.game_height, scale)
    }
}

pub fn canvas_source_rect(width: u32, height: u32) -> Rectangle {
    Rectangle {
        x: 0.0,
        y: 0.0,
        width: width as f32,
        height: -(height as f32),
    }
}

pub fn canvas_dest_rect(width: u32, height: u32, scale: f32) -> Rectangle {
    Rectangle {
        x: 0.0,
        y: 0.0,
        width: width as f32 * scale,
        height: height as f32 * scale,
    }
}
