//! Horizontal sprite-sheet animation.
//!
//! Frames are laid out left to right starting at source x = 0 on the row
//! selected by the sprite's source y. Each step moves the sprite's source
//! rectangle one sprite width to the right.

use crate::components::sprite::Sprite;

/// Default time each frame stays on screen, in milliseconds.
pub const DEFAULT_FRAME_DURATION_MS: f32 = 120.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// Number of frames in the strip.
    pub frames: usize,
    pub frame_duration: f32,
    pub current_frame: usize,
    /// Milliseconds since the last frame step.
    pub elapsed: f32,
    pub running: bool,
    /// True only during the tick in which the strip wrapped back to frame 0.
    pub ended: bool,
}

impl Animation {
    pub fn new(frames: usize) -> Self {
        Self {
            frames,
            frame_duration: DEFAULT_FRAME_DURATION_MS,
            current_frame: 0,
            elapsed: 0.0,
            running: false,
            ended: false,
        }
    }

    pub fn with_frame_duration(mut self, ms: f32) -> Self {
        self.frame_duration = ms;
        self
    }

    /// Rewind to the first frame and start playing.
    pub fn start(&mut self, sprite: &mut Sprite) {
        sprite.offset.x = 0.0;
        self.current_frame = 0;
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Rewind to the first frame and halt.
    pub fn stop(&mut self, sprite: &mut Sprite) {
        sprite.offset.x = 0.0;
        self.current_frame = 0;
        self.running = false;
    }

    /// Advance by `delta_ms`. At most one frame step per call.
    pub fn update(&mut self, sprite: &mut Sprite, delta_ms: f32) {
        self.ended = false;
        if !self.running {
            return;
        }
        self.elapsed += delta_ms;
        if self.elapsed <= self.frame_duration {
            return;
        }
        self.elapsed = 0.0;
        self.current_frame += 1;
        if self.current_frame >= self.frames {
            self.current_frame = 0;
            sprite.offset.x = 0.0;
            self.ended = true;
            return;
        }
        sprite.offset.x += sprite.width;
    }
}
