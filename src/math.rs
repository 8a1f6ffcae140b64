//! Small vector helpers on top of raylib's [`Vector2`].

use raylib::prelude::Vector2;

pub trait VectorExt {
    /// Same direction, magnitude `length`. A zero vector stays zero.
    fn with_length(self, length: f32) -> Vector2;
    /// Unit vector in the same direction. A zero vector stays zero.
    fn normalise(self) -> Vector2;
}

impl VectorExt for Vector2 {
    fn with_length(self, length: f32) -> Vector2 {
        let current = self.length();
        if current == 0.0 {
            return Vector2::zero();
        }
        Vector2::new(self.x / current * length, self.y / current * length)
    }

    fn normalise(self) -> Vector2 {
        self.with_length(1.0)
    }
}

/// Heading from `a` to `b` in degrees, where 0 points up and angles grow clockwise.
pub fn angle_between(a: Vector2, b: Vector2) -> f32 {
    (b.y - a.y).atan2(b.x - a.x).to_degrees() + 90.0
}
