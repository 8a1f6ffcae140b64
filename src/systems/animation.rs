//! Animation ticking.
//!
//! Runs after the draw pass so the frame that was just shown stays on screen
//! for its full duration.

use crate::resources::worldtime::WorldTime;
use crate::scene::Scene;

/// Advance every entity animation by the frame delta, moving its sprite's
/// source rectangle along the sheet.
pub fn advance_animations(scene: &mut Scene, time: &WorldTime) {
    for entity in scene.entities_mut() {
        if let (Some(animation), Some(sprite)) = (entity.animation.as_mut(), entity.sprite.as_mut()) {
            animation.update(sprite, time.delta);
        }
    }
}
