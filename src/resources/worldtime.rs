//! Frame clock and fixed-step bookkeeping.
//!
//! All times are milliseconds. Velocities are expressed in pixels per
//! [`VELOCITY_TIME_UNIT_MS`], so movement code multiplies by
//! [`WorldTime::step_scale`].

/// Default interval between fixed updates, in milliseconds.
pub const DEFAULT_FIXED_UPDATE_INTERVAL_MS: f64 = 10.0;
/// Time unit velocities are measured in.
pub const VELOCITY_TIME_UNIT_MS: f32 = 10.0;

#[derive(Clone, Copy, Debug)]
pub struct WorldTime {
    /// Timestamp of the current frame.
    pub now: f64,
    /// Milliseconds since the previous frame.
    pub delta: f32,
    pub fixed_update_interval: f64,
    pub frame_count: u64,
    last_tick: Option<f64>,
    last_fixed_update: f64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            now: 0.0,
            delta: 0.0,
            fixed_update_interval: DEFAULT_FIXED_UPDATE_INTERVAL_MS,
            frame_count: 0,
            last_tick: None,
            last_fixed_update: 0.0,
        }
    }
}

impl WorldTime {
    pub fn with_fixed_update_interval(mut self, ms: f64) -> Self {
        self.fixed_update_interval = ms;
        self
    }

    /// Advance the clock to `now_ms`.
    ///
    /// Returns true when a fixed update is due. At most one fixed update is
    /// reported per call; the fixed clock advances by exactly one interval so
    /// the remainder carries into the next frame. The first call seeds both
    /// clocks and yields a zero delta.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let last_tick = match self.last_tick {
            Some(t) => t,
            None => {
                self.last_fixed_update = now_ms;
                now_ms
            }
        };

        let fixed_due = now_ms - self.last_fixed_update > self.fixed_update_interval;
        if fixed_due {
            self.last_fixed_update += self.fixed_update_interval;
        }

        self.now = now_ms;
        self.delta = (now_ms - last_tick) as f32;
        self.last_tick = Some(now_ms);
        self.frame_count += 1;

        fixed_due
    }

    /// Multiplier turning a per-unit velocity into this frame's displacement.
    pub fn step_scale(&self) -> f32 {
        self.delta / VELOCITY_TIME_UNIT_MS
    }

    /// Clock with a fixed delta, for driving passes without a real clock.
    pub fn with_delta(delta_ms: f32) -> Self {
        WorldTime {
            delta: delta_ms,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_seeds_clocks() {
        let mut time = WorldTime::default();
        let fixed = time.tick(5000.0);
        assert!(!fixed);
        assert_eq!(time.delta, 0.0);
        assert_eq!(time.now, 5000.0);
        assert_eq!(time.frame_count, 1);
    }

    #[test]
    fn test_delta_between_ticks() {
        let mut time = WorldTime::default();
        time.tick(1000.0);
        time.tick(1016.0);
        assert_eq!(time.delta, 16.0);
        assert_eq!(time.step_scale(), 1.6);
    }

    #[test]
    fn test_fixed_update_requires_strictly_more_than_interval() {
        let mut time = WorldTime::default();
        time.tick(0.0);
        assert!(!time.tick(10.0));
        assert!(time.tick(11.0));
    }

    #[test]
    fn test_fixed_update_at_most_once_and_keeps_remainder() {
        let mut time = WorldTime::default();
        time.tick(0.0);
        // 35ms late: only one fixed update now, the backlog drains one per frame.
        assert!(time.tick(35.0));
        assert!(time.tick(36.0));
        assert!(time.tick(37.0));
        assert!(!time.tick(38.0));
        assert!(time.tick(41.0));
    }

    #[test]
    fn test_custom_interval() {
        let mut time = WorldTime::default().with_fixed_update_interval(50.0);
        time.tick(0.0);
        assert!(!time.tick(40.0));
        assert!(time.tick(51.0));
    }
}
