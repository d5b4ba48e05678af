//! Fixed timestep accumulator.

/// Converts variable frame times into a whole number of fixed ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Accumulated unsimulated time
    accumulator: f32,
    /// Fixed tick length
    fixed_dt: f32,
    /// Largest frame time accepted in one call
    max_dt: f32,
    /// Upper bound on ticks per frame
    max_updates: u32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FixedTimestep {
    /// Creates an accumulator ticking at `tick_rate` Hz.
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        Self {
            accumulator: 0.0,
            fixed_dt: 1.0 / tick_rate.max(1) as f32,
            max_dt: 0.25, // Prevents spiral of death
            max_updates: 10,
        }
    }

    /// Fixed tick length in seconds.
    #[must_use]
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Unsimulated time carried into the next frame.
    #[must_use]
    pub fn remainder(&self) -> f32 {
        self.accumulator
    }

    /// Adds a frame's time and returns how many fixed ticks to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut count = 0;
        while self.accumulator >= self.fixed_dt && count < self.max_updates {
            self.accumulator -= self.fixed_dt;
            count += 1;
        }

        // Still behind: drop the backlog
        if self.accumulator > self.fixed_dt * 2.0 {
            self.accumulator = 0.0;
        }

        count
    }
}
