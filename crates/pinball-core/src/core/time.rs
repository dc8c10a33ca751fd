/// Default cap on simulation ticks per rendered frame.
pub const DEFAULT_MAX_STEPS: u32 = 10;

/// Fixed timestep accumulator.
/// The table ticks at a constant rate no matter how irregular the host's frames are.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Upper bound on ticks per frame. Time beyond it is dropped.
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self::with_max_steps(dt, DEFAULT_MAX_STEPS)
    }

    pub fn with_max_steps(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed ticks to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        // A backgrounded tab can hand us a negative or huge delta; clamp both ends.
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }
}
