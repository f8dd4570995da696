//! Fixed-timestep frame clock
//!
//! Converts variable display-frame durations into a whole number of
//! simulation ticks so movement speed does not depend on refresh rate.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame gap honored; longer stalls (tab switch, debugger) are dropped
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    accumulator: f32,
}

impl FixedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's elapsed time (seconds); returns how many ticks to run
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }

        // Drop backlog we refused to simulate
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_sixtieth() {
        let mut clock = FixedClock::new();
        let mut total = 0;
        for _ in 0..60 {
            total += clock.advance(SIM_DT + 1e-6);
        }
        assert_eq!(total, 60);
    }

    #[test]
    fn test_fast_display_accumulates() {
        // 120 Hz display: a tick every other frame
        let mut clock = FixedClock::new();
        let ticks: Vec<u32> = (0..4).map(|_| clock.advance(SIM_DT / 2.0 + 1e-6)).collect();
        assert_eq!(ticks.iter().sum::<u32>(), 2);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut clock = FixedClock::new();
        assert_eq!(clock.advance(5.0), MAX_SUBSTEPS);
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut clock = FixedClock::new();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(SIM_DT / 2.0), 0);
    }
}
