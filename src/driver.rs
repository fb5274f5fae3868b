//! Fixed-rate tick driver
//!
//! Hosts hand over wall-clock frame deltas; the driver turns them into whole
//! simulation ticks. Partial ticks never happen: leftover time waits in the
//! accumulator for the next frame.

use crate::consts::{MAX_SUBSTEPS, TICK_DT};
use crate::sim::World;

/// Longest frame delta accepted in one call (seconds)
const MAX_FRAME_DT: f32 = 0.1;

/// Accumulator loop around [`World::step`]
#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    tick_dt: f32,
    max_substeps: u32,
    accumulator: f32,
    running: bool,
    ticks_run: u64,
}

impl Default for FixedStepDriver {
    fn default() -> Self {
        Self::new(TICK_DT, MAX_SUBSTEPS)
    }
}

impl FixedStepDriver {
    pub fn new(tick_dt: f32, max_substeps: u32) -> Self {
        debug_assert!(tick_dt > 0.0, "tick_dt must be positive");
        Self {
            tick_dt,
            max_substeps,
            accumulator: 0.0,
            running: true,
            ticks_run: 0,
        }
    }

    /// Run as many whole ticks as `frame_dt` pays for
    ///
    /// Returns the number of ticks run. Stops early, and stops the driver,
    /// once the world turns terminal.
    pub fn advance(&mut self, world: &mut World, frame_dt: f32) -> u32 {
        if !self.running {
            return 0;
        }
        if world.is_terminal() {
            self.stop();
            return 0;
        }

        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.tick_dt && substeps < self.max_substeps {
            self.accumulator -= self.tick_dt;
            substeps += 1;
            self.ticks_run += 1;

            if world.step() {
                self.stop();
                break;
            }
        }

        // Drop the backlog instead of spiraling
        if substeps == self.max_substeps && self.accumulator >= self.tick_dt {
            log::warn!("Tick driver fell behind, dropping {:.3}s", self.accumulator);
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Pause: world state stays at the last completed tick
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("Tick driver stopped after {} ticks", self.ticks_run);
        }
        self.running = false;
        self.accumulator = 0.0;
    }

    /// Resume ticking (after a pause or a world restart)
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Total ticks run by this driver
    pub fn ticks_run(&self) -> u64 {
        self.ticks_run
    }

    /// Fraction of a tick waiting in the accumulator (for render interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.tick_dt
    }
}
