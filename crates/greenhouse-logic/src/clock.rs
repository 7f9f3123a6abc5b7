//! Wall-clock tick driver.
//!
//! Stands in for the dashboard's interval timer: the host feeds elapsed
//! frame time into [`TickClock::advance`], and the clock fires one engine
//! tick per tick interval of the engine's current speed.
//!
//! ```
//! use std::time::Duration;
//! use greenhouse_logic::clock::TickClock;
//! use greenhouse_logic::engine::DigitalTwin;
//!
//! let mut twin = DigitalTwin::new();
//! let mut clock = TickClock::new();
//! twin.start();
//! assert_eq!(clock.advance(&mut twin, Duration::from_millis(2500)), 2);
//! assert_eq!(twin.current_day(), 2);
//! ```

use crate::engine::DigitalTwin;
use std::time::Duration;

/// Accumulates elapsed time and converts it to engine ticks.
#[derive(Debug, Clone, Default)]
pub struct TickClock {
    pending: Duration,
    generation: u64,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time accumulated toward the next tick.
    pub fn pending(&self) -> Duration {
        self.pending
    }

    /// Drop any accumulated time.
    pub fn reset(&mut self) {
        self.pending = Duration::ZERO;
    }

    /// Feed `elapsed` wall-clock time and fire the ticks that fall due.
    ///
    /// `is_running` is re-checked before every fire, so a run that ends
    /// mid-batch fires nothing further and leaves no backlog behind. Time
    /// accumulated before a pause, restart or reset is discarded.
    /// Returns the number of samples appended.
    pub fn advance(&mut self, twin: &mut DigitalTwin, elapsed: Duration) -> u32 {
        if twin.run_generation() != self.generation {
            self.generation = twin.run_generation();
            self.reset();
        }
        if !twin.is_running() {
            self.reset();
            return 0;
        }

        self.pending = self.pending.saturating_add(elapsed);
        let mut fired = 0;
        loop {
            let interval = twin.speed().tick_interval();
            if self.pending < interval {
                break;
            }
            if !twin.is_running() {
                self.reset();
                break;
            }
            self.pending -= interval;
            if twin.tick().is_some() {
                fired += 1;
            }
        }
        fired
    }
}
