//! Simulation clock.
//!
//! The clock is the single source of truth for time in the simulation. It
//! counts completed ticks and derives the current store day from the tick
//! counter; the day is never stored independently.
//!
//! Tick `1` is the first tick of day `1`. With `ticks_per_day = 810`, ticks
//! `1..=810` belong to day 1, ticks `811..=1620` to day 2, and so on.

use crate::config::TimeConfig;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// Invalid time configuration (e.g. zero ticks per day).
    #[error("invalid time configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Tick counter for the store simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationClock {
    /// Number of completed ticks.
    tick: u64,

    /// Ticks that make up one store day.
    ticks_per_day: u64,

    /// Last day of the run.
    max_days: u32,
}

impl SimulationClock {
    /// Create a clock at tick 0 from a time configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `ticks_per_day` or
    /// `max_days` is zero.
    pub fn new(config: &TimeConfig) -> Result<Self, ClockError> {
        Self::from_parts(0, config.ticks_per_day, config.max_days)
    }

    /// Create a clock from explicit parameters (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `ticks_per_day` or
    /// `max_days` is zero.
    pub fn from_parts(tick: u64, ticks_per_day: u64, max_days: u32) -> Result<Self, ClockError> {
        if ticks_per_day == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "ticks_per_day must be at least 1".to_owned(),
            });
        }
        if max_days == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "max_days must be at least 1".to_owned(),
            });
        }
        Ok(Self {
            tick,
            ticks_per_day,
            max_days,
        })
    }

    /// Advance the clock by one tick. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the tick counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        Ok(self.tick)
    }

    /// Number of completed ticks.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Ticks per store day.
    pub const fn ticks_per_day(&self) -> u64 {
        self.ticks_per_day
    }

    /// Last day of the run.
    pub const fn max_days(&self) -> u32 {
        self.max_days
    }

    /// The day the most recent tick belongs to (day 1 before any tick).
    pub fn day(&self) -> u32 {
        // ticks_per_day >= 1 is guaranteed by the constructor.
        let completed_days = self
            .tick
            .saturating_sub(1)
            .checked_div(self.ticks_per_day)
            .unwrap_or(0);
        u32::try_from(completed_days)
            .unwrap_or(u32::MAX)
            .saturating_add(1)
    }

    /// 1-based position of the most recent tick within its day.
    pub fn tick_in_day(&self) -> u64 {
        self.tick
            .saturating_sub(1)
            .checked_rem(self.ticks_per_day)
            .unwrap_or(0)
            .saturating_add(1)
    }

    /// Total ticks in the run, saturating on overflow.
    pub fn total_ticks(&self) -> u64 {
        self.ticks_per_day.saturating_mul(u64::from(self.max_days))
    }

    /// Whether the final tick of the final day has run.
    pub fn is_finished(&self) -> bool {
        self.tick >= self.total_ticks()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_clock_starts_on_day_one() {
        let clock = SimulationClock::new(&TimeConfig::default()).unwrap();
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.day(), 1);
        assert_eq!(clock.ticks_per_day(), 810);
        assert_eq!(clock.max_days(), 14);
    }

    #[test]
    fn day_rolls_over_after_ticks_per_day() {
        let mut clock = SimulationClock::from_parts(0, 3, 2).unwrap();
        let days: Vec<u32> = (0..6)
            .map(|_| {
                clock.advance().unwrap();
                clock.day()
            })
            .collect();
        assert_eq!(days, vec![1, 1, 1, 2, 2, 2]);
        assert!(clock.is_finished());
    }

    #[test]
    fn tick_in_day_is_one_based() {
        let mut clock = SimulationClock::from_parts(0, 4, 1).unwrap();
        clock.advance().unwrap();
        assert_eq!(clock.tick_in_day(), 1);
        for _ in 0..3 {
            clock.advance().unwrap();
        }
        assert_eq!(clock.tick_in_day(), 4);
    }

    #[test]
    fn zero_ticks_per_day_is_rejected() {
        assert!(SimulationClock::from_parts(0, 0, 1).is_err());
        assert!(SimulationClock::from_parts(0, 1, 0).is_err());
    }

    #[test]
    fn overflow_is_an_error() {
        let mut clock = SimulationClock::from_parts(u64::MAX, 1, 1).unwrap();
        assert!(matches!(clock.advance(), Err(ClockError::TickOverflow)));
    }
}
