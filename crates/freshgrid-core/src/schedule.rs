//! Day-indexed weather schedule.
//!
//! The schedule is the only writer of the simulation's weather. Days are
//! 1-based; days without an entry are [`Weather::Normal`].

use std::collections::BTreeMap;

use freshgrid_types::Weather;

/// Weather for each store day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherSchedule {
    /// Day -> weather. Missing days are `Normal`.
    by_day: BTreeMap<u32, Weather>,
}

impl WeatherSchedule {
    /// Build a schedule from explicit day entries.
    pub const fn new(by_day: BTreeMap<u32, Weather>) -> Self {
        Self { by_day }
    }

    /// Weather in effect on `day`.
    pub fn weather_for_day(&self, day: u32) -> Weather {
        self.by_day.get(&day).copied().unwrap_or_default()
    }

    /// Days with non-default weather, in order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, Weather)> + '_ {
        self.by_day.iter().map(|(day, weather)| (*day, *weather))
    }
}
