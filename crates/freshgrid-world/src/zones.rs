//! Static zones of the store floor.
//!
//! Three bands are carved out of the grid once, at start-up:
//!
//! | Zone     | Shape                                   | Effect                              |
//! |----------|-----------------------------------------|-------------------------------------|
//! | No-drop  | columns centred on the vertical midline | cargo may not be dropped or pushed in |
//! | Danger   | columns centred on the vertical midline | registering cargo incinerates it    |
//! | Safe     | rows centred on `safe_band_center_y`    | freshness never changes             |
//!
//! The no-drop and danger bands normally coincide (the conveyor runs down
//! the middle of the floor into the incinerator) but are sized separately.

use std::ops::Range;

use freshgrid_types::GridCoordinate;
use serde::Deserialize;

/// Band sizes read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ZoneConfig {
    /// Width in columns of the incinerator band.
    #[serde(default = "default_band_width")]
    pub danger_band_width: u32,

    /// Width in columns of the conveyor band where drops are refused.
    #[serde(default = "default_band_width")]
    pub no_drop_band_width: u32,

    /// Height in rows of the freshness-immune band. Zero disables it.
    #[serde(default = "default_safe_band_height")]
    pub safe_band_height: u32,

    /// Row the safe band is centred on.
    #[serde(default = "default_safe_band_center_y")]
    pub safe_band_center_y: u32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            danger_band_width: default_band_width(),
            no_drop_band_width: default_band_width(),
            safe_band_height: default_safe_band_height(),
            safe_band_center_y: default_safe_band_center_y(),
        }
    }
}

const fn default_band_width() -> u32 {
    2
}

const fn default_safe_band_height() -> u32 {
    2
}

const fn default_safe_band_center_y() -> u32 {
    1
}

/// Resolved zone extents for a concrete grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneLayout {
    /// Columns of the danger band.
    danger_columns: Range<i32>,
    /// Columns of the no-drop band.
    no_drop_columns: Range<i32>,
    /// Rows of the safe band.
    safe_rows: Range<i32>,
}

impl ZoneLayout {
    /// Compute the layout for a `width` x `height` grid.
    pub fn compute(width: i32, height: i32, config: &ZoneConfig) -> Self {
        let midline = width.checked_div(2).unwrap_or(0);
        let danger_columns = centered_band(width, midline, config.danger_band_width);
        let no_drop_columns = centered_band(width, midline, config.no_drop_band_width);
        let safe_center = i32::try_from(config.safe_band_center_y).unwrap_or(i32::MAX);
        let safe_rows = centered_band(height, safe_center, config.safe_band_height);

        Self {
            danger_columns,
            no_drop_columns,
            safe_rows,
        }
    }

    /// Whether registering cargo at `coord` incinerates it.
    pub fn is_danger(&self, coord: GridCoordinate) -> bool {
        self.danger_columns.contains(&coord.x)
    }

    /// Whether cargo may not be dropped at `coord`.
    pub fn is_no_drop(&self, coord: GridCoordinate) -> bool {
        self.no_drop_columns.contains(&coord.x)
    }

    /// Whether cargo at `coord` is immune to freshness change.
    pub fn is_safe(&self, coord: GridCoordinate) -> bool {
        self.safe_rows.contains(&coord.y)
    }

    /// Columns of the danger band.
    pub fn danger_columns(&self) -> Range<i32> {
        self.danger_columns.clone()
    }

    /// Columns of the no-drop band.
    pub fn no_drop_columns(&self) -> Range<i32> {
        self.no_drop_columns.clone()
    }

    /// Rows of the safe band.
    pub fn safe_rows(&self) -> Range<i32> {
        self.safe_rows.clone()
    }
}

/// A `size`-wide band centred on `center`, clipped to `[0, extent)`.
///
/// An even `size` puts the extra cell on the high side of `center - size/2`,
/// so a width-2 band on a width-12 grid covers columns 5 and 6.
fn centered_band(extent: i32, center: i32, size: u32) -> Range<i32> {
    let size = i32::try_from(size).unwrap_or(i32::MAX);
    if size == 0 || extent <= 0 {
        return 0..0;
    }
    let start = center.saturating_sub(size.checked_div(2).unwrap_or(0));
    let end = start.saturating_add(size);
    let start = start.clamp(0, extent);
    let end = end.clamp(start, extent);
    start..end
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bands_center_on_midline() {
        let layout = ZoneLayout::compute(12, 10, &ZoneConfig::default());
        assert_eq!(layout.danger_columns(), 5..7);
        assert_eq!(layout.no_drop_columns(), 5..7);
        assert_eq!(layout.safe_rows(), 0..2);
    }

    #[test]
    fn odd_band_is_symmetric_on_odd_grid() {
        let config = ZoneConfig {
            danger_band_width: 3,
            no_drop_band_width: 1,
            safe_band_height: 0,
            safe_band_center_y: 0,
        };
        let layout = ZoneLayout::compute(11, 5, &config);
        assert_eq!(layout.danger_columns(), 4..7);
        assert_eq!(layout.no_drop_columns(), 5..6);
        assert!(layout.safe_rows().is_empty());
    }

    #[test]
    fn zero_width_disables_band() {
        let config = ZoneConfig {
            danger_band_width: 0,
            no_drop_band_width: 0,
            safe_band_height: 0,
            safe_band_center_y: 0,
        };
        let layout = ZoneLayout::compute(12, 10, &config);
        for x in 0..12 {
            let coord = GridCoordinate::new(x, 5);
            assert!(!layout.is_danger(coord));
            assert!(!layout.is_no_drop(coord));
            assert!(!layout.is_safe(coord));
        }
    }

    #[test]
    fn oversized_band_is_clipped() {
        let config = ZoneConfig {
            danger_band_width: 50,
            no_drop_band_width: 2,
            safe_band_height: 40,
            safe_band_center_y: 3,
        };
        let layout = ZoneLayout::compute(8, 6, &config);
        assert_eq!(layout.danger_columns(), 0..8);
        assert_eq!(layout.safe_rows(), 0..6);
    }

    #[test]
    fn config_defaults_from_partial_yaml() {
        let config: ZoneConfig = serde_yml::from_str("safe_band_height: 3").unwrap();
        assert_eq!(config.safe_band_height, 3);
        assert_eq!(config.danger_band_width, 2);
        assert_eq!(config.safe_band_center_y, 1);
    }
}
