//! Altitude and wind quantities derived from per-level samples.

use serde::Serialize;

use crate::samples::LevelSampleSet;

/// Earth radius used for the geopotential correction, metres.
pub const EARTH_RADIUS: f64 = 6.3781e6;

/// Specific gas constant of dry air, J/(K·kg).
pub const AIR_GAS_CONSTANT: f64 = 287.05287;

/// Standard gravity, m/s².
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Geometric altitude above sea level from geopotential height.
///
/// `R * gh / (R - gh)`. Not guarded: `gh == R` divides by zero.
pub fn geopotential_to_altitude(geopotential_height: f64) -> f64 {
    EARTH_RADIUS * geopotential_height / (EARTH_RADIUS - geopotential_height)
}

/// Magnitude of the horizontal wind vector.
pub fn wind_speed(u: f64, v: f64) -> f64 {
    u.hypot(v)
}

/// Compass bearing the wind blows toward, degrees in [0, 360).
pub fn wind_heading(u: f64, v: f64) -> f64 {
    normalize_degrees(u.atan2(v).to_degrees())
}

/// Compass bearing the wind blows from, degrees in [0, 360).
pub fn wind_direction(u: f64, v: f64) -> f64 {
    normalize_degrees(wind_heading(u, v) - 180.0)
}

fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Per-level derived arrays, aligned with the sample set they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedQuantities {
    pub altitude: Vec<f64>,
    pub wind_speed: Vec<f64>,
    pub wind_heading: Vec<f64>,
    pub wind_direction: Vec<f64>,
}

impl DerivedQuantities {
    pub fn compute(samples: &LevelSampleSet) -> Self {
        let levels = samples.levels();
        Self {
            altitude: levels
                .iter()
                .map(|s| geopotential_to_altitude(s.geopotential_height))
                .collect(),
            wind_speed: levels.iter().map(|s| wind_speed(s.wind_u, s.wind_v)).collect(),
            wind_heading: levels.iter().map(|s| wind_heading(s.wind_u, s.wind_v)).collect(),
            wind_direction: levels
                .iter()
                .map(|s| wind_direction(s.wind_u, s.wind_v))
                .collect(),
        }
    }

    /// Larger of the first and last altitudes.
    ///
    /// Only the array ends are compared. With levels in descending pressure
    /// order they bracket the column, but interior levels are not checked.
    pub fn max_expected_height(&self) -> Option<f64> {
        let first = *self.altitude.first()?;
        let last = *self.altitude.last()?;
        Some(first.max(last))
    }
}
