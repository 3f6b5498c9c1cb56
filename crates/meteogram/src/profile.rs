//! The finished, immutable atmosphere profile.

use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;

use atmo_common::{from_epoch_millis, AtmoError, AtmoResult, InterpolatedFunction, Location};

use crate::derived::DerivedQuantities;
use crate::model::ModelName;
use crate::samples::LevelSampleSet;

pub const HEIGHT_LABEL: &str = "Height Above Sea Level (m)";

/// Most rows [`AtmosphereProfile::altitude_grid`] will produce.
pub const MAX_GRID_ROWS: usize = 100_000;

/// Atmospheric state as functions of altitude above sea level (m).
#[derive(Debug, Clone, Serialize)]
pub struct AtmosphereProfile {
    /// Normalized provider model name
    pub model: String,

    /// Pa
    pub pressure: InterpolatedFunction,
    /// K
    pub temperature: InterpolatedFunction,
    /// Degrees true, direction the wind comes from
    pub wind_direction: InterpolatedFunction,
    /// Degrees true, direction the wind blows toward
    pub wind_heading: InterpolatedFunction,
    /// m/s
    pub wind_speed: InterpolatedFunction,
    /// Eastward component, m/s
    pub wind_velocity_x: InterpolatedFunction,
    /// Northward component, m/s
    pub wind_velocity_y: InterpolatedFunction,

    /// Terrain elevation at the requested point, m
    pub elevation: f64,
    /// Larger altitude of the lowest and highest pressure level, m
    pub max_expected_height: f64,

    pub model_init_date: DateTime<Utc>,
    pub model_end_date: DateTime<Utc>,
    /// Whole hours of the average forecast step
    pub model_interval_hours: u32,

    pub model_init_lat: f64,
    pub model_end_lat: f64,
    pub model_init_lon: f64,
    pub model_end_lon: f64,

    /// Index into the time axis the profile was sliced at
    pub time_index: usize,
    /// Requested instant, epoch milliseconds
    pub target_millis: i64,

    pub debug: ProfileDebug,
}

/// Raw per-level arrays kept for inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileDebug {
    pub geopotentials: Vec<f64>,
    pub wind_us: Vec<f64>,
    pub wind_vs: Vec<f64>,
    /// hPa
    pub levels: Vec<u32>,
    pub temperatures: Vec<f64>,
    pub time_array: Vec<i64>,
    /// Geometric altitudes, aligned with `levels`
    pub heights: Vec<f64>,
}

/// Every quantity evaluated at one altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileRow {
    pub altitude: f64,
    pub pressure: f64,
    pub temperature: f64,
    pub wind_speed: f64,
    pub wind_heading: f64,
    pub wind_direction: f64,
    pub wind_u: f64,
    pub wind_v: f64,
}

impl AtmosphereProfile {
    /// Assemble the profile from one time slice and its derived arrays.
    ///
    /// `hours` must be the full, non-empty time axis of the response.
    pub(crate) fn assemble(
        model: &ModelName,
        location: Location,
        hours: &[i64],
        target_millis: i64,
        elevation: f64,
        samples: &LevelSampleSet,
        derived: &DerivedQuantities,
    ) -> AtmoResult<Self> {
        let (first, last) = match (hours.first(), hours.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Err(AtmoError::EmptyTimeAxis),
        };

        let altitude = &derived.altitude;
        let by_altitude = |outputs: &[f64], label: &str| {
            InterpolatedFunction::linear(
                altitude.iter().copied().zip(outputs.iter().copied()),
                HEIGHT_LABEL,
                label,
            )
        };

        let pascals: Vec<f64> = samples.pressure_levels().iter().map(|l| l.pascals()).collect();
        let temperatures = samples.temperatures();
        let wind_us = samples.wind_us();
        let wind_vs = samples.wind_vs();

        let max_expected_height = derived
            .max_expected_height()
            .ok_or_else(|| AtmoError::invalid_input("no levels to build a profile from"))?;

        Ok(Self {
            model: model.to_string(),
            pressure: by_altitude(&pascals, "Pressure (Pa)")?,
            temperature: by_altitude(&temperatures, "Temperature (K)")?,
            wind_direction: by_altitude(&derived.wind_direction, "Wind Direction (Deg True)")?,
            wind_heading: by_altitude(&derived.wind_heading, "Wind Heading (Deg True)")?,
            wind_speed: by_altitude(&derived.wind_speed, "Wind Speed (m/s)")?,
            wind_velocity_x: by_altitude(&wind_us, "Wind Velocity X (m/s)")?,
            wind_velocity_y: by_altitude(&wind_vs, "Wind Velocity Y (m/s)")?,
            elevation,
            max_expected_height,
            model_init_date: from_epoch_millis(first)?,
            model_end_date: from_epoch_millis(last)?,
            model_interval_hours: nominal_interval_hours(hours)?,
            model_init_lat: location.latitude,
            model_end_lat: location.latitude,
            model_init_lon: location.longitude,
            model_end_lon: location.longitude,
            time_index: samples.time_index(),
            target_millis,
            debug: ProfileDebug {
                geopotentials: samples.geopotential_heights(),
                wind_us,
                wind_vs,
                levels: samples
                    .pressure_levels()
                    .iter()
                    .map(|l| l.hectopascals())
                    .collect(),
                temperatures,
                time_array: hours.to_vec(),
                heights: altitude.clone(),
            },
        })
    }

    /// Evaluate every quantity at each altitude.
    pub fn sample(&self, altitudes: &[f64]) -> Vec<ProfileRow> {
        altitudes
            .iter()
            .map(|&altitude| ProfileRow {
                altitude,
                pressure: self.pressure.evaluate(altitude),
                temperature: self.temperature.evaluate(altitude),
                wind_speed: self.wind_speed.evaluate(altitude),
                wind_heading: self.wind_heading.evaluate(altitude),
                wind_direction: self.wind_direction.evaluate(altitude),
                wind_u: self.wind_velocity_x.evaluate(altitude),
                wind_v: self.wind_velocity_y.evaluate(altitude),
            })
            .collect()
    }

    /// Altitudes from the terrain elevation up to `max_expected_height`,
    /// `step` metres apart; the top is always included.
    ///
    /// Steps that would need more than [`MAX_GRID_ROWS`] rows are rejected.
    pub fn altitude_grid(&self, step: f64) -> AtmoResult<Vec<f64>> {
        if !(step.is_finite() && step > 0.0) {
            return Err(AtmoError::invalid_input(format!(
                "altitude step must be positive, got {}",
                step
            )));
        }

        let (bottom, top) = (self.elevation, self.max_expected_height);
        if top < bottom {
            return Ok(vec![top]);
        }

        let span = ((top - bottom) / step).floor();
        if !span.is_finite() || span >= MAX_GRID_ROWS as f64 {
            return Err(AtmoError::invalid_input(format!(
                "altitude step {} m over {} m needs more than {} rows",
                step,
                top - bottom,
                MAX_GRID_ROWS
            )));
        }
        let count = span as usize;
        let mut grid: Vec<f64> = (0..=count).map(|i| bottom + i as f64 * step).collect();
        if grid.last().map_or(true, |&last| last < top) {
            grid.push(top);
        }
        Ok(grid)
    }
}

/// Whole hours of the mean spacing of `hours`, read as an offset from the
/// epoch and reduced to an hour of day (so steps of a day or more wrap).
/// A single forecast hour has no spacing and yields 0.
pub fn nominal_interval_hours(hours: &[i64]) -> AtmoResult<u32> {
    match hours {
        [] => Err(AtmoError::EmptyTimeAxis),
        [_] => Ok(0),
        [first, .., last] => {
            let mean = (last - first) / (hours.len() as i64 - 1);
            Ok(from_epoch_millis(mean)?.hour())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_three_hourly() {
        let hours: Vec<i64> = (0..5).map(|i| 1_700_000_000_000 + i * 3 * 3_600_000).collect();
        assert_eq!(nominal_interval_hours(&hours).unwrap(), 3);
    }

    #[test]
    fn test_interval_uneven_spacing_averages() {
        // 1h then 5h: mean 3h
        let hours = [0, 3_600_000, 6 * 3_600_000];
        assert_eq!(nominal_interval_hours(&hours).unwrap(), 3);
    }

    #[test]
    fn test_interval_wraps_at_day() {
        let hours = [0, 24 * 3_600_000];
        assert_eq!(nominal_interval_hours(&hours).unwrap(), 0);
    }

    #[test]
    fn test_interval_single_and_empty() {
        assert_eq!(nominal_interval_hours(&[42]).unwrap(), 0);
        assert!(matches!(
            nominal_interval_hours(&[]),
            Err(AtmoError::EmptyTimeAxis)
        ));
    }
}
