//! One time slice of the per-level series.

use serde::Serialize;

use atmo_common::{AtmoError, AtmoResult, PressureLevel};

use crate::payload::MeteogramData;

/// Series name prefixes used by the provider.
pub mod series {
    pub const GEOPOTENTIAL_HEIGHT: &str = "gh";
    pub const TEMPERATURE: &str = "temp";
    pub const WIND_U: &str = "wind_u";
    pub const WIND_V: &str = "wind_v";
}

/// Raw values of one pressure level at the selected time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelSample {
    pub level: PressureLevel,
    /// Geopotential height, metres
    pub geopotential_height: f64,
    /// Air temperature, Kelvin
    pub temperature: f64,
    /// Eastward wind, m/s
    pub wind_u: f64,
    /// Northward wind, m/s
    pub wind_v: f64,
}

/// Samples for every requested level, in the order the levels were given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSampleSet {
    time_index: usize,
    levels: Vec<LevelSample>,
}

impl LevelSampleSet {
    /// Slice every level's series at `time_index`.
    ///
    /// Fails on the first series that is absent or too short.
    pub fn extract(
        data: &MeteogramData,
        time_index: usize,
        levels: &[PressureLevel],
    ) -> AtmoResult<Self> {
        if levels.is_empty() {
            return Err(AtmoError::invalid_input("no pressure levels requested"));
        }

        let levels = levels
            .iter()
            .map(|&level| -> AtmoResult<LevelSample> {
                let at = |quantity: &str| data.value_at(&level.series_key(quantity), time_index);
                Ok(LevelSample {
                    level,
                    geopotential_height: at(series::GEOPOTENTIAL_HEIGHT)?,
                    temperature: at(series::TEMPERATURE)?,
                    wind_u: at(series::WIND_U)?,
                    wind_v: at(series::WIND_V)?,
                })
            })
            .collect::<AtmoResult<Vec<_>>>()?;

        Ok(Self { time_index, levels })
    }

    pub fn time_index(&self) -> usize {
        self.time_index
    }

    pub fn levels(&self) -> &[LevelSample] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn pressure_levels(&self) -> Vec<PressureLevel> {
        self.levels.iter().map(|s| s.level).collect()
    }

    pub fn geopotential_heights(&self) -> Vec<f64> {
        self.levels.iter().map(|s| s.geopotential_height).collect()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.levels.iter().map(|s| s.temperature).collect()
    }

    pub fn wind_us(&self) -> Vec<f64> {
        self.levels.iter().map(|s| s.wind_u).collect()
    }

    pub fn wind_vs(&self) -> Vec<f64> {
        self.levels.iter().map(|s| s.wind_v).collect()
    }
}
