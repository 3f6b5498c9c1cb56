//! JSON document printed by the CLI.

use chrono::{DateTime, Utc};
use serde::Serialize;

use meteogram::{AtmoResult, AtmosphereProfile, ProfileRow};

/// Profile metadata plus the quantities sampled on an altitude grid.
#[derive(Debug, Serialize)]
pub struct SoundingReport {
    pub model: String,
    pub latitude: f64,
    pub longitude: f64,
    pub requested_time: DateTime<Utc>,
    pub elevation: f64,
    pub max_expected_height: f64,
    pub model_init_date: DateTime<Utc>,
    pub model_end_date: DateTime<Utc>,
    pub model_interval_hours: u32,
    pub time_index: usize,
    pub rows: Vec<ProfileRow>,
}

impl SoundingReport {
    /// Sample `profile` every `step` metres from the terrain up.
    pub fn build(
        profile: &AtmosphereProfile,
        requested_time: DateTime<Utc>,
        step: f64,
    ) -> AtmoResult<Self> {
        let grid = profile.altitude_grid(step)?;
        Ok(Self {
            model: profile.model.clone(),
            latitude: profile.model_init_lat,
            longitude: profile.model_init_lon,
            requested_time,
            elevation: profile.elevation,
            max_expected_height: profile.max_expected_height,
            model_init_date: profile.model_init_date,
            model_end_date: profile.model_end_date,
            model_interval_hours: profile.model_interval_hours,
            time_index: profile.time_index,
            rows: profile.sample(&grid),
        })
    }
}
