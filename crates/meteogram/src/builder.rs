//! Configure a location and instant, then build profiles from a source.

use tracing::{debug, info, instrument, warn};

use atmo_common::{
    AtmoError, AtmoResult, DateInput, Location, ObservationInstant, PressureLevel,
};

use crate::client::MeteogramSource;
use crate::derived::DerivedQuantities;
use crate::model::ModelName;
use crate::payload::select_time_index;
use crate::profile::AtmosphereProfile;
use crate::samples::LevelSampleSet;

/// Model used when the caller does not name one.
pub const DEFAULT_MODEL: &str = "ECMWF";

/// Request configuration for atmosphere profiles.
///
/// `process` borrows the configuration immutably and returns a new
/// [`AtmosphereProfile`] each call, so one instance can serve concurrent
/// requests and reconfiguring never touches profiles already built.
#[derive(Debug, Clone)]
pub struct AtmosphereModel<S> {
    source: S,
    location: Option<Location>,
    instant: Option<ObservationInstant>,
    levels: Vec<PressureLevel>,
}

impl<S: MeteogramSource> AtmosphereModel<S> {
    /// Located at 0°/0° with no date yet, using the standard pressure levels.
    pub fn new(source: S) -> Self {
        Self {
            source,
            location: Some(Location::default()),
            instant: None,
            levels: PressureLevel::standard(),
        }
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.set_location(latitude, longitude);
        self
    }

    pub fn set_location(&mut self, latitude: f64, longitude: f64) {
        self.location = Some(Location::new(latitude, longitude));
    }

    /// Forget the location; `process` fails until a new one is set.
    pub fn clear_location(&mut self) {
        self.location = None;
    }

    pub fn with_date(mut self, date: impl Into<DateInput>, timezone: &str) -> AtmoResult<Self> {
        self.set_date(date, timezone)?;
        Ok(self)
    }

    /// Replace the observation instant. On error the previous instant is kept.
    pub fn set_date(&mut self, date: impl Into<DateInput>, timezone: &str) -> AtmoResult<()> {
        self.instant = Some(ObservationInstant::new(date, timezone)?);
        Ok(())
    }

    pub fn with_instant(mut self, instant: ObservationInstant) -> Self {
        self.instant = Some(instant);
        self
    }

    /// Levels to read from the payload, lowest altitude first.
    pub fn with_pressure_levels(mut self, levels: impl IntoIterator<Item = PressureLevel>) -> Self {
        self.levels = levels.into_iter().collect();
        self
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn instant(&self) -> Option<&ObservationInstant> {
        self.instant.as_ref()
    }

    pub fn pressure_levels(&self) -> &[PressureLevel] {
        &self.levels
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// [`Self::process`] with [`DEFAULT_MODEL`].
    pub async fn process_default(&self) -> AtmoResult<AtmosphereProfile> {
        self.process(DEFAULT_MODEL).await
    }

    /// Fetch one meteogram for `model` and build the profile at the
    /// configured instant.
    ///
    /// Either the whole profile is returned or an error; nothing is cached.
    #[instrument(skip(self), fields(location = ?self.location))]
    pub async fn process(&self, model: &str) -> AtmoResult<AtmosphereProfile> {
        let location = self
            .location
            .ok_or_else(|| AtmoError::configuration("location is not set"))?;
        let instant = self
            .instant
            .as_ref()
            .ok_or_else(|| AtmoError::configuration("date is not set"))?;
        if self.levels.is_empty() {
            return Err(AtmoError::invalid_input("no pressure levels configured"));
        }

        let model = ModelName::normalize(model)?;

        let response = match self.source.fetch(&model, location).await {
            Ok(response) => response,
            Err(err) if model.is_icon_eu() => {
                warn!(error = %err, "Icon-EU request failed; location may be outside Europe");
                return Err(AtmoError::OutsideCoverage {
                    model: model.to_string(),
                    source: Box::new(err),
                });
            }
            Err(err) => return Err(err),
        };

        let target_millis = instant.epoch_millis();
        let time_index = select_time_index(&response.data.hours, target_millis)
            .ok_or(AtmoError::EmptyTimeAxis)?;
        info!(
            model = %model,
            target = %instant.utc(),
            time_index,
            forecast_hours = response.data.hours.len(),
            "Selected forecast time"
        );

        let samples = LevelSampleSet::extract(&response.data, time_index, &self.levels)?;
        let derived = DerivedQuantities::compute(&samples);
        debug!(
            lowest = derived.altitude.first().copied(),
            highest = derived.altitude.last().copied(),
            "Derived level altitudes"
        );

        AtmosphereProfile::assemble(
            &model,
            location,
            &response.data.hours,
            target_millis,
            response.header.elevation,
            &samples,
            &derived,
        )
    }
}
