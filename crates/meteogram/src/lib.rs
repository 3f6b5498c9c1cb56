//! Atmosphere profiles from provider meteograms.
//!
//! A meteogram is a point forecast: for one latitude/longitude the provider
//! returns a time axis plus one series per quantity and pressure level. This
//! crate turns one time slice of it into functions of altitude.
//!
//! # Architecture
//!
//! ```text
//! AtmosphereModel::process(model)
//!      │
//!      ├─► ModelName::normalize
//!      │
//!      ├─► MeteogramSource::fetch  (one HTTP round-trip, no retry)
//!      │
//!      ├─► select_time_index       (nearest forecast hour)
//!      │
//!      ├─► LevelSampleSet::extract (gh, temp, wind_u, wind_v per level)
//!      │
//!      ├─► DerivedQuantities::compute
//!      │
//!      └─► AtmosphereProfile       (one InterpolatedFunction per quantity)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use meteogram::{AtmosphereModel, WindyClient, ClientConfig};
//!
//! let client = WindyClient::new(ClientConfig::from_env()?)?;
//! let model = AtmosphereModel::new(client)
//!     .with_location(31.571, 120.294)
//!     .with_date([2023, 10, 10, 3], "UTC")?;
//!
//! let profile = model.process("ECMWF").await?;
//! let temperature = profile.temperature.evaluate(1500.0);
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod derived;
pub mod model;
pub mod payload;
pub mod profile;
pub mod samples;

// Re-export commonly used types at crate root
pub use builder::{AtmosphereModel, DEFAULT_MODEL};
pub use client::{MeteogramSource, WindyClient};
pub use config::ClientConfig;
pub use derived::{DerivedQuantities, AIR_GAS_CONSTANT, EARTH_RADIUS, STANDARD_GRAVITY};
pub use model::ModelName;
pub use payload::{select_time_index, MeteogramData, MeteogramHeader, MeteogramResponse};
pub use profile::{AtmosphereProfile, ProfileDebug, ProfileRow, MAX_GRID_ROWS};
pub use samples::{LevelSample, LevelSampleSet};

pub use atmo_common::{AtmoError, AtmoResult};
