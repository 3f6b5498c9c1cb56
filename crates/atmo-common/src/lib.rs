//! Common types and utilities shared by the atmosphere profile crates.

pub mod error;
pub mod function;
pub mod level;
pub mod location;
pub mod time;

pub use error::{AtmoError, AtmoResult};
pub use function::{InterpolatedFunction, Interpolation};
pub use level::{PressureLevel, STANDARD_PRESSURE_LEVELS};
pub use location::Location;
pub use time::{from_epoch_millis, DateInput, ObservationInstant, DEFAULT_TIMEZONE};
