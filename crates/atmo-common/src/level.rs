//! Isobaric (pressure) levels reported by the forecast models.

use serde::{Deserialize, Serialize};

/// Standard pressure levels in hPa, in descending pressure order.
///
/// Order matters: every per-level array is aligned to it, so the first entry
/// is the lowest altitude and the last entry the highest.
pub const STANDARD_PRESSURE_LEVELS: [u32; 14] = [
    1000, 950, 925, 900, 850, 800, 700, 600, 500, 400, 300, 250, 200, 150,
];

/// A pressure level in hectopascals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PressureLevel(u32);

impl PressureLevel {
    pub const fn new(hpa: u32) -> Self {
        Self(hpa)
    }

    /// The fourteen standard levels, 1000 hPa first.
    pub fn standard() -> Vec<PressureLevel> {
        STANDARD_PRESSURE_LEVELS
            .iter()
            .copied()
            .map(PressureLevel)
            .collect()
    }

    pub fn hectopascals(&self) -> u32 {
        self.0
    }

    /// Pressure in pascals (1 hPa = 100 Pa).
    pub fn pascals(&self) -> f64 {
        f64::from(self.0) * 100.0
    }

    /// Key of a per-level series in the meteogram payload, e.g. `gh-850h`.
    pub fn series_key(&self, quantity: &str) -> String {
        format!("{}-{}h", quantity, self.0)
    }
}

impl std::fmt::Display for PressureLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}hPa", self.0)
    }
}

impl From<u32> for PressureLevel {
    fn from(hpa: u32) -> Self {
        Self(hpa)
    }
}
