//! Common test fixtures for atmosphere profile tests.
//!
//! [`MeteogramFixture`] builds JSON in the provider's meteogram shape, so the
//! whole pipeline can be exercised without network access.

use serde_json::{json, Map, Value};

use crate::generators::{sheared_wind, standard_temperature, STANDARD_COLUMN};

/// Common request locations as (latitude, longitude).
pub mod locations {
    /// Wuxi, China
    pub const WUXI: (f64, f64) = (31.571, 120.294);

    /// Munich, Germany (inside Icon-EU coverage)
    pub const MUNICH: (f64, f64) = (48.137, 11.575);

    /// Sydney, Australia (outside Icon-EU coverage)
    pub const SYDNEY: (f64, f64) = (-33.868, 151.209);
}

/// Common time values for testing.
pub mod time {
    /// A fixed reference time for tests (2024-01-15T12:00:00Z)
    pub const REFERENCE_TIME: &str = "2024-01-15T12:00:00Z";

    /// [`REFERENCE_TIME`] in epoch milliseconds
    pub const REFERENCE_MILLIS: i64 = 1_705_320_000_000;

    pub const HOUR_MILLIS: i64 = 3_600_000;
}

/// Builder for a synthetic meteogram response body.
#[derive(Debug, Clone)]
pub struct MeteogramFixture {
    elevation: f64,
    hours: Vec<i64>,
    series: Map<String, Value>,
}

impl MeteogramFixture {
    /// An empty meteogram with the given time axis and zero elevation.
    pub fn new(hours: Vec<i64>) -> Self {
        Self {
            elevation: 0.0,
            hours,
            series: Map::new(),
        }
    }

    /// All fourteen standard levels, with values for every forecast hour.
    pub fn standard_atmosphere(hours: Vec<i64>) -> Self {
        let count = hours.len();
        let mut fixture = Self::new(hours);

        for (level, height) in STANDARD_COLUMN {
            let gh: Vec<f64> = (0..count).map(|t| height + t as f64 * 5.0).collect();
            let temp: Vec<f64> = (0..count)
                .map(|t| standard_temperature(height) + t as f64 * 0.5)
                .collect();
            let (u, v): (Vec<f64>, Vec<f64>) = (0..count).map(|t| sheared_wind(height, t)).unzip();
            fixture = fixture.with_level(level, gh, temp, u, v);
        }

        fixture
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = elevation;
        self
    }

    /// Add the four series of one pressure level.
    pub fn with_level(
        mut self,
        level: u32,
        gh: Vec<f64>,
        temp: Vec<f64>,
        wind_u: Vec<f64>,
        wind_v: Vec<f64>,
    ) -> Self {
        self.series.insert(format!("gh-{}h", level), json!(gh));
        self.series.insert(format!("temp-{}h", level), json!(temp));
        self.series.insert(format!("wind_u-{}h", level), json!(wind_u));
        self.series.insert(format!("wind_v-{}h", level), json!(wind_v));
        self
    }

    /// Add or replace an arbitrary series.
    pub fn with_series(mut self, key: &str, value: Value) -> Self {
        self.series.insert(key.to_string(), value);
        self
    }

    /// Drop a series, e.g. to simulate a provider omitting a level.
    pub fn without_series(mut self, key: &str) -> Self {
        self.series.remove(key);
        self
    }

    pub fn to_value(&self) -> Value {
        let mut data = self.series.clone();
        data.insert("hours".to_string(), json!(self.hours));

        json!({
            "header": {
                "elevation": self.elevation,
                "modelElevation": self.elevation,
                "step": 3,
                "utcOffset": 0,
            },
            "data": Value::Object(data),
        })
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shape() {
        let value = MeteogramFixture::new(vec![0, 1])
            .with_elevation(42.0)
            .with_level(1000, vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0], vec![7.0, 8.0])
            .to_value();

        assert_eq!(value["header"]["elevation"], json!(42.0));
        assert_eq!(value["data"]["hours"], json!([0, 1]));
        assert_eq!(value["data"]["wind_v-1000h"], json!([7.0, 8.0]));
    }

    #[test]
    fn test_standard_atmosphere_has_all_levels() {
        let value = MeteogramFixture::standard_atmosphere(vec![0, 1, 2]).to_value();
        for (level, _) in STANDARD_COLUMN {
            for quantity in ["gh", "temp", "wind_u", "wind_v"] {
                let key = format!("{}-{}h", quantity, level);
                assert_eq!(value["data"][&key].as_array().map(Vec::len), Some(3), "{}", key);
            }
        }
    }

    #[test]
    fn test_without_series() {
        let value = MeteogramFixture::standard_atmosphere(vec![0])
            .without_series("temp-500h")
            .to_value();
        assert!(value["data"].get("temp-500h").is_none());
    }
}
