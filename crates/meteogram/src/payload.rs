//! Typed view of the provider's meteogram JSON.
//!
//! The provider names per-level series `<quantity>-<level>h` (for example
//! `gh-850h` or `wind_u-500h`), each an array aligned with `data.hours`.
//! Those keys are kept in a map and looked up explicitly, so an absent
//! series or a short array is reported instead of panicking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use atmo_common::{AtmoError, AtmoResult};

/// Top-level meteogram document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeteogramResponse {
    pub header: MeteogramHeader,
    pub data: MeteogramData,
}

/// Location metadata returned alongside the series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeteogramHeader {
    /// Terrain elevation at the requested point, metres
    pub elevation: f64,
    /// Terrain elevation as seen by the model grid, metres
    #[serde(default)]
    pub model_elevation: Option<f64>,
    /// Model run reference time, epoch milliseconds
    #[serde(default)]
    pub ref_time: Option<i64>,
    /// Forecast step in hours
    #[serde(default)]
    pub step: Option<f64>,
    /// Local UTC offset in hours
    #[serde(default)]
    pub utc_offset: Option<f64>,
}

/// The time axis and every series keyed by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeteogramData {
    /// Forecast times, epoch milliseconds, ascending
    pub hours: Vec<i64>,
    #[serde(flatten)]
    pub series: HashMap<String, Value>,
}

impl MeteogramResponse {
    /// Parse a response body. Malformed JSON is a fetch error.
    pub fn parse(body: &str) -> AtmoResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

impl MeteogramData {
    /// The named series as a JSON array.
    pub fn series(&self, key: &str) -> AtmoResult<&[Value]> {
        self.series
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| AtmoError::MissingSeries(key.to_string()))
    }

    /// The numeric value of series `key` at time `index`.
    pub fn value_at(&self, key: &str, index: usize) -> AtmoResult<f64> {
        self.series(key)?
            .get(index)
            .and_then(Value::as_f64)
            .ok_or_else(|| AtmoError::MissingValue {
                key: key.to_string(),
                index,
            })
    }
}

/// Index of the forecast hour closest to `target_ms`.
///
/// On a tie the earlier index wins. Returns `None` for an empty axis.
pub fn select_time_index(hours: &[i64], target_ms: i64) -> Option<usize> {
    hours
        .iter()
        .enumerate()
        .min_by_key(|&(_, &h)| h.abs_diff(target_ms))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "header": {"elevation": 12.5, "modelElevation": 20, "refTime": 0, "step": 3, "utcOffset": 8, "tzName": "Asia/Shanghai"},
        "data": {
            "hours": [0, 3600000],
            "gh-1000h": [100, 110],
            "temp-1000h": [280.0, null],
            "rh-surface": "n/a"
        }
    }"#;

    #[test]
    fn test_parse_header() {
        let response = MeteogramResponse::parse(BODY).unwrap();
        assert_eq!(response.header.elevation, 12.5);
        assert_eq!(response.header.model_elevation, Some(20.0));
        assert_eq!(response.header.step, Some(3.0));
        assert_eq!(response.data.hours, vec![0, 3_600_000]);
    }

    #[test]
    fn test_value_lookup() {
        let data = MeteogramResponse::parse(BODY).unwrap().data;
        assert_eq!(data.value_at("gh-1000h", 1).unwrap(), 110.0);
        assert_eq!(data.value_at("temp-1000h", 0).unwrap(), 280.0);
    }

    #[test]
    fn test_missing_series() {
        let data = MeteogramResponse::parse(BODY).unwrap().data;
        match data.value_at("gh-850h", 0) {
            Err(AtmoError::MissingSeries(key)) => assert_eq!(key, "gh-850h"),
            other => panic!("expected MissingSeries, got {:?}", other),
        }
        assert!(matches!(
            data.series("rh-surface"),
            Err(AtmoError::MissingSeries(_))
        ));
    }

    #[test]
    fn test_missing_value() {
        let data = MeteogramResponse::parse(BODY).unwrap().data;
        assert!(matches!(
            data.value_at("temp-1000h", 1),
            Err(AtmoError::MissingValue { index: 1, .. })
        ));
        assert!(matches!(
            data.value_at("gh-1000h", 5),
            Err(AtmoError::MissingValue { index: 5, .. })
        ));
    }

    #[test]
    fn test_non_json_is_fetch_error() {
        let result = MeteogramResponse::parse("<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(AtmoError::Fetch(_))));
    }

    #[test]
    fn test_missing_elevation_is_fetch_error() {
        let result = MeteogramResponse::parse(r#"{"header": {}, "data": {"hours": []}}"#);
        assert!(matches!(result, Err(AtmoError::Fetch(_))));
    }

    #[test]
    fn test_select_time_index() {
        let hours = [1000, 2000, 3000];
        assert_eq!(select_time_index(&hours, 2000), Some(1));
        assert_eq!(select_time_index(&hours, 2600), Some(2));
        assert_eq!(select_time_index(&hours, -50_000), Some(0));
        assert_eq!(select_time_index(&hours, 90_000), Some(2));
    }

    #[test]
    fn test_select_time_index_tie_takes_first() {
        assert_eq!(select_time_index(&[1000, 2000, 3000], 2500), Some(1));
    }

    #[test]
    fn test_select_time_index_empty() {
        assert_eq!(select_time_index(&[], 0), None);
    }
}
