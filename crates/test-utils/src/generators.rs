//! Generators for synthetic per-level columns.
//!
//! Values follow a rough standard atmosphere so derived altitudes, lapse
//! rates and wind shear look like real soundings.

/// Standard pressure levels (hPa) with typical geopotential heights (m).
pub const STANDARD_COLUMN: [(u32, f64); 14] = [
    (1000, 111.0),
    (950, 540.0),
    (925, 762.0),
    (900, 988.0),
    (850, 1457.0),
    (800, 1949.0),
    (700, 3012.0),
    (600, 4206.0),
    (500, 5574.0),
    (400, 7185.0),
    (300, 9164.0),
    (250, 10363.0),
    (200, 11784.0),
    (150, 13608.0),
];

/// Temperature in Kelvin for a height, with a tropopause at 216.65 K.
///
/// # Example
///
/// ```
/// use test_utils::standard_temperature;
///
/// assert_eq!(standard_temperature(0.0), 288.15);
/// assert_eq!(standard_temperature(20_000.0), 216.65);
/// ```
pub fn standard_temperature(height: f64) -> f64 {
    (288.15 - 0.0065 * height).max(216.65)
}

/// Wind components (u, v) in m/s veering and strengthening with height.
///
/// `time_index` shifts the profile so consecutive forecast hours differ.
pub fn sheared_wind(height: f64, time_index: usize) -> (f64, f64) {
    let t = time_index as f64;
    let u = 2.0 + height / 1000.0 * 2.5 + t;
    let v = 3.0 - height / 1000.0 * 0.5 - t * 0.5;
    (u, v)
}

/// Create an evenly spaced time axis in epoch milliseconds.
///
/// # Example
///
/// ```
/// use test_utils::hourly_axis;
///
/// assert_eq!(hourly_axis(0, 3, 3), vec![0, 10_800_000, 21_600_000]);
/// ```
pub fn hourly_axis(start_ms: i64, step_hours: i64, count: usize) -> Vec<i64> {
    (0..count as i64)
        .map(|i| start_ms + i * step_hours * 3_600_000)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_column_ordered() {
        assert!(STANDARD_COLUMN.windows(2).all(|w| w[0].0 > w[1].0));
        assert!(STANDARD_COLUMN.windows(2).all(|w| w[0].1 < w[1].1));
    }

    #[test]
    fn test_standard_temperature_lapse() {
        assert!((standard_temperature(1000.0) - 281.65).abs() < 1e-9);
        assert_eq!(standard_temperature(11_000.0), 216.65);
    }

    #[test]
    fn test_sheared_wind_varies_with_time() {
        assert_ne!(sheared_wind(1000.0, 0), sheared_wind(1000.0, 1));
    }

    #[test]
    fn test_hourly_axis() {
        let axis = hourly_axis(1_000, 1, 4);
        assert_eq!(axis.len(), 4);
        assert_eq!(axis[3] - axis[0], 3 * 3_600_000);
    }
}
