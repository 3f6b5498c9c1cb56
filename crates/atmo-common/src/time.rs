//! Observation time handling: calendar inputs, timezone localization and the
//! provider's millisecond time axis.

use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{AtmoError, AtmoResult};

/// Timezone assumed when none is given.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// A date as supplied by the caller, before localization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateInput {
    /// `year, month, day[, hour[, minute[, second[, microsecond]]]]`
    Calendar(Vec<u32>),
    /// Wall-clock time, interpreted in the configured timezone.
    Naive(NaiveDateTime),
    /// Already carries its own offset; the configured timezone is not applied.
    Aware(DateTime<FixedOffset>),
}

impl DateInput {
    /// Parse RFC 3339 (aware) or `YYYY-MM-DD[( |T)HH:MM[:SS]]` (naive).
    pub fn parse(s: &str) -> AtmoResult<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Aware(dt));
        }

        for fmt in [
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M",
        ] {
            if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Self::Naive(ndt));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            if let Some(ndt) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self::Naive(ndt));
            }
        }

        Err(AtmoError::configuration(format!(
            "unrecognised date '{}'",
            s
        )))
    }

    fn calendar_to_naive(parts: &[u32]) -> AtmoResult<NaiveDateTime> {
        if !(3..=7).contains(&parts.len()) {
            return Err(AtmoError::configuration(format!(
                "calendar date needs 3 to 7 components (year, month, day, ...), got {}",
                parts.len()
            )));
        }

        let part = |i: usize| parts.get(i).copied().unwrap_or(0);
        let year = i32::try_from(parts[0])
            .map_err(|_| AtmoError::configuration(format!("year {} out of range", parts[0])))?;

        NaiveDate::from_ymd_opt(year, parts[1], parts[2])
            .and_then(|d| d.and_hms_micro_opt(part(3), part(4), part(5), part(6)))
            .ok_or_else(|| AtmoError::configuration(format!("invalid calendar date {:?}", parts)))
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(ndt: NaiveDateTime) -> Self {
        Self::Naive(ndt)
    }
}

impl From<DateTime<FixedOffset>> for DateInput {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::Aware(dt)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Aware(dt.with_timezone(&Utc.fix()))
    }
}

impl From<&[u32]> for DateInput {
    fn from(parts: &[u32]) -> Self {
        Self::Calendar(parts.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for DateInput {
    fn from(parts: [u32; N]) -> Self {
        Self::Calendar(parts.to_vec())
    }
}

/// The instant a profile is requested for.
///
/// Keeps the caller's input and its localized form next to the absolute UTC
/// instant, which is always derivable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationInstant {
    input: DateInput,
    timezone: Tz,
    local: DateTime<FixedOffset>,
    utc: DateTime<Utc>,
}

impl ObservationInstant {
    /// Localize `input` in the IANA zone `timezone`.
    ///
    /// Ambiguous wall-clock times (clocks going back) resolve to the later,
    /// standard-time reading. Wall-clock times skipped by a DST change keep
    /// their reading and take the offset in force before the change.
    pub fn new(input: impl Into<DateInput>, timezone: &str) -> AtmoResult<Self> {
        let input = input.into();
        let tz: Tz = timezone
            .parse()
            .map_err(|_| AtmoError::configuration(format!("unknown timezone '{}'", timezone)))?;

        let local = match &input {
            DateInput::Aware(dt) => *dt,
            DateInput::Naive(ndt) => localize(&tz, ndt)?,
            DateInput::Calendar(parts) => localize(&tz, &DateInput::calendar_to_naive(parts)?)?,
        };

        Ok(Self {
            input,
            timezone: tz,
            local,
            utc: local.with_timezone(&Utc),
        })
    }

    /// The current time in UTC.
    pub fn now() -> Self {
        let utc = Utc::now();
        Self {
            input: utc.into(),
            timezone: Tz::UTC,
            local: utc.with_timezone(&Utc.fix()),
            utc,
        }
    }

    pub fn input(&self) -> &DateInput {
        &self.input
    }

    pub fn timezone(&self) -> &str {
        self.timezone.name()
    }

    pub fn local(&self) -> DateTime<FixedOffset> {
        self.local
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    /// Milliseconds since 1970-01-01T00:00:00Z.
    pub fn epoch_millis(&self) -> i64 {
        self.utc.timestamp_millis()
    }
}

fn localize(tz: &Tz, ndt: &NaiveDateTime) -> AtmoResult<DateTime<FixedOffset>> {
    let dt = match tz.from_local_datetime(ndt) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(a, b) => a.max(b),
        LocalResult::None => {
            // Skipped by a forward transition: keep the wall clock and apply
            // the offset in force a day earlier.
            let before = tz.offset_from_utc_datetime(&(*ndt - Duration::days(1))).fix();
            return before.from_local_datetime(ndt).single().ok_or_else(|| {
                AtmoError::configuration(format!(
                    "{} cannot be localized in timezone {}",
                    ndt,
                    tz.name()
                ))
            });
        }
    };
    Ok(dt.with_timezone(&dt.offset().fix()))
}

/// Convert milliseconds since the Unix epoch back to a calendar instant.
pub fn from_epoch_millis(ms: i64) -> AtmoResult<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| AtmoError::invalid_input(format!("timestamp {} ms is out of range", ms)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_calendar_tuple_in_utc() {
        let instant = ObservationInstant::new(DateInput::Calendar(vec![2023, 10, 10, 3]), DEFAULT_TIMEZONE).unwrap();
        let utc = instant.utc();
        assert_eq!(utc.year(), 2023);
        assert_eq!(utc.month(), 10);
        assert_eq!(utc.day(), 10);
        assert_eq!(utc.hour(), 3);
        assert_eq!(instant.timezone(), "UTC");
    }

    #[test]
    fn test_calendar_tuple_localized() {
        let instant = ObservationInstant::new(DateInput::Calendar(vec![2023, 10, 10, 11]), "Asia/Shanghai").unwrap();
        assert_eq!(instant.utc().hour(), 3);
        assert_eq!(instant.local().hour(), 11);
        assert_eq!(instant.local().offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_aware_input_keeps_offset() {
        let aware = DateTime::parse_from_rfc3339("2024-01-15T12:00:00+02:00").unwrap();
        let instant = ObservationInstant::new(aware, "America/New_York").unwrap();
        assert_eq!(instant.utc().hour(), 10);
        assert_eq!(instant.timezone(), "America/New_York");
    }

    #[test]
    fn test_epoch_millis() {
        let instant = ObservationInstant::new(DateInput::Calendar(vec![1970, 1, 1, 0, 0, 2]), "UTC").unwrap();
        assert_eq!(instant.epoch_millis(), 2000);
        let back = from_epoch_millis(2000).unwrap();
        assert_eq!(back, instant.utc());
    }

    #[test]
    fn test_unknown_timezone() {
        let result = ObservationInstant::new(DateInput::Calendar(vec![2024, 1, 1]), "Mars/Olympus_Mons");
        assert!(matches!(result, Err(AtmoError::Configuration(_))));
    }

    #[test]
    fn test_malformed_calendar() {
        assert!(matches!(
            ObservationInstant::new(DateInput::Calendar(vec![2024, 1]), "UTC"),
            Err(AtmoError::Configuration(_))
        ));
        assert!(matches!(
            ObservationInstant::new(DateInput::Calendar(vec![2024, 2, 30]), "UTC"),
            Err(AtmoError::Configuration(_))
        ));
        assert!(matches!(
            ObservationInstant::new(DateInput::Calendar(vec![2024, 1, 1, 25]), "UTC"),
            Err(AtmoError::Configuration(_))
        ));
    }

    #[test]
    fn test_ambiguous_time_takes_standard_offset() {
        // 01:30 happens twice in New York on 2023-11-05
        let instant = ObservationInstant::new(DateInput::Calendar(vec![2023, 11, 5, 1, 30]), "America/New_York").unwrap();
        assert_eq!(instant.local().offset().local_minus_utc(), -5 * 3600);
        assert_eq!(instant.utc().hour(), 6);
    }

    #[test]
    fn test_skipped_time_uses_standard_offset() {
        // 02:30 does not exist in New York on 2023-03-12
        let instant = ObservationInstant::new(DateInput::Calendar(vec![2023, 3, 12, 2, 30]), "America/New_York").unwrap();
        assert_eq!(instant.local().offset().local_minus_utc(), -5 * 3600);
        assert_eq!(instant.local().hour(), 2);
        assert_eq!(instant.local().minute(), 30);
        assert_eq!(instant.utc().to_rfc3339(), "2023-03-12T07:30:00+00:00");
    }

    #[test]
    fn test_parse_date_input() {
        assert!(matches!(
            DateInput::parse("2024-01-15T12:00:00Z").unwrap(),
            DateInput::Aware(_)
        ));
        assert!(matches!(
            DateInput::parse("2024-01-15T12:00").unwrap(),
            DateInput::Naive(_)
        ));
        assert!(matches!(
            DateInput::parse("2024-01-15").unwrap(),
            DateInput::Naive(_)
        ));
        assert!(DateInput::parse("yesterday").is_err());
    }
}
