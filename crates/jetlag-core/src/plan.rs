//! Travel plan inputs: zone identifiers, departure parsing and flight
//! duration validation.
//!
//! A [`TravelPlan`] is built once per request from validated parts and is
//! immutable afterwards.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Civil date-time format accepted for departures and used for schedule output.
pub const CIVIL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Civil output is `YYYY`, so every date must stay within these years.
pub const MIN_CIVIL_YEAR: i32 = 0;
pub const MAX_CIVIL_YEAR: i32 = 9999;

pub(crate) fn in_civil_range(civil: NaiveDateTime) -> bool {
    (MIN_CIVIL_YEAR..=MAX_CIVIL_YEAR).contains(&civil.year())
}

/// Move a civil time by `by`, failing when the result leaves the four-digit
/// year range.
pub(crate) fn shift_civil(civil: NaiveDateTime, by: Duration) -> Result<NaiveDateTime> {
    civil
        .checked_add_signed(by)
        .filter(|shifted| in_civil_range(*shifted))
        .ok_or_else(|| {
            CoreError::OutOfRange(format!(
                "{} moved by {} minutes leaves years {MIN_CIVIL_YEAR:04}-{MAX_CIVIL_YEAR}",
                civil.format(CIVIL_FORMAT),
                by.num_minutes()
            ))
        })
}

/// An IANA timezone identifier that is known to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneId(Tz);

impl ZoneId {
    /// Resolve a zone name, trimming surrounding whitespace.
    pub fn parse(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        trimmed
            .parse::<Tz>()
            .map(ZoneId)
            .map_err(|_| CoreError::UnknownZone(trimmed.to_string()))
    }

    pub fn tz(&self) -> Tz {
        self.0
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Interpret a civil date-time in this zone.
    ///
    /// Ambiguous times (fall-back) resolve to the earlier instant. Times that
    /// fall in a spring-forward gap keep the offset in force before the gap,
    /// so they land just after it.
    pub fn resolve_local(&self, civil: NaiveDateTime) -> DateTime<Tz> {
        match self.0.from_local_datetime(&civil) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => {
                // Gaps never repeat within a day, so this offset predates it.
                let before = self
                    .0
                    .offset_from_utc_datetime(&(civil - Duration::days(1)))
                    .fix();
                let utc = civil - Duration::seconds(i64::from(before.local_minus_utc()));
                self.0.from_utc_datetime(&utc)
            }
        }
    }
}

impl FromStr for ZoneId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Tz> for ZoneId {
    fn from(tz: Tz) -> Self {
        ZoneId(tz)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ZoneId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Parse a `YYYY-MM-DD HH:MM` departure string as civil time in `zone`.
pub fn parse_departure(input: &str, zone: ZoneId) -> Result<DateTime<Tz>> {
    let malformed = |detail: String| CoreError::MalformedDeparture {
        input: input.to_string(),
        detail,
    };
    let civil = NaiveDateTime::parse_from_str(input.trim(), CIVIL_FORMAT)
        .map_err(|e| malformed(e.to_string()))?;
    if !in_civil_range(civil) {
        return Err(malformed(format!(
            "year {} is outside {MIN_CIVIL_YEAR:04}-{MAX_CIVIL_YEAR}",
            civil.year()
        )));
    }
    Ok(zone.resolve_local(civil))
}

/// Departure used when none is given: the same origin wall-clock time one
/// day after `now`.
pub fn default_departure(zone: ZoneId, now: DateTime<Utc>) -> DateTime<Tz> {
    let local = now.with_timezone(&zone.tz()).naive_local();
    zone.resolve_local(local + Duration::days(1))
}

/// Parse a flight duration in hours. Blank input is not accepted here; the
/// drivers decide what a blank means.
pub fn parse_duration(input: &str) -> Result<f64> {
    let hours = input
        .trim()
        .parse::<f64>()
        .map_err(|e| CoreError::InvalidDuration(format!("'{}': {}", input.trim(), e)))?;
    validate_duration(hours)
}

/// Reject negative and non-finite durations.
pub fn validate_duration(hours: f64) -> Result<f64> {
    if !hours.is_finite() {
        return Err(CoreError::InvalidDuration(format!("{hours} is not finite")));
    }
    if hours < 0.0 {
        return Err(CoreError::InvalidDuration(format!(
            "{hours} hours is negative"
        )));
    }
    Ok(hours)
}

/// Convert fractional hours into a duration with millisecond resolution.
pub(crate) fn hours_to_duration(hours: f64) -> Result<Duration> {
    Duration::try_milliseconds((hours * 3_600_000.0).round() as i64)
        .ok_or_else(|| CoreError::InvalidDuration(format!("{hours} hours is out of range")))
}

/// A single trip to plan sleep around.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelPlan {
    origin: ZoneId,
    destination: ZoneId,
    departure: DateTime<Tz>,
    flight_duration_hours: f64,
}

impl TravelPlan {
    /// Build a plan from already-resolved parts.
    ///
    /// The departure is re-expressed in the origin zone if it was given in
    /// another one.
    pub fn new(
        origin: ZoneId,
        destination: ZoneId,
        departure: DateTime<Tz>,
        flight_duration_hours: f64,
    ) -> Result<Self> {
        Ok(Self {
            origin,
            destination,
            departure: departure.with_timezone(&origin.tz()),
            flight_duration_hours: validate_duration(flight_duration_hours)?,
        })
    }

    /// Build a plan from the raw input contract fields.
    pub fn from_input(
        origin: &str,
        destination: &str,
        departure: &str,
        flight_duration_hours: f64,
    ) -> Result<Self> {
        let origin = ZoneId::parse(origin)?;
        let destination = ZoneId::parse(destination)?;
        let departure = parse_departure(departure, origin)?;
        Self::new(origin, destination, departure, flight_duration_hours)
    }

    pub fn origin(&self) -> ZoneId {
        self.origin
    }

    pub fn destination(&self) -> ZoneId {
        self.destination
    }

    pub fn departure(&self) -> DateTime<Tz> {
        self.departure
    }

    pub fn flight_duration_hours(&self) -> f64 {
        self.flight_duration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn zone_parse_trims_and_resolves() {
        let zone = ZoneId::parse("  Europe/London ").unwrap();
        assert_eq!(zone.name(), "Europe/London");
        assert_eq!(zone.to_string(), "Europe/London");
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let err = ZoneId::parse("Mars/Olympus").unwrap_err();
        assert!(matches!(err, CoreError::UnknownZone(ref name) if name == "Mars/Olympus"));
    }

    #[test]
    fn parse_departure_keeps_civil_time() {
        let zone = ZoneId::parse("America/New_York").unwrap();
        let dt = parse_departure("2024-12-15 14:30", zone).unwrap();
        assert_eq!(dt.format(CIVIL_FORMAT).to_string(), "2024-12-15 14:30");
        assert_eq!(dt.offset().fix().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn malformed_departure_is_rejected() {
        let zone = ZoneId::parse("America/New_York").unwrap();
        let err = parse_departure("15/12/2024", zone).unwrap_err();
        match err {
            CoreError::MalformedDeparture { input, .. } => assert_eq!(input, "15/12/2024"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn departure_years_beyond_four_digits_are_rejected() {
        let zone = ZoneId::parse("UTC").unwrap();
        for input in [
            "+262142-12-31 23:00",
            "-262143-01-01 00:30",
            "+10000-01-01 00:00",
            "-0001-06-01 12:00",
        ] {
            assert!(
                matches!(
                    parse_departure(input, zone),
                    Err(CoreError::MalformedDeparture { .. })
                ),
                "{input} should be rejected"
            );
        }
        assert!(parse_departure("0000-01-01 00:00", zone).is_ok());
        assert!(parse_departure("9999-12-31 23:59", zone).is_ok());
    }

    #[test]
    fn shift_civil_stops_at_year_bounds() {
        let end = NaiveDate::from_ymd_opt(9999, 12, 31)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        assert!(shift_civil(end, Duration::minutes(59)).is_ok());
        assert!(matches!(
            shift_civil(end, Duration::hours(1)),
            Err(CoreError::OutOfRange(_))
        ));
        assert!(matches!(
            shift_civil(NaiveDateTime::MAX, Duration::days(1)),
            Err(CoreError::OutOfRange(_))
        ));
    }

    #[test]
    fn ambiguous_time_resolves_to_earlier_instant() {
        // 2024-11-03 01:30 happens twice in New York.
        let zone = ZoneId::parse("America/New_York").unwrap();
        let civil = NaiveDate::from_ymd_opt(2024, 11, 3)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        let dt = zone.resolve_local(civil);
        assert_eq!(dt.offset().fix().local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn gap_time_lands_after_the_gap() {
        // 2024-03-10 02:30 does not exist in New York.
        let zone = ZoneId::parse("America/New_York").unwrap();
        let civil = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let dt = zone.resolve_local(civil);
        assert_eq!(dt.hour(), 3);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn default_departure_is_one_civil_day_later() {
        let zone = ZoneId::parse("Asia/Tokyo").unwrap();
        let now = Utc.with_ymd_and_hms(2024, 12, 15, 3, 0, 0).unwrap();
        let dt = default_departure(zone, now);
        assert_eq!(dt.format(CIVIL_FORMAT).to_string(), "2024-12-16 12:00");
    }

    #[test]
    fn durations_are_validated() {
        assert_eq!(parse_duration(" 7.5 ").unwrap(), 7.5);
        assert!(matches!(
            parse_duration("seven"),
            Err(CoreError::InvalidDuration(_))
        ));
        assert!(validate_duration(-1.0).is_err());
        assert!(validate_duration(f64::NAN).is_err());
        assert_eq!(validate_duration(0.0).unwrap(), 0.0);
    }

    #[test]
    fn plan_from_input_rejects_bad_fields() {
        assert!(matches!(
            TravelPlan::from_input("Mars/Olympus", "Europe/London", "2024-12-15 14:30", 1.0),
            Err(CoreError::UnknownZone(_))
        ));
        assert!(matches!(
            TravelPlan::from_input("America/New_York", "Nowhere", "2024-12-15 14:30", 1.0),
            Err(CoreError::UnknownZone(_))
        ));
        assert!(matches!(
            TravelPlan::from_input("America/New_York", "Europe/London", "15/12/2024", 1.0),
            Err(CoreError::MalformedDeparture { .. })
        ));
    }

    #[test]
    fn plan_reexpresses_departure_in_origin() {
        let origin = ZoneId::parse("America/New_York").unwrap();
        let dest = ZoneId::parse("Europe/London").unwrap();
        let london = parse_departure("2024-12-15 19:30", dest).unwrap();
        let plan = TravelPlan::new(origin, dest, london, 0.0).unwrap();
        assert_eq!(
            plan.departure().format(CIVIL_FORMAT).to_string(),
            "2024-12-15 14:30"
        );
    }
}
