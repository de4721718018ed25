//! Sleep recommendation engine.
//!
//! Given a [`TravelPlan`] and the instant at which zone rules are evaluated,
//! the engine derives:
//! - the signed offset between origin and destination (destination minus origin)
//! - the arrival instant in destination civil time
//! - a three-night pre-flight bedtime ladder in origin civil time
//! - the first post-flight night in destination civil time
//! - direction-dependent tips
//!
//! The offset is evaluated once, at `now`, and reused for every scheduled
//! night. All bedtime arithmetic happens on civil (wall-clock) time of the
//! zone the window belongs to.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use std::fmt;

use crate::error::{CoreError, Result};
use crate::plan::{
    hours_to_duration, in_civil_range, shift_civil, TravelPlan, ZoneId, CIVIL_FORMAT,
};

/// Hours between bedtime and wake time.
pub const SLEEP_HOURS: i64 = 8;
/// Offset (absolute hours) from which melatonin is suggested.
pub const MELATONIN_THRESHOLD_HOURS: f64 = 6.0;
/// Pre-flight nights, furthest first.
pub const PRE_FLIGHT_DAYS: [u32; 3] = [3, 2, 1];

pub const BASE_BEDTIME_HOUR: u32 = 22;
pub const EASTWARD_EVE_BEDTIME_HOUR: u32 = 21;
pub const WESTWARD_EVE_BEDTIME_HOUR: u32 = 23;

pub const POST_FLIGHT_NOTE: &str = "Try to stay awake until local bedtime";

pub const TIP_MELATONIN: &str = "Large time difference detected. Consider melatonin supplements.";
pub const TIP_MORNING_LIGHT: &str =
    "Eastward travel: Expose yourself to morning light at destination.";
pub const TIP_AVOID_CAFFEINE: &str = "Avoid caffeine after 2 PM local time at destination.";
pub const TIP_EVENING_LIGHT: &str =
    "Westward travel: Expose yourself to evening light at destination.";
pub const TIP_WEST_EASIER: &str = "You may find it easier to adjust going west.";
pub const TIP_HYDRATE: &str = "Stay hydrated during flight.";
pub const TIP_NO_ALCOHOL: &str = "Avoid alcohol during flight.";
pub const TIP_PLANE_SLEEP: &str = "Try to sleep on the plane if it's nighttime at destination.";

/// Which night a [`SleepWindow`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepLabel {
    /// Nights before departure, counting down to 1
    DaysBefore(u32),
    /// Nights after arrival, starting at 1
    Night(u32),
}

impl fmt::Display for SleepLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SleepLabel::DaysBefore(n) => write!(f, "days before departure: {n}"),
            SleepLabel::Night(n) => write!(f, "night: {n}"),
        }
    }
}

/// A recommended night of sleep in the civil time of `zone`.
#[derive(Debug, Clone, PartialEq)]
pub struct SleepWindow {
    pub label: SleepLabel,
    pub zone: ZoneId,
    pub bedtime: NaiveDateTime,
    pub wake_time: NaiveDateTime,
    pub note: Option<String>,
}

impl SleepWindow {
    /// Window starting at `bedtime`; wake time is always [`SLEEP_HOURS`] later.
    pub fn new(label: SleepLabel, zone: ZoneId, bedtime: NaiveDateTime) -> Result<Self> {
        Ok(Self {
            label,
            zone,
            bedtime,
            wake_time: shift_civil(bedtime, Duration::hours(SLEEP_HOURS))?,
            note: None,
        })
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Bedtime as `YYYY-MM-DD HH:MM` civil time.
    pub fn bedtime_display(&self) -> String {
        self.bedtime.format(CIVIL_FORMAT).to_string()
    }

    /// Wake time as `YYYY-MM-DD HH:MM` civil time.
    pub fn wake_time_display(&self) -> String {
        self.wake_time.format(CIVIL_FORMAT).to_string()
    }

    /// Bedtime resolved to an instant in the window's zone.
    pub fn bedtime_instant(&self) -> DateTime<Tz> {
        self.zone.resolve_local(self.bedtime)
    }
}

/// Everything the engine derives for one trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Destination minus origin, in hours, evaluated at call time
    pub offset_hours: f64,
    pub arrival_at_dest: DateTime<Tz>,
    pub is_eastward: bool,
    /// Three windows, 3 -> 1 days before departure
    pub pre_flight: Vec<SleepWindow>,
    /// First night at the destination
    pub post_flight: Vec<SleepWindow>,
    pub tips: Vec<String>,
}

/// Hours the destination clock is ahead of the origin clock at `now`.
pub fn compute_offset(origin: ZoneId, destination: ZoneId, now: DateTime<Utc>) -> f64 {
    let origin_now = now.with_timezone(&origin.tz());
    let dest_now = origin_now.with_timezone(&destination.tz());
    let diff = dest_now.naive_local() - origin_now.naive_local();
    diff.num_seconds() as f64 / 3600.0
}

/// Arrival instant expressed in the destination zone.
///
/// The flight duration is added to the departure's origin civil time, which
/// is then resolved in the origin zone and converted.
pub fn compute_arrival(
    departure: DateTime<Tz>,
    flight_duration_hours: f64,
    destination: ZoneId,
) -> Result<DateTime<Tz>> {
    let origin = ZoneId::from(departure.timezone());
    let civil = shift_civil(
        departure.naive_local(),
        hours_to_duration(flight_duration_hours)?,
    )?;
    let arrival = origin.resolve_local(civil).with_timezone(&destination.tz());
    if !in_civil_range(arrival.naive_local()) {
        return Err(CoreError::OutOfRange(format!(
            "arrival {} in {destination}",
            arrival.naive_local()
        )));
    }
    Ok(arrival)
}

/// Same civil date and sub-minute part as `civil`, at `hour`:00.
fn at_clock(civil: NaiveDateTime, hour: u32) -> Result<NaiveDateTime> {
    NaiveTime::from_hms_nano_opt(hour, 0, civil.second(), civil.nanosecond())
        .map(|time| civil.date().and_time(time))
        .ok_or_else(|| CoreError::OutOfRange(format!("{hour}:00 on {}", civil.date())))
}

/// Bedtime ladder for the three nights before departure, in origin civil time.
pub fn build_pre_flight_schedule(
    departure: DateTime<Tz>,
    offset_hours: f64,
    is_eastward: bool,
) -> Result<Vec<SleepWindow>> {
    let zone = ZoneId::from(departure.timezone());
    let civil = departure.naive_local();

    PRE_FLIGHT_DAYS
        .iter()
        .map(|&days| {
            let days_back = -Duration::days(i64::from(days));
            let bedtime = if days == 1 {
                let hour = if is_eastward {
                    EASTWARD_EVE_BEDTIME_HOUR
                } else {
                    WESTWARD_EVE_BEDTIME_HOUR
                };
                shift_civil(at_clock(civil, hour)?, days_back)?
            } else {
                let adjustment = (offset_hours / 3.0) * f64::from(4 - days);
                let base = shift_civil(at_clock(civil, BASE_BEDTIME_HOUR)?, days_back)?;
                if is_eastward {
                    shift_civil(base, -hours_to_duration(adjustment)?)?
                } else {
                    shift_civil(base, hours_to_duration(adjustment.abs())?)?
                }
            };
            SleepWindow::new(SleepLabel::DaysBefore(days), zone, bedtime)
        })
        .collect()
}

/// First night at the destination: 22:00 on the arrival date, or the next
/// day if the flight lands after that.
pub fn build_post_flight_schedule(arrival_at_dest: DateTime<Tz>) -> Result<Vec<SleepWindow>> {
    let zone = ZoneId::from(arrival_at_dest.timezone());
    let arrival = arrival_at_dest.naive_local();
    let mut bedtime = at_clock(arrival, BASE_BEDTIME_HOUR)?;
    if bedtime < arrival {
        bedtime = shift_civil(bedtime, Duration::days(1))?;
    }
    Ok(vec![
        SleepWindow::new(SleepLabel::Night(1), zone, bedtime)?.with_note(POST_FLIGHT_NOTE)
    ])
}

/// Advisory tips, in display order.
pub fn build_tips(offset_hours: f64, is_eastward: bool) -> Vec<String> {
    let mut tips = Vec::with_capacity(6);
    if offset_hours.abs() >= MELATONIN_THRESHOLD_HOURS {
        tips.push(TIP_MELATONIN);
    }
    if is_eastward {
        tips.push(TIP_MORNING_LIGHT);
        tips.push(TIP_AVOID_CAFFEINE);
    } else {
        tips.push(TIP_EVENING_LIGHT);
        tips.push(TIP_WEST_EASIER);
    }
    tips.extend([TIP_HYDRATE, TIP_NO_ALCOHOL, TIP_PLANE_SLEEP]);
    tips.into_iter().map(String::from).collect()
}

/// Full recommendation for `plan`, with zone offsets evaluated at `now`.
pub fn get_sleep_recommendations(plan: &TravelPlan, now: DateTime<Utc>) -> Result<Recommendation> {
    let offset_hours = compute_offset(plan.origin(), plan.destination(), now);
    let arrival_at_dest = compute_arrival(
        plan.departure(),
        plan.flight_duration_hours(),
        plan.destination(),
    )?;
    let is_eastward = offset_hours > 0.0;

    tracing::debug!(
        origin = %plan.origin(),
        destination = %plan.destination(),
        offset_hours,
        is_eastward,
        "computed zone offset"
    );

    Ok(Recommendation {
        offset_hours,
        arrival_at_dest,
        is_eastward,
        pre_flight: build_pre_flight_schedule(plan.departure(), offset_hours, is_eastward)?,
        post_flight: build_post_flight_schedule(arrival_at_dest)?,
        tips: build_tips(offset_hours, is_eastward),
    })
}
