//! Serialized and human-readable views of a [`Recommendation`].

use serde::{Deserialize, Serialize};

use crate::engine::{Recommendation, SleepLabel, SleepWindow};
use crate::plan::TravelPlan;
use crate::zones::ZoneCatalog;

/// Arrival timestamps carry the zone abbreviation in force at arrival.
pub const ARRIVAL_FORMAT: &str = "%Y-%m-%d %H:%M %Z";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreFlightEntry {
    pub days_before: u32,
    pub bedtime: String,
    pub wake_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostFlightEntry {
    pub night: u32,
    pub bedtime: String,
    pub wake_time: String,
    pub note: String,
}

/// Wire shape of a recommendation, shared by the CLI `--json` output and the
/// HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub time_difference_hours: f64,
    pub arrival_time_dest: String,
    pub is_eastward: bool,
    pub pre_flight_sleep: Vec<PreFlightEntry>,
    pub post_flight_sleep: Vec<PostFlightEntry>,
    pub tips: Vec<String>,
    pub origin_tz_abbrev: String,
    pub dest_tz_abbrev: String,
}

fn label_number(window: &SleepWindow) -> u32 {
    match window.label {
        SleepLabel::DaysBefore(n) | SleepLabel::Night(n) => n,
    }
}

impl RecommendationReport {
    pub fn new(rec: &Recommendation, plan: &TravelPlan, catalog: &ZoneCatalog) -> Self {
        Self {
            time_difference_hours: rec.offset_hours,
            arrival_time_dest: rec.arrival_at_dest.format(ARRIVAL_FORMAT).to_string(),
            is_eastward: rec.is_eastward,
            pre_flight_sleep: rec
                .pre_flight
                .iter()
                .map(|w| PreFlightEntry {
                    days_before: label_number(w),
                    bedtime: w.bedtime_display(),
                    wake_time: w.wake_time_display(),
                })
                .collect(),
            post_flight_sleep: rec
                .post_flight
                .iter()
                .map(|w| PostFlightEntry {
                    night: label_number(w),
                    bedtime: w.bedtime_display(),
                    wake_time: w.wake_time_display(),
                    note: w.note.clone().unwrap_or_default(),
                })
                .collect(),
            tips: rec.tips.clone(),
            origin_tz_abbrev: catalog.abbreviation(plan.origin().name()),
            dest_tz_abbrev: catalog.abbreviation(plan.destination().name()),
        }
    }
}

fn push_section(out: &mut String, rule: &str, title: &str) {
    out.push_str(&format!("\n{rule}\n{title}\n{rule}\n"));
}

/// Banner-style text report for terminals.
pub fn render_text(rec: &Recommendation, plan: &TravelPlan, catalog: &ZoneCatalog) -> String {
    let heavy = "=".repeat(60);
    let light = "-".repeat(60);
    let dest_abbrev = catalog.abbreviation(plan.destination().name());
    let direction = if rec.is_eastward { "Eastward" } else { "Westward" };
    let mut out = String::new();

    push_section(&mut out, &heavy, "JETLAG SLEEP RECOMMENDATIONS");
    out.push_str(&format!("\nTime Difference: {:.1} hours\n", rec.offset_hours));
    out.push_str(&format!("Direction: {direction}\n"));
    out.push_str(&format!(
        "Arrival Time (Destination): {}\n",
        rec.arrival_at_dest.format(ARRIVAL_FORMAT)
    ));

    push_section(&mut out, &light, "PRE-FLIGHT SLEEP SCHEDULE (Adjust gradually)");
    for window in &rec.pre_flight {
        out.push_str(&format!(
            "\n{} day(s) before departure:\n",
            label_number(window)
        ));
        out.push_str(&format!("  Bedtime:  {}\n", window.bedtime_display()));
        out.push_str(&format!("  Wake up:  {}\n", window.wake_time_display()));
    }

    push_section(&mut out, &light, "POST-FLIGHT SLEEP SCHEDULE");
    for window in &rec.post_flight {
        out.push_str(&format!("\nNight {} at destination:\n", label_number(window)));
        out.push_str(&format!(
            "  Bedtime:  {} ({dest_abbrev})\n",
            window.bedtime_display()
        ));
        out.push_str(&format!(
            "  Wake up:  {} ({dest_abbrev})\n",
            window.wake_time_display()
        ));
        if let Some(note) = &window.note {
            out.push_str(&format!("  Note:     {note}\n"));
        }
    }

    push_section(&mut out, &light, "TIPS TO MINIMIZE JETLAG");
    for (i, tip) in rec.tips.iter().enumerate() {
        out.push_str(&format!("{}. {tip}\n", i + 1));
    }
    out.push_str(&format!("\n{heavy}\n"));
    out
}
