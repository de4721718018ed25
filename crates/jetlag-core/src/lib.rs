//! # Jetlag Core Library
//!
//! This library computes sleep-adjustment schedules that ease jetlag. The CLI
//! binary and the HTTP API are thin drivers over the same core.
//!
//! ## Architecture
//!
//! - **Engine**: a deterministic function of the travel plan and the instant
//!   at which zone rules are evaluated; the caller supplies "now"
//! - **Plan**: zone identifiers, departure parsing, duration validation
//! - **Zones**: catalog of common zones with friendly abbreviations
//! - **Report**: JSON wire shape and terminal rendering of a recommendation
//! - **Config**: TOML-based user defaults
//!
//! ## Key Components
//!
//! - [`get_sleep_recommendations`]: Full recommendation for one trip
//! - [`TravelPlan`]: Validated engine input
//! - [`RecommendationReport`]: Serialized output contract
//! - [`Config`]: Application configuration management

pub mod config;
pub mod engine;
pub mod error;
pub mod plan;
pub mod report;
pub mod zones;

pub use config::Config;
pub use engine::{
    build_post_flight_schedule, build_pre_flight_schedule, build_tips, compute_arrival,
    compute_offset, get_sleep_recommendations, Recommendation, SleepLabel, SleepWindow,
};
pub use error::{ConfigError, CoreError, Result};
pub use plan::{
    default_departure, parse_departure, parse_duration, TravelPlan, ZoneId, CIVIL_FORMAT,
};
pub use report::{render_text, PostFlightEntry, PreFlightEntry, RecommendationReport};
pub use zones::{ZoneCatalog, ZoneEntry};
