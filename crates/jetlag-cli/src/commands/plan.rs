//! One-shot planning command.

use chrono::Utc;
use clap::Args;

use jetlag_core::{
    default_departure, get_sleep_recommendations, parse_departure, render_text, Config,
    RecommendationReport, TravelPlan, ZoneCatalog, ZoneId,
};

#[derive(Args)]
pub struct PlanArgs {
    /// Origin timezone (e.g. "America/New_York"); defaults to config
    #[arg(long)]
    from: Option<String>,
    /// Destination timezone (e.g. "Europe/London"); defaults to config
    #[arg(long)]
    to: Option<String>,
    /// Departure in origin local time, "YYYY-MM-DD HH:MM"; defaults to now + 1 day
    #[arg(long)]
    depart: Option<String>,
    /// Flight duration in hours; defaults to config
    #[arg(long)]
    duration: Option<f64>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let catalog = ZoneCatalog::builtin();
    let now = Utc::now();

    let origin = ZoneId::parse(args.from.as_deref().unwrap_or(&config.defaults.origin_zone))?;
    let destination = ZoneId::parse(args.to.as_deref().unwrap_or(&config.defaults.dest_zone))?;
    let departure = match args.depart.as_deref() {
        Some(s) => parse_departure(s, origin)?,
        None => default_departure(origin, now),
    };
    let hours = args
        .duration
        .unwrap_or(config.defaults.flight_duration_hours);

    let plan = TravelPlan::new(origin, destination, departure, hours)?;
    let rec = get_sleep_recommendations(&plan, now)?;

    if args.json {
        let report = RecommendationReport::new(&rec, &plan, &catalog);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&rec, &plan, &catalog));
    }
    Ok(())
}
