//! Prompt-driven planning session.
//!
//! Blank answers fall back to configured defaults. A malformed departure or
//! duration is reported and replaced by its default instead of aborting.

use chrono::{DateTime, Utc};
use std::io::{self, BufRead, Write};

use jetlag_core::{
    default_departure, get_sleep_recommendations, parse_departure, parse_duration, render_text,
    Config, CoreError, TravelPlan, ZoneCatalog, ZoneId,
};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(
        &mut stdin.lock(),
        &mut stdout.lock(),
        &config,
        &ZoneCatalog::builtin(),
        Utc::now(),
    )
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Menu number, raw zone name, or the default when blank.
fn choose_zone(answer: &str, catalog: &ZoneCatalog, default: &str) -> String {
    if answer.is_empty() {
        return default.to_string();
    }
    match catalog.by_shortcut(answer) {
        Some(entry) => entry.name.clone(),
        None => answer.to_string(),
    }
}

fn print_menu<W: Write>(output: &mut W, catalog: &ZoneCatalog, example: &str) -> io::Result<()> {
    for (key, entry) in catalog.shortcuts() {
        writeln!(output, "  {key}. {}", entry.display_label())?;
    }
    writeln!(output, "  Or enter a timezone name (e.g., '{example}')")
}

pub fn run_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    config: &Config,
    catalog: &ZoneCatalog,
    now: DateTime<Utc>,
) -> Result<(), Box<dyn std::error::Error>> {
    let banner = "=".repeat(60);
    writeln!(output, "\n{banner}\nJETLAG SLEEP CALCULATOR\n{banner}")?;

    writeln!(output, "\nSelect your ORIGIN timezone:")?;
    print_menu(output, catalog, &config.defaults.origin_zone)?;
    let answer = prompt(input, output, "\nYour choice: ")?;
    let origin_name = choose_zone(&answer, catalog, &config.defaults.origin_zone);

    writeln!(output, "\nSelect your DESTINATION timezone:")?;
    print_menu(output, catalog, &config.defaults.dest_zone)?;
    let answer = prompt(input, output, "\nYour choice: ")?;
    let dest_name = choose_zone(&answer, catalog, &config.defaults.dest_zone);

    writeln!(output, "\nEnter your DEPARTURE TIME:")?;
    writeln!(output, "Format: YYYY-MM-DD HH:MM (e.g., 2024-12-15 14:30)")?;
    writeln!(output, "Or press Enter to use current time + 1 day")?;
    let departure_answer = prompt(input, output, "Departure time: ")?;

    let duration_answer = prompt(
        input,
        output,
        "\nFlight duration in hours (press Enter for default): ",
    )?;
    let hours = if duration_answer.is_empty() {
        config.defaults.flight_duration_hours
    } else {
        match parse_duration(&duration_answer) {
            Ok(hours) => hours,
            Err(e) => {
                writeln!(output, "{e}. Using 0 hours.")?;
                0.0
            }
        }
    };

    let planned = ZoneId::parse(&origin_name).and_then(|origin| {
        let destination = ZoneId::parse(&dest_name)?;
        let departure = if departure_answer.is_empty() {
            default_departure(origin, now)
        } else {
            match parse_departure(&departure_answer, origin) {
                Ok(departure) => departure,
                Err(CoreError::MalformedDeparture { .. }) => {
                    tracing::debug!(input = %departure_answer, "departure fallback");
                    // Reporting failures here only loses the notice, not the plan.
                    let _ = writeln!(output, "Invalid format. Using current time + 1 day.");
                    default_departure(origin, now)
                }
                Err(e) => return Err(e),
            }
        };
        let plan = TravelPlan::new(origin, destination, departure, hours)?;
        let rec = get_sleep_recommendations(&plan, now)?;
        Ok((plan, rec))
    });

    match planned {
        Ok((plan, rec)) => {
            write!(output, "{}", render_text(&rec, &plan, catalog))?;
            Ok(())
        }
        Err(e) => {
            writeln!(output, "\nError: {e}")?;
            writeln!(output, "Please check your timezone names and try again.")?;
            Err(e.into())
        }
    }
}
