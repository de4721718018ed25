use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod server;

#[derive(Parser)]
#[command(name = "jetlag", version, about = "Jetlag sleep planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a sleep schedule for one trip
    Plan(commands::plan::PlanArgs),
    /// Answer prompts to build a sleep schedule
    Interactive,
    /// List common timezones
    Zones {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Run the HTTP API
    Serve(commands::serve::ServeArgs),
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    });

    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Interactive => commands::interactive::run(),
        Commands::Zones { json } => commands::zones::run(json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Serve(args) => commands::serve::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
