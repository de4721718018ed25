//! `jetlag config`: inspect and edit the stored planning defaults.

use clap::Subcommand;
use jetlag_core::{Config, ZoneCatalog};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value (e.g. "defaults.origin_zone", "server.port")
    Get { key: String },
    /// Store a value; zone keys must name an IANA timezone
    Set { key: String, value: String },
    /// Print every value as JSON
    List,
    /// Print the location of the config file
    Path,
    /// Restore the built-in defaults
    Reset,
}

/// Zone values are echoed with their catalog label when there is one.
fn describe(key: &str, value: &str) -> String {
    if !key.ends_with("_zone") {
        return format!("{key} = {value}");
    }
    match ZoneCatalog::builtin().get(value) {
        Some(entry) => format!("{key} = {value} ({})", entry.display_label()),
        None => format!("{key} = {value}"),
    }
}

fn set(key: &str, value: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    tracing::debug!(key, value, "config updated");
    let stored = config.get(key).unwrap_or_else(|| value.to_string());
    Ok(describe(key, &stored))
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => match Config::load()?.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown key: {key}").into()),
        },
        ConfigAction::Set { key, value } => println!("{}", set(&key, &value)?),
        ConfigAction::List => {
            println!("{}", serde_json::to_string_pretty(&Config::load()?)?);
        }
        ConfigAction::Path => println!("{}", Config::path()?.display()),
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
