//! Listing of the built-in zone catalog.

use jetlag_core::ZoneCatalog;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = ZoneCatalog::builtin();
    if json {
        println!("{}", serde_json::to_string_pretty(catalog.entries())?);
        return Ok(());
    }

    println!("Common timezones:");
    for (key, entry) in catalog.shortcuts() {
        println!("  {:>2}. {:<24} {}", key, entry.display_label(), entry.name);
    }
    Ok(())
}
