//! Catalog of commonly used zones with friendly abbreviations.
//!
//! The catalog is plain data owned by whoever formats output. Zones outside
//! the table fall back to the last path segment of their identifier.

use serde::Serialize;

/// One row of the zone catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneEntry {
    /// IANA identifier
    pub name: String,
    /// Standard/daylight abbreviation pair, e.g. "EST/EDT"
    pub abbreviation: String,
    /// City label shown in menus
    pub label: String,
}

impl ZoneEntry {
    fn new(name: &str, abbreviation: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            label: label.to_string(),
        }
    }

    /// Menu label, e.g. "New York (EST/EDT)".
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.label, self.abbreviation)
    }
}

/// Ordered, immutable table of common zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCatalog {
    entries: Vec<ZoneEntry>,
}

impl Default for ZoneCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ZoneCatalog {
    /// The ten zones offered by the interactive menu.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                ZoneEntry::new("America/New_York", "EST/EDT", "New York"),
                ZoneEntry::new("America/Chicago", "CST/CDT", "Chicago"),
                ZoneEntry::new("America/Denver", "MST/MDT", "Denver"),
                ZoneEntry::new("America/Los_Angeles", "PST/PDT", "Los Angeles"),
                ZoneEntry::new("Europe/London", "GMT/BST", "London"),
                ZoneEntry::new("Europe/Paris", "CET/CEST", "Paris"),
                ZoneEntry::new("Asia/Tokyo", "JST", "Tokyo"),
                ZoneEntry::new("Asia/Shanghai", "CST", "Shanghai"),
                ZoneEntry::new("Australia/Sydney", "AEDT/AEST", "Sydney"),
                ZoneEntry::new("Pacific/Auckland", "NZDT/NZST", "Auckland"),
            ],
        }
    }

    pub fn from_entries(entries: Vec<ZoneEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ZoneEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ZoneEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Abbreviation for a zone, falling back to the trailing path segment
    /// ("Auckland" for "Pacific/Auckland").
    pub fn abbreviation(&self, name: &str) -> String {
        match self.get(name) {
            Some(entry) => entry.abbreviation.clone(),
            None => name.rsplit('/').next().unwrap_or(name).to_string(),
        }
    }

    /// Look up an entry by its 1-based menu number.
    pub fn by_shortcut(&self, key: &str) -> Option<&ZoneEntry> {
        let index = key.trim().parse::<usize>().ok()?;
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Numbered menu rows: ("1", entry), ("2", entry), ...
    pub fn shortcuts(&self) -> impl Iterator<Item = (String, &ZoneEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| ((i + 1).to_string(), entry))
    }
}
