use chrono::NaiveDate;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::month::WeekStart;
use crate::range::{DateRange, DefinedRange};
use crate::translation::Translation;

const CONFIG_PATH_ENV_VAR: &str = "RANGEPICK_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> io::Result<Vec<PathBuf>> {
    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::Other, "Unable to find home directory")
    })?;

    let config_dir = dirs::config_dir().unwrap_or_else(|| home.join(".config"));

    let mut locations = vec![
        config_dir.join("rangepick").join("config.toml"),
        home.join(".rangepick.toml"),
    ];

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.insert(0, PathBuf::from(path));
    }

    Ok(locations)
}

/// Options of one picker session. Every field has a default, so an empty
/// file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub initial_date_range: DateRange,
    pub defined_ranges: Vec<DefinedRange>,
    /// Append the built-in quick picks ("Today", "Last 7 Days", ...).
    pub default_ranges: bool,
    pub week_start: WeekStart,
    pub translation: Translation,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Config> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        Config::from_toml(&content).map_err(|e| {
            let msg = format!("{}: {}", path.display(), e.message.as_deref().unwrap_or(""));
            e.with_msg(&msg)
        })
    }
}

/// Loads `path` if given, otherwise the first existing default location,
/// otherwise the defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    for candidate in find_configfile_locations()? {
        if candidate.is_file() {
            log::info!("Using config file {}", candidate.display());
            return Config::from_file(&candidate);
        }
    }

    log::info!("No config file found, using defaults");
    Ok(Config::default())
}
