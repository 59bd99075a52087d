use clap::Subcommand;
use safebite_core::storage::data_dir;
use safebite_core::{Config, ConfigError};

use super::CommandResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Dot-separated key: alertness.sleep_hours, alertness.activity_level,
        /// alertness.stress_level, session.remember, logging.filter, logging.json
        key: String,
    },
    /// Set a config value
    Set {
        /// Dot-separated key, as for `get`
        key: String,
        /// New value, checked against the key's type and range
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Show where the config file and the journal are kept
    Path,
}

pub fn run(action: ConfigAction) -> CommandResult {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => {
            println!("config:  {}", Config::path()?.display());
            println!("journal: {}", data_dir()?.display());
        }
    }
    Ok(())
}
