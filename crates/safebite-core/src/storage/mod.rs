pub mod config;
pub mod kv;

pub use config::Config;
pub use kv::{FileStore, KvStore, MemoryStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Store key holding the serialized food log.
pub const FOOD_LOGS_KEY: &str = "foodLogs";

/// Store key holding the remembered `{email}` session record.
pub const USER_KEY: &str = "safeBiteUser";

/// Returns the directory holding `config.toml` and the store files.
///
/// `SAFEBITE_DATA_DIR` wins when set. Otherwise `~/.config/safebite`, or
/// `~/.config/safebite-dev` with `SAFEBITE_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("SAFEBITE_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("SAFEBITE_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("safebite-dev")
            } else {
                base_dir.join("safebite")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
