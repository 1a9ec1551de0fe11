//! Application configuration
//!
//! An optional `config.toml` in the platform config directory selects the
//! database path; otherwise the platform data directory is used.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{debug, warn};

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path of the SQLite room store
    pub db_path: PathBuf,
}

/// On-disk shape of config.toml; all fields optional
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    db_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration, falling back to platform defaults
    pub fn load() -> std::io::Result<Self> {
        let dirs = ProjectDirs::from("", "", "splitroom");

        let file = dirs
            .as_ref()
            .map(|d| d.config_dir().join("config.toml"))
            .filter(|p| p.exists())
            .and_then(|path| match fs::read_to_string(&path) {
                Ok(raw) => match toml::from_str::<ConfigFile>(&raw) {
                    Ok(cfg) => {
                        debug!(path = %path.display(), "Loaded config file");
                        Some(cfg)
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Ignoring malformed config file");
                        None
                    }
                },
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Could not read config file");
                    None
                }
            })
            .unwrap_or_default();

        let db_path = match file.db_path {
            Some(path) => path,
            None => {
                let data_dir = dirs
                    .as_ref()
                    .map(|d| d.data_dir().to_path_buf())
                    .unwrap_or_else(|| PathBuf::from("."));
                data_dir.join("rooms.db")
            }
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { db_path })
    }
}
