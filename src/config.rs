//! Application configuration
//!
//! Values come from the environment with defaults suitable for a desktop
//! install. The database lives in the platform data directory unless
//! `NOTICEBOARD_DB_PATH` points somewhere else.

use crate::error::{AppError, AppResult};
use log::info;
use sqlx::sqlite::SqliteConnectOptions;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DB_PATH_ENV: &str = "NOTICEBOARD_DB_PATH";
pub const POLL_SECS_ENV: &str = "NOTICEBOARD_POLL_SECS";

const DEFAULT_POLL_SECS: u64 = 5;
const MAX_POLL_SECS: u64 = 3600;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite file backing the announcements collection
    pub db_path: PathBuf,
    /// How often the snapshot listener re-reads the store for external writes
    pub poll_interval: Duration,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let db_path = match env::var(DB_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_db_path()?,
        };

        let poll_secs = match env::var(POLL_SECS_ENV) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::config(format!("{} must be a whole number of seconds, got '{}'", POLL_SECS_ENV, raw))
            })?,
            Err(_) => DEFAULT_POLL_SECS,
        };

        let config = Self {
            db_path,
            poll_interval: Duration::from_secs(poll_secs),
        };
        config.validate()?;
        Ok(config)
    }

    /// Connection options for the database file, created when missing.
    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.db_path)
            .create_if_missing(true)
    }

    pub fn validate(&self) -> AppResult<()> {
        let secs = self.poll_interval.as_secs();
        if secs == 0 || secs > MAX_POLL_SECS {
            return Err(AppError::config(format!(
                "poll interval must be between 1 and {} seconds",
                MAX_POLL_SECS
            )));
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::config("database path is empty"));
        }
        info!("Configuration OK (db: {}, poll: {}s)", self.db_path.display(), secs);
        Ok(())
    }
}

fn default_db_path() -> AppResult<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| AppError::config("unable to locate a data directory"))?;
    let dir = base.join("noticeboard");
    std::fs::create_dir_all(&dir)
        .map_err(|e| AppError::config(format!("cannot create {}: {}", dir.display(), e)))?;
    Ok(dir.join("noticeboard.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_uses_overrides() {
        env::set_var(DB_PATH_ENV, "/tmp/board-test.db");
        env::set_var(POLL_SECS_ENV, "12");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/board-test.db"));
        assert_eq!(config.poll_interval, Duration::from_secs(12));
        assert_eq!(
            &*config.connect_options().get_filename(),
            std::path::Path::new("/tmp/board-test.db")
        );

        env::remove_var(DB_PATH_ENV);
        env::remove_var(POLL_SECS_ENV);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_garbage_poll() {
        env::set_var(DB_PATH_ENV, "/tmp/board-test.db");
        env::set_var(POLL_SECS_ENV, "soon");

        let result = AppConfig::from_env();
        assert!(matches!(result, Err(AppError::Config(_))));

        env::remove_var(DB_PATH_ENV);
        env::remove_var(POLL_SECS_ENV);
    }

    #[test]
    fn test_validate_poll_bounds() {
        let mut config = AppConfig {
            db_path: PathBuf::from("board.db"),
            poll_interval: Duration::from_secs(0),
        };
        assert!(config.validate().is_err());

        config.poll_interval = Duration::from_secs(MAX_POLL_SECS + 1);
        assert!(config.validate().is_err());

        config.poll_interval = Duration::from_secs(30);
        assert!(config.validate().is_ok());
    }
}
