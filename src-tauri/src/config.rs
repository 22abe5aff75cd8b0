//! Application Configuration
//!
//! Optional `trip_board.toml` in the app config dir; every key has a default.
//! A couple of board rules can also be overridden from the environment.

use rolling_logger::{LevelFilter, LoggerConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::{DomainError, DomainResult, RelocationPolicy, DEFAULT_MAX_ITEMS_PER_DAY};

pub const CONFIG_FILE_NAME: &str = "trip_board.toml";

const ENV_MAX_ITEMS: &str = "TRIP_BOARD_MAX_ITEMS_PER_DAY";
const ENV_NON_EMPTY: &str = "TRIP_BOARD_REQUIRE_NON_EMPTY_DAY";
const ENV_LOG_LEVEL: &str = "TRIP_BOARD_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub max_items_per_day: usize,
    pub require_non_empty_day: bool,
    /// How long board warnings stay visible
    pub warning_dismiss_ms: u32,
    /// Owner id stamped on stored rows
    pub owner_id: String,
    pub db_file: String,
    pub log_max_bytes: u64,
    pub log_max_files: usize,
    pub log_ring_lines: usize,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_items_per_day: DEFAULT_MAX_ITEMS_PER_DAY,
            require_non_empty_day: false,
            warning_dismiss_ms: 3000,
            owner_id: "local".to_string(),
            db_file: "trip_board.db".to_string(),
            log_max_bytes: 1024 * 1024,
            log_max_files: 3,
            log_ring_lines: 200,
            log_level: "info".to_string(),
        }
    }
}

/// Board rules the frontend needs to know about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardSettings {
    pub max_items_per_day: usize,
    pub require_non_empty_day: bool,
    pub warning_dismiss_ms: u32,
}

impl PlannerConfig {
    /// Read `<dir>/trip_board.toml` if present, then apply environment overrides
    pub fn load(dir: &Path) -> DomainResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| DomainError::invalid(format!("Cannot read {}: {}", path.display(), e)))?;
            Self::from_toml(&raw)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> DomainResult<Self> {
        toml::from_str(raw).map_err(|e| DomainError::invalid(format!("Bad config: {}", e)))
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> DomainResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_MAX_ITEMS) {
            self.max_items_per_day = raw
                .trim()
                .parse()
                .map_err(|_| DomainError::invalid(format!("{} must be a number, got '{}'", ENV_MAX_ITEMS, raw)))?;
        }
        if let Some(raw) = lookup(ENV_NON_EMPTY) {
            self.require_non_empty_day = matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            self.log_level = raw.trim().to_string();
        }
        Ok(())
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.max_items_per_day == 0 {
            return Err(DomainError::invalid("max_items_per_day must be at least 1"));
        }
        if self.owner_id.trim().is_empty() {
            return Err(DomainError::invalid("owner_id must not be empty"));
        }
        if self.db_file.trim().is_empty() {
            return Err(DomainError::invalid("db_file must not be empty"));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn policy(&self) -> RelocationPolicy {
        RelocationPolicy {
            max_items_per_day: self.max_items_per_day,
            require_non_empty_day: self.require_non_empty_day,
        }
    }

    pub fn board_settings(&self) -> BoardSettings {
        BoardSettings {
            max_items_per_day: self.max_items_per_day,
            require_non_empty_day: self.require_non_empty_day,
            warning_dismiss_ms: self.warning_dismiss_ms,
        }
    }

    fn level_filter(&self) -> DomainResult<LevelFilter> {
        self.log_level
            .trim()
            .parse()
            .map_err(|_| DomainError::invalid(format!("Unknown log_level '{}'", self.log_level)))
    }

    pub fn logger_config(&self) -> DomainResult<LoggerConfig> {
        Ok(LoggerConfig {
            max_bytes: self.log_max_bytes,
            max_files: self.log_max_files,
            ring_lines: self.log_ring_lines,
            level: self.level_filter()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlannerConfig::load(dir.path()).unwrap();
        assert_eq!(config.max_items_per_day, 6);
        assert_eq!(config.warning_dismiss_ms, 3000);
        assert_eq!(config.policy(), RelocationPolicy::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "require_non_empty_day = true\nowner_id = \"alice\"\n",
        )
        .unwrap();
        let config = PlannerConfig::load(dir.path()).unwrap();
        assert!(config.require_non_empty_day);
        assert_eq!(config.owner_id, "alice");
        assert_eq!(config.db_file, "trip_board.db");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = PlannerConfig::default();
        config
            .apply_env(|key| match key {
                ENV_MAX_ITEMS => Some("8".to_string()),
                ENV_NON_EMPTY => Some("TRUE".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.max_items_per_day, 8);
        assert!(config.require_non_empty_day);

        assert!(config.apply_env(|_| Some("lots".to_string())).is_err());
    }

    #[test]
    fn test_log_level() {
        let config = PlannerConfig::default();
        assert_eq!(config.logger_config().unwrap().level, LevelFilter::INFO);

        let mut config = PlannerConfig::from_toml("log_level = \"debug\"").unwrap();
        assert_eq!(config.logger_config().unwrap().level, LevelFilter::DEBUG);

        config
            .apply_env(|key| (key == ENV_LOG_LEVEL).then(|| "WARN".to_string()))
            .unwrap();
        assert_eq!(config.logger_config().unwrap().level, LevelFilter::WARN);

        config.log_level = "chatty".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values() {
        let config = PlannerConfig::from_toml("max_items_per_day = 0").unwrap();
        assert!(config.validate().is_err());
        assert!(PlannerConfig::from_toml("max_items_per_day = \"six\"").is_err());
    }
}
