//! Run configuration.
//!
//! Loaded from an explicit path, ./.oddeven.yml or ~/.config/oddeven/oddeven.yml

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Mode;
use crate::orchestrator::RunSettings;

/// Configuration for oddeven.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Iteration bound for both workers.
    pub limit: u64,

    /// Coordination protocol.
    pub mode: Mode,

    /// Tokio runtime worker threads.
    #[serde(rename = "worker-threads")]
    pub worker_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limit: super::DEFAULT_LIMIT,
            mode: Mode::default(),
            worker_threads: super::DEFAULT_WORKER_THREADS,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .oddeven.yml in current directory
    /// 3. ~/.config/oddeven/oddeven.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_config = PathBuf::from(super::PROJECT_CONFIG_FILE);
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from {}", super::PROJECT_CONFIG_FILE);
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load {}: {}", super::PROJECT_CONFIG_FILE, e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("oddeven").join("oddeven.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Apply command-line overrides on top of loaded values.
    pub fn with_overrides(mut self, limit: Option<u64>, mode: Option<Mode>) -> Self {
        if let Some(limit) = limit {
            self.limit = limit;
        }
        if let Some(mode) = mode {
            self.mode = mode;
        }
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.worker_threads == 0 {
            eyre::bail!("worker-threads must be > 0");
        }
        Ok(())
    }

    /// Settings handed to the orchestrator.
    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            limit: self.limit,
            mode: self.mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.limit, 10);
        assert_eq!(config.mode, Mode::Lockstep);
        assert_eq!(config.worker_threads, 2);
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let config = Config {
            worker_threads: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_limit_is_valid() {
        let config = Config {
            limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
limit: 20
mode: strict
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.limit, 20);
        assert_eq!(config.mode, Mode::Strict);
        // Other fields should have defaults
        assert_eq!(config.worker_threads, 2);
    }

    #[test]
    fn test_parse_worker_threads() {
        let config: Config = serde_yaml::from_str("worker-threads: 4").unwrap();
        assert_eq!(config.worker_threads, 4);
        assert_eq!(config.limit, 10);
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yml");
        fs::write(&path, "limit: 4\nmode: strict\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.limit, 4);
        assert_eq!(config.mode, Mode::Strict);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "mode: sideways\n").unwrap();
        assert!(Config::load_from_file(&path).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some(6), Some(Mode::Strict));
        assert_eq!(config.limit, 6);
        assert_eq!(config.mode, Mode::Strict);

        let untouched = Config::default().with_overrides(None, None);
        assert_eq!(untouched, Config::default());
    }

    #[test]
    fn test_run_settings() {
        let config = Config::default().with_overrides(Some(3), None);
        let settings = config.run_settings();
        assert_eq!(settings.limit, 3);
        assert_eq!(settings.mode, Mode::Lockstep);
    }
}
