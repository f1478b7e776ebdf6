//! Trainer configuration.
//!
//! Built-in defaults, optionally overridden by a JSON file; the binary applies
//! command-line flags on top.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown log level '{0}'")]
    LogLevel(String),
    #[error("invalid stakes: small blind {small}, big blind {big}, raise {raise}")]
    Stakes { small: f64, big: f64, raise: f64 },
}

/// Delays between the presentational steps of a practice hand, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    pub dealer_ms: u64,
    pub blind_ms: u64,
    pub turn_ms: u64,
    pub evaluate_ms: u64,
    pub next_hand_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self { dealer_ms: 500, blind_ms: 550, turn_ms: 400, evaluate_ms: 550, next_hand_ms: 550 }
    }
}

impl Pacing {
    /// No delays at all. Steps still run one at a time.
    pub const fn instant() -> Self {
        Self { dealer_ms: 0, blind_ms: 0, turn_ms: 0, evaluate_ms: 0, next_hand_ms: 0 }
    }

    pub fn dealer(&self) -> Duration {
        Duration::from_millis(self.dealer_ms)
    }

    pub fn blind(&self) -> Duration {
        Duration::from_millis(self.blind_ms)
    }

    pub fn turn(&self) -> Duration {
        Duration::from_millis(self.turn_ms)
    }

    pub fn evaluate(&self) -> Duration {
        Duration::from_millis(self.evaluate_ms)
    }

    pub fn next_hand(&self) -> Duration {
        Duration::from_millis(self.next_hand_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Directory holding the stored ranges.
    pub storage_dir: PathBuf,
    pub persist_debounce_ms: u64,
    pub pacing: Pacing,
    /// Fixed RNG seed for reproducible deals.
    pub seed: Option<u64>,
    pub small_blind: f64,
    pub big_blind: f64,
    pub raise_size: f64,
    /// Defaults to `range-trainer.log` inside `storage_dir`.
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".range-trainer"),
            persist_debounce_ms: 300,
            pacing: Pacing::default(),
            seed: None,
            small_blind: 0.5,
            big_blind: 1.0,
            raise_size: 2.5,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl TrainerConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.level_filter()?;
        let ok = self.small_blind > 0.0
            && self.big_blind >= self.small_blind
            && self.raise_size > self.big_blind;
        if !ok {
            return Err(ConfigError::Stakes {
                small: self.small_blind,
                big: self.big_blind,
                raise: self.raise_size,
            });
        }
        Ok(())
    }

    pub fn persist_debounce(&self) -> Duration {
        Duration::from_millis(self.persist_debounce_ms)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level.parse().map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| self.storage_dir.join("range-trainer.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_table_conventions() {
        let cfg = TrainerConfig::default();
        assert_eq!(cfg.persist_debounce(), Duration::from_millis(300));
        assert_eq!(cfg.pacing.turn(), Duration::from_millis(400));
        assert_eq!(cfg.raise_size, 2.5);
        assert_eq!(cfg.level_filter().unwrap(), LevelFilter::Info);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg: TrainerConfig =
            serde_json::from_str(r#"{"seed": 7, "pacing": {"turn_ms": 10}}"#).unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.pacing.turn_ms, 10);
        assert_eq!(cfg.pacing.dealer_ms, 500);
        assert_eq!(cfg.big_blind, 1.0);
    }

    #[test]
    fn rejects_bad_level_and_stakes() {
        let cfg = TrainerConfig { log_level: "loud".into(), ..TrainerConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::LogLevel(_))));
        let cfg = TrainerConfig { raise_size: 0.5, ..TrainerConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Stakes { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TrainerConfig::load(Path::new("/nonexistent/range-trainer.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn log_path_defaults_into_storage_dir() {
        let cfg = TrainerConfig { storage_dir: PathBuf::from("/tmp/rt"), ..Default::default() };
        assert_eq!(cfg.log_path(), PathBuf::from("/tmp/rt/range-trainer.log"));
    }
}
