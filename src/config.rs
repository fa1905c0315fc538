//! Configuration loaded from `config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::BudgetConfig;

/// Budget used when the configuration does not name one.
pub const DEFAULT_BUDGET: f64 = 2000.0;
pub const DEFAULT_EXPENSE_FILE: &str = "expenses.csv";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not access config file: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed budget for the period.
    pub budget: f64,
    /// Path of the CSV expense log.
    pub expense_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            expense_file: PathBuf::from(DEFAULT_EXPENSE_FILE),
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    pub fn from_toml(data: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(data).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads the configuration at `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml(&data)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let data = toml::to_string(self).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        fs::write(path, data).map_err(ConfigError::Io)
    }

    pub fn budget_config(&self) -> BudgetConfig {
        BudgetConfig::new(self.budget)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "budget must be a non-negative number, got {}",
                self.budget
            )));
        }
        if self.expense_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("expense_file is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.budget, 2000.0);
    }

    #[test]
    fn rejects_negative_budget() {
        let err = Config::from_toml("budget = -5.0").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("budget must be a non-negative number"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("expense-tracker-no-such-config.toml");
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.expense_file, PathBuf::from("expenses.csv"));
    }
}
