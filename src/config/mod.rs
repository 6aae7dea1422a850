//! Configuration management module
//!
//! Handles loading, saving, and validation of user preferences: rest
//! durations, questionnaire gating, the calorie goal and UI tick rate.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{PulseError, Result, APP_NAME, CONFIG_FILE, DEFAULT_REST_SECS};

const MAX_REST_SECS: u32 = 600;
const MIN_TICK_RATE_MS: u64 = 50;
const MAX_TICK_RATE_MS: u64 = 1000;
const MAX_CALORIE_GOAL: u32 = 10_000;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub workout: WorkoutConfig,
    pub questionnaire: QuestionnaireConfig,
    pub diet: DietConfig,
    pub ui: UiConfig,
}

/// Rest duration table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutConfig {
    /// Rest used when the exercise table has no value of its own
    pub default_rest_secs: u32,
    /// Per-exercise rest, by exercise name, winning over the table
    pub rest_overrides: BTreeMap<String, u32>,
}

/// Questionnaire behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionnaireConfig {
    /// Refuse to move past an unanswered question
    pub require_answer: bool,
}

/// Diet screen settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DietConfig {
    pub calorie_goal: u32,
}

/// Terminal UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Event poll interval for redraws
    pub tick_rate_ms: u64,
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            default_rest_secs: DEFAULT_REST_SECS,
            rest_overrides: BTreeMap::new(),
        }
    }
}

impl Default for QuestionnaireConfig {
    fn default() -> Self {
        Self {
            require_answer: true,
        }
    }
}

impl Default for DietConfig {
    fn default() -> Self {
        Self { calorie_goal: 2200 }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}

impl WorkoutConfig {
    /// Resolve the rest for an exercise: override, then table value, then default
    pub fn rest_for(&self, exercise: &str, table_secs: Option<u32>) -> u32 {
        self.rest_overrides
            .get(exercise)
            .copied()
            .or(table_secs)
            .unwrap_or(self.default_rest_secs)
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl AppConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default rest duration
    pub fn with_default_rest_secs(mut self, secs: u32) -> Self {
        self.workout.default_rest_secs = secs;
        self
    }

    /// Set a per-exercise rest override
    pub fn with_rest_override(mut self, exercise: &str, secs: u32) -> Self {
        self.workout.rest_overrides.insert(exercise.to_string(), secs);
        self
    }

    /// Set whether questions must be answered before advancing
    pub fn with_require_answer(mut self, require: bool) -> Self {
        self.questionnaire.require_answer = require;
        self
    }

    /// Set the daily calorie goal
    pub fn with_calorie_goal(mut self, goal: u32) -> Self {
        self.diet.calorie_goal = goal;
        self
    }

    /// Set the UI tick rate
    pub fn with_tick_rate_ms(mut self, ms: u64) -> Self {
        self.ui.tick_rate_ms = ms;
        self
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        let check_rest = |label: &str, secs: u32| {
            if secs == 0 || secs > MAX_REST_SECS {
                Err(PulseError::ConfigError(format!(
                    "{} must be between 1 and {} seconds (got {})",
                    label, MAX_REST_SECS, secs
                )))
            } else {
                Ok(())
            }
        };

        check_rest("Default rest", self.workout.default_rest_secs)?;
        for (exercise, secs) in &self.workout.rest_overrides {
            check_rest(&format!("Rest for '{}'", exercise), *secs)?;
        }

        if self.diet.calorie_goal > MAX_CALORIE_GOAL {
            return Err(PulseError::ConfigError(format!(
                "Calorie goal too large: {} (max: {})",
                self.diet.calorie_goal, MAX_CALORIE_GOAL
            )));
        }

        if !(MIN_TICK_RATE_MS..=MAX_TICK_RATE_MS).contains(&self.ui.tick_rate_ms) {
            return Err(PulseError::ConfigError(format!(
                "Tick rate must be between {} and {} ms",
                MIN_TICK_RATE_MS, MAX_TICK_RATE_MS
            )));
        }

        Ok(())
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`, defaulting when it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            PulseError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            PulseError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PulseError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(path, content).map_err(|e| {
            PulseError::ConfigError(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/pulsefit/pulsefit.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            PulseError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.workout.default_rest_secs, 90);
        assert!(config.questionnaire.require_answer);
        assert_eq!(config.ui.tick_rate(), Duration::from_millis(250));
    }

    #[test]
    fn test_rest_resolution_order() {
        let config = AppConfig::new().with_rest_override("Squat", 150).workout;
        assert_eq!(config.rest_for("Squat", Some(120)), 150);
        assert_eq!(config.rest_for("Row", Some(75)), 75);
        assert_eq!(config.rest_for("Row", None), 90);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(AppConfig::new().with_default_rest_secs(0).validate().is_err());
        assert!(AppConfig::new().with_default_rest_secs(601).validate().is_err());
        assert!(AppConfig::new()
            .with_rest_override("Squat", 0)
            .validate()
            .is_err());
        assert!(AppConfig::new().with_tick_rate_ms(10).validate().is_err());
        assert!(AppConfig::new().with_calorie_goal(20_000).validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("pulsefit.toml");

        let config = AppConfig::new()
            .with_default_rest_secs(75)
            .with_rest_override("Bench Press", 100)
            .with_require_answer(false)
            .with_calorie_goal(1800);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pulsefit.toml");
        fs::write(&path, "[workout]\ndefault_rest_secs = 60\n").unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.workout.default_rest_secs, 60);
        assert!(loaded.questionnaire.require_answer);
        assert_eq!(loaded.diet.calorie_goal, 2200);
    }

    #[test]
    fn test_missing_file_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = AppConfig::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pulsefit.toml");
        fs::write(&path, "[ui]\ntick_rate_ms = \"fast\"\n").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(PulseError::ConfigError(_))
        ));
    }

    #[test]
    fn test_config_file_path() {
        if let Ok(path) = AppConfig::config_file_path() {
            assert!(path.to_string_lossy().contains("pulsefit.toml"));
        }
    }
}
