//! Experiment configuration
//!
//! Every value has a default matching the lab's deployed experiment, so an
//! empty (or missing) TOML file runs the standard 36-trial session.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::error::{BookError, Result};

/// Subject ID that routes results to the experimenter instead of the network
pub const DEBUG_SUBJECT: &str = "debug";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Number of test trials in a session
    ///
    /// Both catalogs must have at least this many entries.
    pub trial_count: usize,

    /// Session seed; a fresh random seed is drawn when absent
    pub seed: Option<u64>,

    /// Directory holding `<noun>.png`, `blank.png` and the UI chrome
    pub image_dir: PathBuf,

    /// Optional TOML catalog replacing the built-in item and trial lists
    pub catalog: Option<PathBuf>,

    /// Log destination (the terminal UI owns stdout/stderr)
    pub log_file: PathBuf,

    pub training: TrainingConfig,
    pub timing: TimingConfig,
    pub submit: SubmitConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            trial_count: 36,
            seed: None,
            image_dir: PathBuf::from("images"),
            catalog: None,
            log_file: PathBuf::from("book-or.log"),
            training: TrainingConfig::default(),
            timing: TimingConfig::default(),
            submit: SubmitConfig::default(),
        }
    }
}

/// Training mini-game parameters (canvas units)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub marker_count: usize,
    pub width: u32,
    pub height: u32,
    /// Minimum Manhattan distance between any two markers
    pub min_distance: u32,
    /// Rejection-sampling cap per marker
    pub max_placement_attempts: u32,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            marker_count: 5,
            width: 950,
            height: 550,
            min_distance: 200,
            max_placement_attempts: 10_000,
        }
    }
}

/// Pacing delays, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Applied twice after the last marker: hide training, then start trials
    pub training_exit_ms: u64,
    /// Selection highlight stays visible this long
    pub feedback_ms: u64,
    /// Empty stage between trials
    pub inter_trial_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            training_exit_ms: 500,
            feedback_ms: 1000,
            inter_trial_ms: 1000,
        }
    }
}

impl TimingConfig {
    /// No pacing at all; used by headless runs and tests
    pub fn immediate() -> Self {
        Self {
            training_exit_ms: 0,
            feedback_ms: 0,
            inter_trial_ms: 0,
        }
    }

    pub fn training_exit(&self) -> Duration {
        Duration::from_millis(self.training_exit_ms)
    }

    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }

    pub fn inter_trial(&self) -> Duration {
        Duration::from_millis(self.inter_trial_ms)
    }
}

/// Result collector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    pub endpoint: String,
    /// Form field carrying the result line
    pub field: String,
    /// Upper bound on waiting for in-flight posts at shutdown
    pub drain_timeout_ms: u64,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://langcog.stanford.edu/cgi-bin/AEN/book-or/book-or_process.php"
                .into(),
            field: "postresult_string".into(),
            drain_timeout_ms: 3000,
        }
    }
}

impl SubmitConfig {
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }
}

impl ExperimentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.trial_count == 0 {
            return Err(BookError::InvalidConfig("trial_count must be positive".into()));
        }

        let t = &self.training;
        if t.marker_count == 0 {
            return Err(BookError::InvalidConfig("training.marker_count must be positive".into()));
        }
        if t.width == 0 || t.height == 0 {
            return Err(BookError::InvalidConfig(format!(
                "training region {}x{} is empty",
                t.width, t.height
            )));
        }
        // Two markers can never be further apart than the region's diagonal
        let span = u64::from(t.width) + u64::from(t.height) - 2;
        if t.marker_count > 1 && u64::from(t.min_distance) > span {
            return Err(BookError::InvalidConfig(format!(
                "training.min_distance ({}) exceeds the region's span ({})",
                t.min_distance, span
            )));
        }
        if t.max_placement_attempts == 0 {
            return Err(BookError::InvalidConfig(
                "training.max_placement_attempts must be positive".into(),
            ));
        }

        if self.submit.endpoint.trim().is_empty() {
            return Err(BookError::InvalidConfig("submit.endpoint is empty".into()));
        }
        if self.submit.field.trim().is_empty() {
            return Err(BookError::InvalidConfig("submit.field is empty".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExperimentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.trial_count, 36);
        assert_eq!(config.training.marker_count, 5);
        assert_eq!(config.training.min_distance, 200);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ExperimentConfig::from_toml(
            r#"
            trial_count = 12
            seed = 7

            [timing]
            feedback_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.trial_count, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.timing.feedback_ms, 250);
        assert_eq!(config.timing.inter_trial_ms, 1000);
        assert_eq!(config.submit.field, "postresult_string");
    }

    #[test]
    fn test_rejects_unsatisfiable_marker_spacing() {
        let mut config = ExperimentConfig::default();
        config.training.width = 100;
        config.training.height = 100;
        assert!(matches!(config.validate(), Err(BookError::InvalidConfig(_))));
    }

    #[test]
    fn test_huge_region_does_not_overflow() {
        let config = ExperimentConfig::from_toml("[training]\nwidth = 4294967295\nheight = 10\n").unwrap();
        assert_eq!(config.training.width, u32::MAX);

        let mut config = ExperimentConfig::default();
        config.training.width = u32::MAX;
        config.training.height = u32::MAX;
        config.training.min_distance = u32::MAX;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_trials() {
        let result = ExperimentConfig::from_toml("trial_count = 0");
        assert!(matches!(result, Err(BookError::InvalidConfig(_))));
    }
}
