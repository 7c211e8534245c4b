//! Generator configuration.

use crate::cli::GenerateArgs;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tictactoe_oracle::{DatasetOptions, RecordLayout, StateFilter, Strategy};
use tracing::{debug, info, instrument};

/// Settings for a `generate` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Output file; derived from `states` when absent.
    #[serde(default)]
    output: Option<PathBuf>,

    /// How legal boards are found.
    #[serde(default)]
    strategy: Strategy,

    /// Which positions are written.
    #[serde(default)]
    states: StateFilter,

    /// Fields per record.
    #[serde(default)]
    layout: RecordLayout,

    /// Solve one subtree per opening move in parallel.
    #[serde(default)]
    parallel: bool,
}

impl GeneratorConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(strategy = %config.strategy, states = %config.states, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file named by `--config`, if any, then applies the other flags.
    #[instrument(skip(args))]
    pub fn resolve(args: &GenerateArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(args);
        Ok(config)
    }

    /// Overrides file values with any flag that was given.
    pub fn apply(&mut self, args: &GenerateArgs) {
        if let Some(output) = &args.output {
            self.output = Some(output.clone());
        }
        if let Some(strategy) = args.strategy {
            self.strategy = strategy;
        }
        if let Some(states) = args.states {
            self.states = states;
        }
        if let Some(layout) = args.layout {
            self.layout = layout;
        }
        self.parallel |= args.parallel;
    }

    /// Where the dataset is written.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.states.default_file_name()))
    }

    /// Emission settings for the dataset writer.
    pub fn dataset_options(&self) -> DatasetOptions {
        DatasetOptions::new(self.layout, self.states)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
