//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::{AiEngine, ControllerSettings, DEFAULT_AI_DELAY, Difficulty, Mark, Mode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Milliseconds the AI waits before answering.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// The human's mark in AI games. With `O` the AI opens.
    #[serde(default = "default_human_mark")]
    human_mark: Mark,

    /// Seed for reproducible easy and medium play.
    seed: Option<u64>,

    /// Mode to start in without asking.
    default_mode: Option<Mode>,

    /// Difficulty to use when the mode is `pvai`.
    default_difficulty: Option<Difficulty>,
}

fn default_ai_delay_ms() -> u64 {
    DEFAULT_AI_DELAY.as_millis() as u64
}

fn default_human_mark() -> Mark {
    Mark::X
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ai_delay_ms: default_ai_delay_ms(),
            human_mark: default_human_mark(),
            seed: None,
            default_mode: None,
            default_difficulty: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(
        mut self,
        seed: Option<u64>,
        delay_ms: Option<u64>,
        human_mark: Option<Mark>,
    ) -> Self {
        self.seed = seed.or(self.seed);
        self.ai_delay_ms = delay_ms.unwrap_or(self.ai_delay_ms);
        self.human_mark = human_mark.unwrap_or(self.human_mark);
        self
    }

    /// Controller settings derived from this config.
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings::new(Duration::from_millis(self.ai_delay_ms), self.human_mark)
    }

    /// An AI engine, seeded when a seed is configured.
    pub fn engine(&self) -> AiEngine {
        self.engine_with_offset(0)
    }

    /// An AI engine whose seed is shifted by `offset`, so several engines
    /// built from one config do not mirror each other.
    pub fn engine_with_offset(&self, offset: u64) -> AiEngine {
        match self.seed {
            Some(seed) => AiEngine::seeded(seed.wrapping_add(offset)),
            None => AiEngine::new(),
        }
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
