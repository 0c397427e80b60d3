//! Конфигурация бота: параметры поиска + политики решения.
//!
//! Формат – JSON. Все поля необязательны, отсутствующие берутся по умолчанию:
//!
//! ```json
//! { "mcts": { "iterations": 5000, "workers": 4 }, "decision": { "min_visits": 10 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::{DecisionConfig, MctsConfig, SearchError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось прочитать конфиг: {0}")]
    Io(#[from] std::io::Error),

    #[error("Некорректный JSON конфига: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Некорректное значение в конфиге: {0}")]
    Invalid(String),
}

impl From<SearchError> for ConfigError {
    fn from(err: SearchError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BotConfig {
    pub mcts: MctsConfig,
    pub decision: DecisionConfig,
}

impl BotConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: BotConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mcts.validate()?;
        self.decision.validate()?;
        Ok(())
    }

    /// Конфиг по умолчанию с заданными бюджетом и константой исследования.
    pub fn with_budget(iterations: usize, exploration_constant: f64) -> Self {
        let mut config = BotConfig::default();
        config.mcts.iterations = iterations;
        config.mcts.exploration_constant = exploration_constant;
        config
    }
}
