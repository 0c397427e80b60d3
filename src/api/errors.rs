use thiserror::Error;

use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::search::SearchError;

/// Ошибки, которые видит внешний вызывающий код.
///
/// `InvalidState` и `InvalidConfig` означают неправильный вход: повторять
/// вызов без исправления бессмысленно.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Некорректное состояние раздачи: {0}")]
    InvalidState(String),

    #[error("Некорректная конфигурация: {0}")]
    InvalidConfig(String),

    #[error("Поиск прерван: {0}")]
    Search(SearchError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<SearchError> for BotError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::TerminalState | SearchError::NotBotsTurn => {
                BotError::InvalidState(err.to_string())
            }
            SearchError::InvalidConfig(msg) => BotError::InvalidConfig(msg),
            other => BotError::Search(other),
        }
    }
}

impl From<EngineError> for BotError {
    fn from(err: EngineError) -> Self {
        BotError::InvalidState(err.to_string())
    }
}
