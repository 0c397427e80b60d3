use thiserror::Error;

use crate::domain::deck::DeckError;
use crate::engine::EngineError;
use crate::eval::EvalError;

/// Ошибки поиска. Любая ошибка внутри итерации обрывает весь поиск:
/// частично посчитанная статистика с такой ошибкой не возвращается.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("Некорректная конфигурация поиска: {0}")]
    InvalidConfig(String),

    #[error("Поиск из терминального состояния невозможен")]
    TerminalState,

    #[error("Сейчас ход соперника, решение бота не требуется")]
    NotBotsTurn,

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("Внутренняя ошибка поиска: {0}")]
    Internal(&'static str),
}
