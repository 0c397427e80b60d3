use thiserror::Error;

use crate::domain::deck::DeckError;
use crate::engine::actions::Action;
use crate::eval::EvalError;

/// Ошибки игрового состояния и применения действий.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Некорректное состояние раздачи: {0}")]
    InvalidState(String),

    #[error("Раздача уже завершена")]
    HandFinished,

    #[error("Раздача ещё не завершена – расчёт невозможен")]
    NotTerminal,

    #[error("Недопустимое действие {action}: {reason}")]
    IllegalAction { action: Action, reason: &'static str },

    #[error("Недостаточно фишек для этой ставки")]
    NotEnoughChips,

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}
