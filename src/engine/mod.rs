//! Игровое состояние heads-up раздачи: ставки, переход улиц, вскрытие.
//!
//! Высокоуровневый объект: `GameState`
//! Основные операции:
//!   - `legal_actions` – какие действия доступны тому, чей ход
//!   - `apply` – новое состояние после действия (с раздачей борда при смене улицы)
//!   - `settle` – расчёт банка в терминальном состоянии

pub mod actions;
pub mod betting;
pub mod dealing;
pub mod errors;
pub mod game_state;
pub mod pot;
pub mod validation;

pub use actions::{Action, ActionRecord, RaiseSizing};
pub use betting::BettingRound;
pub use dealing::{FixedBoard, SamplingDealer};
pub use errors::EngineError;
pub use game_state::{GameState, HandStatus, Settlement};
pub use pot::Pot;

use crate::domain::card::Card;

/// RNG интерфейс для движка и поиска.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    fn next_u64(&mut self) -> u64;

    /// Равномерно в [0, 1).
    fn unit(&mut self) -> f64;

    /// Равномерно в 0..upper, `upper > 0`.
    fn below(&mut self, upper: usize) -> usize;
}

/// Откуда берутся карты борда при смене улицы.
///
/// В поиске это детерминизация (заранее сэмплированный ран-аут),
/// в «живой» игре – `SamplingDealer` поверх Deck Sampler.
pub trait BoardSource {
    fn deal(&mut self, state: &GameState, count: usize) -> Result<Vec<Card>, EngineError>;
}
