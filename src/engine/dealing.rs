use crate::domain::card::Card;
use crate::domain::deck;
use crate::engine::errors::EngineError;
use crate::engine::game_state::GameState;
use crate::engine::{BoardSource, RandomSource};

/// Источник борда для «живой» игры: каждая новая порция – свежий сэмпл
/// из колоды без известных карт (hole + board + `dead`).
pub struct SamplingDealer<'a, R: RandomSource> {
    rng: &'a mut R,
    /// Дополнительно исключённые карты (например, открытые карты соперника).
    dead: Vec<Card>,
}

impl<'a, R: RandomSource> SamplingDealer<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self {
            rng,
            dead: Vec::new(),
        }
    }

    pub fn with_dead_cards(mut self, dead: &[Card]) -> Self {
        self.dead.extend_from_slice(dead);
        self
    }
}

impl<R: RandomSource> BoardSource for SamplingDealer<'_, R> {
    fn deal(&mut self, state: &GameState, count: usize) -> Result<Vec<Card>, EngineError> {
        let mut known = state.known_cards();
        known.extend_from_slice(&self.dead);
        Ok(deck::sample(&known, count, &mut *self.rng)?)
    }
}

/// Фиксированный ран-аут: карты выдаются по позиции на борде.
///
/// Нужен тестам и реплею, где борд заранее известен целиком.
pub struct FixedBoard {
    pub cards: Vec<Card>,
}

impl BoardSource for FixedBoard {
    fn deal(&mut self, state: &GameState, count: usize) -> Result<Vec<Card>, EngineError> {
        let start = state.board().len();
        self.cards
            .get(start..start + count)
            .map(|s| s.to_vec())
            .ok_or(EngineError::Internal("фиксированный борд закончился"))
    }
}
