use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::deck::{self, CardMask};
use crate::engine::{EngineError, RandomSource};
use crate::eval::evaluate_best_hand;
use crate::search::errors::SearchError;

/// Итог Монте-Карло оценки эквити: сколько раз рука выиграла, поделила, проиграла.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquityEstimate {
    pub wins: u32,
    pub ties: u32,
    pub losses: u32,
}

impl EquityEstimate {
    pub fn samples(&self) -> u32 {
        self.wins + self.ties + self.losses
    }

    /// Доля банка в среднем: делёж считается за половину.
    pub fn equity(&self) -> f64 {
        let n = self.samples();
        if n == 0 {
            return 0.0;
        }
        (f64::from(self.wins) + 0.5 * f64::from(self.ties)) / f64::from(n)
    }

    /// Остаться в раздаче: эквити не хуже монетки.
    pub fn stays(&self) -> bool {
        self.equity() >= 0.5
    }
}

/// Эквити руки против случайной руки соперника.
///
/// В каждом сэмпле – новые карты соперника и добор борда до 5 карт.
pub fn estimate_equity<R: RandomSource>(
    hole: &[Card; 2],
    board: &[Card],
    samples: u32,
    rng: &mut R,
) -> Result<EquityEstimate, SearchError> {
    if board.len() > 5 {
        return Err(EngineError::InvalidState(format!(
            "на борде {} карт, максимум 5",
            board.len()
        ))
        .into());
    }
    let mut known = hole.to_vec();
    known.extend_from_slice(board);
    let mut seen = CardMask::EMPTY;
    for &card in &known {
        if !seen.insert(card) {
            return Err(EngineError::InvalidState(format!("карта {card} повторяется")).into());
        }
    }

    let missing = 5 - board.len();
    let mut estimate = EquityEstimate::default();
    let mut full_board = board.to_vec();

    for _ in 0..samples {
        let drawn = deck::sample(&known, 2 + missing, rng)?;
        full_board.truncate(board.len());
        full_board.extend_from_slice(&drawn[2..]);

        let ours = evaluate_best_hand(hole, &full_board)?;
        let theirs = evaluate_best_hand(&drawn[..2], &full_board)?;
        match ours.cmp(&theirs) {
            std::cmp::Ordering::Greater => estimate.wins += 1,
            std::cmp::Ordering::Equal => estimate.ties += 1,
            std::cmp::Ordering::Less => estimate.losses += 1,
        }
    }

    Ok(estimate)
}
