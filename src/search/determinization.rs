use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::deck::{self, CardMask, DeckError};
use crate::domain::player::Seat;
use crate::engine::{BoardSource, EngineError, GameState, RandomSource};
use crate::eval::{evaluate_best_hand, EvalError};

/// Одна конкретная версия скрытой информации: карты соперника +
/// все недоданные карты борда до ривера.
///
/// Живёт ровно одну итерацию поиска. Карты борда выдаются по позиции
/// (`board.len()` минус длина борда в корне), поэтому на любой глубине
/// дерева и в роллауте одна и та же детерминизация даёт один и тот же борд.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Determinization {
    opponent_hole: [Card; 2],
    runout: Vec<Card>,
    base_board_len: usize,
}

impl Determinization {
    /// Сэмплировать скрытые карты, согласованные с известными картами `root`.
    pub fn sample<R: RandomSource>(root: &GameState, rng: &mut R) -> Result<Self, DeckError> {
        let known = root.known_cards();
        let missing = 5 - root.board().len();
        let cards = deck::sample(&known, 2 + missing, rng)?;

        Ok(Self {
            opponent_hole: [cards[0], cards[1]],
            runout: cards[2..].to_vec(),
            base_board_len: root.board().len(),
        })
    }

    /// Явная детерминизация (тесты, реплей). Проверяет пересечения
    /// с известными картами `root` и длину ран-аута.
    pub fn fixed(
        root: &GameState,
        opponent_hole: [Card; 2],
        runout: Vec<Card>,
    ) -> Result<Self, EngineError> {
        if root.board().len() + runout.len() != 5 {
            return Err(EngineError::InvalidState(format!(
                "ран-аут из {} карт не дополняет борд из {} карт до 5",
                runout.len(),
                root.board().len()
            )));
        }
        let mut seen = CardMask::from_cards(&root.known_cards());
        for &card in opponent_hole.iter().chain(runout.iter()) {
            if !seen.insert(card) {
                return Err(EngineError::InvalidState(format!(
                    "карта {card} уже известна"
                )));
            }
        }
        Ok(Self {
            opponent_hole,
            runout,
            base_board_len: root.board().len(),
        })
    }

    pub fn opponent_hole(&self) -> &[Card; 2] {
        &self.opponent_hole
    }

    pub fn runout(&self) -> &[Card] {
        &self.runout
    }

    /// Карты на руках у места: у бота – из состояния, у соперника – из детерминизации.
    pub fn hole_for(&self, seat: Seat, state: &GameState) -> [Card; 2] {
        match seat {
            Seat::Bot => *state.hole_cards(),
            Seat::Opponent => self.opponent_hole,
        }
    }

    /// Полный борд из 5 карт: корневой борд + ран-аут.
    pub fn full_board(&self, root: &GameState) -> Vec<Card> {
        let mut board = root.board().to_vec();
        board.extend_from_slice(&self.runout);
        board
    }

    /// Эквити бота против карт соперника на полном борде: 1 / ½ / 0.
    pub fn bot_equity(&self, root: &GameState) -> Result<f64, EvalError> {
        let board = self.full_board(root);
        let bot = evaluate_best_hand(root.hole_cards(), &board)?;
        let opp = evaluate_best_hand(&self.opponent_hole, &board)?;
        Ok(match bot.cmp(&opp) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Equal => 0.5,
            std::cmp::Ordering::Less => 0.0,
        })
    }
}

impl BoardSource for Determinization {
    fn deal(&mut self, state: &GameState, count: usize) -> Result<Vec<Card>, EngineError> {
        let start = state
            .board()
            .len()
            .checked_sub(self.base_board_len)
            .ok_or(EngineError::Internal("борд короче, чем в корне детерминизации"))?;
        self.runout
            .get(start..start + count)
            .map(|cards| cards.to_vec())
            .ok_or(EngineError::Internal("ран-аут детерминизации исчерпан"))
    }
}
