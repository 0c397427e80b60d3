use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::engine::{Action, EngineError, GameState, RandomSource};
use crate::eval::{evaluate_best_hand, HandCategory};

/// Политика действий в роллаутах и в узлах соперника.
///
/// Обе стороны в роллауте играют одной и той же политикой, каждая – по своим
/// картам (у соперника это карты из детерминизации).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RolloutPolicy {
    /// Почти всегда колл/чек, изредка рейз или фолд. Быстрая и слепая к картам.
    CallDominant {
        raise_probability: f64,
        fold_probability: f64,
    },
    /// Решение по грубой оценке силы руки и шансам банка.
    HandStrength {
        /// Ниже этой силы рука считается слабой.
        fold_threshold: f64,
        /// Выше этой силы рука считается сильной.
        raise_threshold: f64,
        /// Вероятность рейза с сильной рукой.
        raise_probability: f64,
        /// Вероятность блефа слабой рукой против ставки.
        bluff_probability: f64,
    },
}

impl Default for RolloutPolicy {
    fn default() -> Self {
        RolloutPolicy::HandStrength {
            fold_threshold: 0.3,
            raise_threshold: 0.7,
            raise_probability: 0.5,
            bluff_probability: 0.05,
        }
    }
}

impl RolloutPolicy {
    pub fn call_dominant() -> Self {
        RolloutPolicy::CallDominant {
            raise_probability: 0.1,
            fold_probability: 0.05,
        }
    }

    /// Проверка параметров: все вероятности и пороги в [0, 1].
    pub fn validate(&self) -> Result<(), String> {
        let probs: &[(&str, f64)] = match self {
            RolloutPolicy::CallDominant {
                raise_probability,
                fold_probability,
            } => {
                if raise_probability + fold_probability > 1.0 {
                    return Err("raise_probability + fold_probability > 1".into());
                }
                &[
                    ("raise_probability", *raise_probability),
                    ("fold_probability", *fold_probability),
                ]
            }
            RolloutPolicy::HandStrength {
                fold_threshold,
                raise_threshold,
                raise_probability,
                bluff_probability,
            } => {
                if fold_threshold > raise_threshold {
                    return Err("fold_threshold больше raise_threshold".into());
                }
                &[
                    ("fold_threshold", *fold_threshold),
                    ("raise_threshold", *raise_threshold),
                    ("raise_probability", *raise_probability),
                    ("bluff_probability", *bluff_probability),
                ]
            }
        };

        for (name, value) in probs {
            if !(0.0..=1.0).contains(value) {
                return Err(format!("{name} должен быть в [0, 1], получено {value}"));
            }
        }
        Ok(())
    }

    /// Выбрать одно из `legal` действий для игрока, чей ход в `state`.
    ///
    /// `hole` – карты этого игрока. Возвращаемое действие всегда из `legal`.
    pub fn choose<R: RandomSource>(
        &self,
        state: &GameState,
        hole: &[Card; 2],
        legal: &[Action],
        rng: &mut R,
    ) -> Result<Action, EngineError> {
        if legal.is_empty() {
            return Err(EngineError::HandFinished);
        }

        let facing_bet = !state.to_call().is_zero();
        let roll = rng.unit();

        let intent = match self {
            RolloutPolicy::CallDominant {
                raise_probability,
                fold_probability,
            } => {
                if facing_bet && roll < *fold_probability {
                    Intent::Fold
                } else if roll < fold_probability + raise_probability {
                    Intent::Raise
                } else {
                    Intent::Call
                }
            }
            RolloutPolicy::HandStrength {
                fold_threshold,
                raise_threshold,
                raise_probability,
                bluff_probability,
            } => {
                let strength = hand_strength(hole, state.board())?;
                let pot_odds = pot_odds(state);

                if strength >= *raise_threshold {
                    if roll < *raise_probability {
                        Intent::Raise
                    } else {
                        Intent::Call
                    }
                } else if !facing_bet {
                    Intent::Call
                } else if strength < *fold_threshold {
                    if roll < *bluff_probability {
                        Intent::Raise
                    } else {
                        Intent::Fold
                    }
                } else if strength < pot_odds {
                    Intent::Fold
                } else {
                    Intent::Call
                }
            }
        };

        Ok(intent.resolve(legal, rng))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Intent {
    Fold,
    Call,
    Raise,
}

impl Intent {
    fn resolve<R: RandomSource>(self, legal: &[Action], rng: &mut R) -> Action {
        match self {
            Intent::Fold if legal.contains(&Action::Fold) => Action::Fold,
            Intent::Raise => {
                let raises: Vec<Action> = legal
                    .iter()
                    .copied()
                    .filter(Action::is_aggressive)
                    .collect();
                if raises.is_empty() {
                    call_or_first(legal)
                } else {
                    raises[rng.below(raises.len())]
                }
            }
            _ => call_or_first(legal),
        }
    }
}

fn call_or_first(legal: &[Action]) -> Action {
    if legal.contains(&Action::Call) {
        Action::Call
    } else {
        legal[0]
    }
}

/// Доля банка, которую нужно вложить в колл: to_call / (pot + to_call).
pub fn pot_odds(state: &GameState) -> f64 {
    let to_call = state.to_call().as_f64();
    let total = state.pot().as_f64() + to_call;
    if total <= 0.0 {
        0.0
    } else {
        to_call / total
    }
}

/// Грубая сила руки в [0, 1].
///
/// Префлоп: пары, старшие карты, одномастность и связность.
/// Постфлоп: база по категории лучшей руки + небольшой бонус за старшую карту.
pub fn hand_strength(hole: &[Card; 2], board: &[Card]) -> Result<f64, EngineError> {
    if board.is_empty() {
        return Ok(preflop_strength(hole));
    }

    let rank = evaluate_best_hand(hole, board)?;
    let base = match rank.category() {
        HandCategory::HighCard => 0.10,
        HandCategory::OnePair => 0.25,
        HandCategory::TwoPair => 0.40,
        HandCategory::ThreeOfAKind => 0.55,
        HandCategory::Straight => 0.70,
        HandCategory::Flush => 0.75,
        HandCategory::FullHouse => 0.85,
        HandCategory::FourOfAKind => 0.95,
        HandCategory::StraightFlush => 0.99,
    };
    let top = rank.ranks().first().map_or(0, |r| r.value());
    let kicker_bonus = f64::from(top) / 14.0 * 0.1;

    Ok((base + kicker_bonus).min(1.0))
}

fn preflop_strength(hole: &[Card; 2]) -> f64 {
    let a = hole[0].rank.value();
    let b = hole[1].rank.value();
    let (high, low) = if a >= b { (a, b) } else { (b, a) };

    if high == low {
        // 22 ≈ 0.55, AA ≈ 1.0
        return 0.5 + f64::from(high) / 14.0 * 0.5;
    }

    let mut strength = f64::from(high + low) / 28.0 * 0.6;
    if hole[0].suit == hole[1].suit {
        strength += 0.06;
    }
    if high - low <= 2 {
        strength += 0.04;
    }
    strength.min(1.0)
}
