//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate(cards) -> HandRank` – 5..7 карт, лучшая 5-карточная комбинация;
//!   `compare_hands(a, b) -> Ordering` – кто сильнее на шоудауне.

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{compare_hands, evaluate, evaluate_best_hand, EvalError};
pub use hand_rank::{describe_hand, HandCategory};
