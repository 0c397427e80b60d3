//! Heads-up Texas Hold'em бот на Monte Carlo Tree Search.
//!
//! Внешний код собирает `GameState` для точки решения и вызывает
//! `decide_action` (или `PokerBot::decide`), получая действие и
//! оценку вероятности выигрыша.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod search;

pub use api::{decide_action, BotError, DecisionDto, DecisionReport, PokerBot};
pub use config::{BotConfig, ConfigError};
pub use domain::{parse_cards, Card, Chips, Rank, Seat, Street, Suit};
pub use engine::{Action, GameState, RaiseSizing};
pub use search::{Decision, DecisionConfig, MctsConfig, RolloutPolicy, ValueMode};
