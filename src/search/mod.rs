//! Поиск решения: детерминизации, роллауты, MCTS и политика выбора действия.
//!
//! Основной вход – `MctsEngine::search`, затем `decide` по статистике корня.

pub mod arena;
pub mod decision;
pub mod determinization;
pub mod equity;
pub mod errors;
pub mod mcts;
pub mod node;
pub mod policy;
pub mod rollout;

pub use decision::{decide, Decision, DecisionConfig};
pub use determinization::Determinization;
pub use equity::{estimate_equity, EquityEstimate};
pub use errors::SearchError;
pub use mcts::{MctsConfig, MctsEngine, RootAction, RootStats};
pub use node::{ActionStats, NodeId, SearchNode};
pub use policy::{hand_strength, RolloutPolicy};
pub use rollout::{rollout, Outcome, ValueMode};
