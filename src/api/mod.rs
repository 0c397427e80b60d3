//! Внешний API бота.
//!
//! - `decide_action` – одно решение с бюджетом и константой исследования;
//! - `PokerBot` – решения по полному `BotConfig` с подробным отчётом;
//! - DTO (dto.rs) – сериализуемый вид отчёта;
//! - ошибки (errors.rs) – то, что видит вызывающий код.

pub mod dto;
pub mod errors;

pub use dto::*;
pub use errors::*;

use crate::config::BotConfig;
use crate::engine::{GameState, RandomSource};
use crate::infra::{global_fork, DeterministicRng};
use crate::search::{decide, Decision, MctsEngine};

/// Решение для текущей точки раздачи.
///
/// Ошибка `InvalidState`, если раздача уже закончена, и `InvalidConfig`,
/// если `iteration_budget == 0`.
pub fn decide_action(
    state: &GameState,
    iteration_budget: usize,
    exploration_constant: f64,
) -> Result<Decision, BotError> {
    if iteration_budget == 0 {
        return Err(BotError::InvalidConfig(
            "бюджет итераций должен быть положительным".into(),
        ));
    }
    let bot = PokerBot::new(BotConfig::with_budget(iteration_budget, exploration_constant))?;
    let report = bot.decide(state)?;

    Ok(Decision {
        action: report.action,
        win_probability: report.win_probability,
        expected_value: report.expected_value,
        pot_odds: report.pot_odds,
        pot_odds_override: report.pot_odds_override,
    })
}

/// Бот с фиксированной конфигурацией. Между решениями ничего не хранит.
pub struct PokerBot {
    config: BotConfig,
    engine: MctsEngine,
}

impl PokerBot {
    pub fn new(config: BotConfig) -> Result<Self, BotError> {
        config
            .validate()
            .map_err(|e| BotError::InvalidConfig(e.to_string()))?;
        let engine = MctsEngine::new(config.mcts.clone())?;
        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Решение на процессном RNG (или на `mcts.seed`, если он задан).
    pub fn decide(&self, state: &GameState) -> Result<DecisionReport, BotError> {
        let mut rng = match self.config.mcts.seed {
            Some(seed) => DeterministicRng::from_seed(seed),
            None => global_fork(),
        };
        self.decide_with_rng(state, &mut rng)
    }

    pub fn decide_with_rng<R: RandomSource>(
        &self,
        state: &GameState,
        rng: &mut R,
    ) -> Result<DecisionReport, BotError> {
        if state.is_terminal() {
            return Err(BotError::InvalidState("раздача уже завершена".into()));
        }

        let stats = self.engine.search(state, rng)?;
        let decision = decide(&stats, &self.config.decision)?;

        log::info!(
            "{} [{}]: {} (winProbability {:.3}, итераций {})",
            state.street(),
            state
                .hole_cards()
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            decision.action,
            decision.win_probability,
            stats.iterations
        );

        Ok(DecisionReport {
            action: decision.action,
            win_probability: decision.win_probability,
            expected_value: decision.expected_value,
            pot_odds: decision.pot_odds,
            pot_odds_override: decision.pot_odds_override,
            actions: stats.actions,
            iterations: stats.iterations,
            node_count: stats.node_count,
            elapsed_ms: stats.elapsed_ms,
        })
    }
}
