use serde::{Deserialize, Serialize};

use crate::engine::Action;
use crate::search::errors::SearchError;
use crate::search::mcts::{RootAction, RootStats};

/// Параметры превращения статистики корня в действие.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecisionConfig {
    /// Минимальная доля посещений корня, чтобы действие рассматривалось.
    pub min_visit_share: f64,
    /// Минимальное абсолютное число посещений.
    pub min_visits: u32,
    /// Фолд, если эквити ниже шансов банка.
    pub pot_odds_floor: bool,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            min_visit_share: 0.05,
            min_visits: 5,
            pot_odds_floor: true,
        }
    }
}

impl DecisionConfig {
    pub fn validate(&self) -> Result<(), SearchError> {
        if !(0.0..=1.0).contains(&self.min_visit_share) {
            return Err(SearchError::InvalidConfig(format!(
                "min_visit_share должен быть в [0, 1], получено {}",
                self.min_visit_share
            )));
        }
        Ok(())
    }

    /// Порог посещений для данного числа посещений корня.
    ///
    /// Порог включительный: действие с ровно `visit_threshold` посещениями
    /// уже рассматривается.
    pub fn visit_threshold(&self, total_visits: u32) -> u32 {
        let by_share = (self.min_visit_share * f64::from(total_visits)).ceil() as u32;
        self.min_visits.max(by_share)
    }
}

/// Итог решения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Decision {
    pub action: Action,
    /// Оценка вероятности выигрыша, [0, 1].
    pub win_probability: f64,
    /// Средняя ценность действия, которое предпочёл поиск.
    pub expected_value: f64,
    /// Безубыточная эквити колла в корне.
    pub pot_odds: f64,
    /// Действие поиска было заменено фолдом из-за шансов банка.
    pub pot_odds_override: bool,
}

/// Выбор действия по статистике корня.
///
/// Когда доплачивать нечего, фолд не рассматривается: бесплатный чек
/// никогда не хуже сброса карт.
pub fn decide(stats: &RootStats, config: &DecisionConfig) -> Result<Decision, SearchError> {
    let free_check = stats.to_call.is_zero();
    let playable: Vec<&RootAction> = stats
        .actions
        .iter()
        .filter(|a| !(free_check && a.action == Action::Fold))
        .collect();
    if playable.is_empty() {
        return Err(SearchError::Internal("у корня нет действий"));
    }

    let threshold = config.visit_threshold(stats.total_visits());
    let mut candidates: Vec<&RootAction> = playable
        .iter()
        .copied()
        .filter(|a| a.visits >= threshold)
        .collect();

    // Маленький бюджет: порог никто не прошёл, берём самые посещаемые.
    if candidates.is_empty() {
        let max_visits = playable.iter().map(|a| a.visits).max().unwrap_or(0);
        candidates = playable
            .into_iter()
            .filter(|a| a.visits == max_visits)
            .collect();
    }

    let best = candidates
        .into_iter()
        .reduce(|best, a| {
            if a.mean_value > best.mean_value
                || (a.mean_value == best.mean_value && a.visits > best.visits)
            {
                a
            } else {
                best
            }
        })
        .ok_or(SearchError::Internal("нет кандидатов для решения"))?;

    let pot_odds = stats.pot_odds();
    let mut action = best.action;
    let mut pot_odds_override = false;

    if config.pot_odds_floor
        && action != Action::Fold
        && !stats.to_call.is_zero()
        && stats.win_probability < pot_odds
    {
        log::warn!(
            "шансы банка перевешивают поиск: {} -> fold (эквити {:.3} < {:.3})",
            action,
            stats.win_probability,
            pot_odds
        );
        action = Action::Fold;
        pot_odds_override = true;
    }

    Ok(Decision {
        action,
        win_probability: stats.win_probability,
        expected_value: best.mean_value,
        pot_odds,
        pot_odds_override,
    })
}
