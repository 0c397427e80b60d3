use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::engine::{Action, GameState};
use crate::search::RootAction;

/// Полный отчёт о решении: действие + то, на чём оно основано.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DecisionReport {
    pub action: Action,
    pub win_probability: f64,
    pub expected_value: f64,
    pub pot_odds: f64,
    pub pot_odds_override: bool,
    /// Статистика всех действий корня.
    pub actions: Vec<RootAction>,
    /// Сколько итераций реально выполнено.
    pub iterations: usize,
    pub node_count: usize,
    pub elapsed_ms: u64,
}

/// DTO одного действия корня.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActionStatsDto {
    /// "fold", "call", "raise 40".
    pub action: String,
    pub visits: u32,
    pub mean_value: f64,
}

/// DTO решения для логов и внешнего вывода.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DecisionDto {
    pub street: Street,
    pub hole_cards: Vec<Card>,
    pub board: Vec<Card>,
    pub pot: Chips,
    pub to_call: Chips,
    pub action: String,
    pub win_probability: f64,
    pub pot_odds_override: bool,
    pub iterations: usize,
    pub actions: Vec<ActionStatsDto>,
}

impl DecisionDto {
    /// Отчёт + точка решения, для которой он посчитан.
    pub fn from_report(report: &DecisionReport, state: &GameState) -> Self {
        Self {
            street: state.street(),
            hole_cards: state.hole_cards().to_vec(),
            board: state.board().to_vec(),
            pot: state.pot(),
            to_call: state.to_call(),
            action: report.action.to_string(),
            win_probability: report.win_probability,
            pot_odds_override: report.pot_odds_override,
            iterations: report.iterations,
            actions: report
                .actions
                .iter()
                .map(|a| ActionStatsDto {
                    action: a.action.to_string(),
                    visits: a.visits,
                    mean_value: a.mean_value,
                })
                .collect(),
        }
    }
}
