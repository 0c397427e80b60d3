use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::player::Seat;
use crate::engine::{Action, GameState, RaiseSizing, RandomSource};

pub type NodeId = u32;

/// Накопленная статистика одного действия в узле.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ActionStats {
    pub visits: u32,
    pub total_value: f64,
}

impl ActionStats {
    /// Средняя ценность; 0 для непосещённого действия.
    pub fn mean(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_value / f64::from(self.visits)
        }
    }

    pub fn record(&mut self, value: f64) {
        self.visits += 1;
        self.total_value += value;
    }
}

/// Ребро к ребёнку. Один и тот же индекс действия может вести к разным
/// детям, если при смене улицы в разных детерминизациях открылись разные карты.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildEdge {
    pub action_idx: usize,
    pub dealt: Vec<Card>,
    pub node: NodeId,
}

/// Узел дерева поиска.
///
/// В узлах бота действия раскрываются по одному (`untried`), затем выбираются
/// по UCB1. В узлах соперника действие каждый раз выбирает политика роллаута,
/// поэтому `untried` там пуст с самого начала.
#[derive(Clone, Debug)]
pub struct SearchNode {
    pub state: GameState,
    pub parent: Option<NodeId>,
    pub actions: Vec<Action>,
    pub stats: Vec<ActionStats>,
    pub untried: Vec<usize>,
    pub children: Vec<ChildEdge>,
    /// Сколько итераций прошло через узел.
    pub visits: u32,
}

impl SearchNode {
    pub fn new(state: GameState, parent: Option<NodeId>, sizing: &RaiseSizing) -> Self {
        let actions = state.legal_actions(sizing);
        let untried = if !state.is_terminal() && state.to_act() == Seat::Bot {
            (0..actions.len()).collect()
        } else {
            Vec::new()
        };

        Self {
            stats: vec![ActionStats::default(); actions.len()],
            state,
            parent,
            actions,
            untried,
            children: Vec::new(),
            visits: 0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Забрать случайное ещё не опробованное действие.
    pub fn take_untried<R: RandomSource>(&mut self, rng: &mut R) -> Option<usize> {
        if self.untried.is_empty() {
            return None;
        }
        let pick = rng.below(self.untried.len());
        Some(self.untried.swap_remove(pick))
    }

    /// UCB1: mean + c * sqrt(ln N / n).
    ///
    /// При равенстве счёта выигрывает действие с меньшим числом посещений
    /// (затем – меньший индекс). Непосещённые действия не рассматриваются.
    pub fn select_ucb(&self, exploration: f64) -> Option<usize> {
        let parent_visits: u32 = self.stats.iter().map(|s| s.visits).sum();
        if parent_visits == 0 {
            return None;
        }
        let ln_n = f64::from(parent_visits).ln();

        let mut best: Option<(usize, f64, u32)> = None;
        for (idx, stats) in self.stats.iter().enumerate() {
            if stats.visits == 0 {
                continue;
            }
            let score = stats.mean() + exploration * (ln_n / f64::from(stats.visits)).sqrt();
            let better = match best {
                None => true,
                Some((_, best_score, best_visits)) => {
                    score > best_score || (score == best_score && stats.visits < best_visits)
                }
            };
            if better {
                best = Some((idx, score, stats.visits));
            }
        }
        best.map(|(idx, _, _)| idx)
    }

    /// Ребёнок для (действие, открытые карты), если он уже есть.
    pub fn child(&self, action_idx: usize, dealt: &[Card]) -> Option<NodeId> {
        self.children
            .iter()
            .find(|edge| edge.action_idx == action_idx && edge.dealt == dealt)
            .map(|edge| edge.node)
    }

    pub fn add_child(&mut self, action_idx: usize, dealt: Vec<Card>, node: NodeId) {
        self.children.push(ChildEdge {
            action_idx,
            dealt,
            node,
        });
    }

    /// Обратное распространение через этот узел по действию `action_idx`.
    pub fn record(&mut self, action_idx: usize, value: f64) {
        self.visits += 1;
        if let Some(stats) = self.stats.get_mut(action_idx) {
            stats.record(value);
        }
    }
}
