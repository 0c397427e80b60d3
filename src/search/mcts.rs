//! MCTS поверх детерминизаций скрытой информации.
//!
//! Каждая итерация:
//!   1. selection – спуск по дереву (UCB1 в узлах бота, политика в узлах соперника);
//!   2. expansion – первое неопробованное действие превращается в нового ребёнка;
//!   3. simulation – роллаут из нового узла;
//!   4. backpropagation – ценность добавляется к действиям на пути к корню.
//!
//! Одна детерминизация на итерацию, сэмплируется лениво (при первой
//! необходимости в скрытых картах) и используется до конца итерации.
//! Ценность всегда с точки зрения бота, между уровнями не инвертируется:
//! соперник – часть среды, а не минимаксный противник.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::DeckError;
use crate::domain::player::Seat;
use crate::engine::{Action, BoardSource, EngineError, GameState, RaiseSizing, RandomSource};
use crate::infra::DeterministicRng;
use crate::search::arena::Arena;
use crate::search::determinization::Determinization;
use crate::search::errors::SearchError;
use crate::search::node::{ActionStats, NodeId, SearchNode};
use crate::search::policy::RolloutPolicy;
use crate::search::rollout::{rollout, ValueMode};

/// Параметры одного поиска.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MctsConfig {
    /// Бюджет итераций.
    pub iterations: usize,
    /// Константа исследования `c` в UCB1.
    pub exploration_constant: f64,
    /// Число параллельных воркеров над одним деревом.
    pub workers: usize,
    /// Ограничение по времени; проверяется только между итерациями.
    pub time_limit_ms: Option<u64>,
    pub value_mode: ValueMode,
    pub raise_sizing: RaiseSizing,
    pub rollout: RolloutPolicy,
    /// Фиксированный seed для воспроизводимых решений.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 2000,
            exploration_constant: std::f64::consts::SQRT_2,
            workers: 1,
            time_limit_ms: None,
            value_mode: ValueMode::default(),
            raise_sizing: RaiseSizing::default(),
            rollout: RolloutPolicy::default(),
            seed: None,
        }
    }
}

impl MctsConfig {
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.iterations == 0 {
            return Err(SearchError::InvalidConfig(
                "iterations должен быть > 0".into(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration_constant должен быть конечным и >= 0, получено {}",
                self.exploration_constant
            )));
        }
        if self.workers == 0 {
            return Err(SearchError::InvalidConfig("workers должен быть > 0".into()));
        }
        if self
            .raise_sizing
            .pot_fractions
            .iter()
            .any(|f| !f.is_finite() || *f <= 0.0)
        {
            return Err(SearchError::InvalidConfig(
                "raise_sizing.pot_fractions должны быть конечными и > 0".into(),
            ));
        }
        self.rollout
            .validate()
            .map_err(|e| SearchError::InvalidConfig(format!("rollout: {e}")))?;
        Ok(())
    }
}

/// Итоговая статистика одного действия корня.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RootAction {
    pub action: Action,
    pub visits: u32,
    pub total_value: f64,
    pub mean_value: f64,
}

impl RootAction {
    pub fn new(action: Action, stats: ActionStats) -> Self {
        Self {
            action,
            visits: stats.visits,
            total_value: stats.total_value,
            mean_value: stats.mean(),
        }
    }
}

/// Всё, что поиск знает о корне после завершения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RootStats {
    pub actions: Vec<RootAction>,
    /// Сколько итераций реально выполнено (может быть меньше бюджета по таймауту).
    pub iterations: usize,
    /// Средняя эквити бота на вскрытии по всем детерминизациям.
    pub win_probability: f64,
    pub pot: Chips,
    pub to_call: Chips,
    pub node_count: usize,
    pub elapsed_ms: u64,
}

impl RootStats {
    pub fn total_visits(&self) -> u32 {
        self.actions.iter().map(|a| a.visits).sum()
    }

    /// Безубыточная эквити колла: to_call / (pot + to_call).
    pub fn pot_odds(&self) -> f64 {
        let to_call = self.to_call.as_f64();
        let total = self.pot.as_f64() + to_call;
        if total <= 0.0 {
            0.0
        } else {
            to_call / total
        }
    }

    pub fn get(&self, action: &Action) -> Option<&RootAction> {
        self.actions.iter().find(|a| a.action == *action)
    }
}

pub struct MctsEngine {
    config: MctsConfig,
}

impl MctsEngine {
    pub fn new(config: MctsConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Построить дерево из `root` и вернуть статистику корня.
    ///
    /// `rng` используется только для сидирования воркеров: каждый воркер
    /// получает собственный `DeterministicRng`. С одним воркером и
    /// детерминированным `rng` результат воспроизводим.
    pub fn search<R: RandomSource>(
        &self,
        root: &GameState,
        rng: &mut R,
    ) -> Result<RootStats, SearchError> {
        if root.is_terminal() {
            return Err(SearchError::TerminalState);
        }
        if root.to_act() != Seat::Bot {
            return Err(SearchError::NotBotsTurn);
        }

        let started = Instant::now();
        let tree = SearchTree::new(root, &self.config, started)?;
        let seeds: Vec<u64> = (0..self.config.workers).map(|_| rng.next_u64()).collect();

        if seeds.len() == 1 {
            self.run_worker(&tree, seeds[0])?;
        } else {
            seeds
                .into_par_iter()
                .map(|seed| self.run_worker(&tree, seed))
                .collect::<Result<Vec<()>, SearchError>>()?;
        }

        let stats = tree.root_stats(started)?;
        log::debug!(
            "MCTS: {} итераций, {} узлов, {} мс, winProbability = {:.3}",
            stats.iterations,
            stats.node_count,
            stats.elapsed_ms,
            stats.win_probability
        );
        Ok(stats)
    }

    fn run_worker(&self, tree: &SearchTree<'_>, seed: u64) -> Result<(), SearchError> {
        let mut ctx = IterationContext {
            rng: DeterministicRng::from_seed(seed),
            det: None,
        };

        loop {
            if tree.abort.load(Ordering::Relaxed) || tree.out_of_time() {
                return Ok(());
            }
            if tree.claimed.fetch_add(1, Ordering::Relaxed) >= self.config.iterations {
                return Ok(());
            }

            ctx.det = None;
            if let Err(e) = self.iterate(tree, &mut ctx) {
                tree.abort.store(true, Ordering::Relaxed);
                return Err(e);
            }
            tree.completed.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn iterate(
        &self,
        tree: &SearchTree<'_>,
        ctx: &mut IterationContext,
    ) -> Result<(), SearchError> {
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut node_id = tree.root_id;

        let leaf_id = loop {
            let step = tree
                .arena
                .with_node(node_id, |node| self.descend(tree, node_id, node, ctx))??;
            match step {
                Step::Leaf => break node_id,
                Step::Child {
                    action_idx,
                    child,
                    created,
                } => {
                    path.push((node_id, action_idx));
                    node_id = child;
                    if created {
                        break child;
                    }
                }
            }
        };

        let leaf_state = tree.arena.with_node(leaf_id, |node| node.state.clone())?;
        let mut det = ctx.determinization(tree.root)?.clone();
        let outcome = rollout(
            &leaf_state,
            &mut det,
            &self.config.rollout,
            &self.config.raise_sizing,
            &mut ctx.rng,
        )?;
        let value = self
            .config
            .value_mode
            .value(&outcome, tree.root.bot_stack(), tree.scale);

        tree.arena.with_node(leaf_id, |node| node.visits += 1)?;
        for &(id, action_idx) in path.iter().rev() {
            tree.arena.with_node(id, |node| node.record(action_idx, value))?;
        }

        let equity = det.bot_equity(tree.root)?;
        tree.equity_halves
            .fetch_add((equity * 2.0).round() as u64, Ordering::Relaxed);

        log::trace!(
            "итерация: глубина {}, ходов в роллауте {}, ценность {:.3}, эквити {}",
            path.len(),
            outcome.steps,
            value,
            equity
        );
        Ok(())
    }

    /// Один шаг спуска под блокировкой узла `node`.
    fn descend(
        &self,
        tree: &SearchTree<'_>,
        node_id: NodeId,
        node: &mut SearchNode,
        ctx: &mut IterationContext,
    ) -> Result<Step, SearchError> {
        if node.is_terminal() {
            return Ok(Step::Leaf);
        }

        let action_idx = match node.state.to_act() {
            Seat::Bot => match node.take_untried(&mut ctx.rng) {
                Some(idx) => idx,
                // Все действия уже разобраны другими воркерами, но ещё не
                // получили ценность: идём по случайному.
                None => match node.select_ucb(self.config.exploration_constant) {
                    Some(idx) => idx,
                    None if !node.actions.is_empty() => ctx.rng.below(node.actions.len()),
                    None => return Err(SearchError::Internal("узел бота без действий")),
                },
            },
            Seat::Opponent => {
                let hole = *ctx.determinization(tree.root)?.opponent_hole();
                let action =
                    self.config
                        .rollout
                        .choose(&node.state, &hole, &node.actions, &mut ctx.rng)?;
                node.actions
                    .iter()
                    .position(|a| *a == action)
                    .ok_or(SearchError::Internal("политика выбрала нелегальное действие"))?
            }
        };

        let action = node.actions[action_idx];
        let next = node.state.apply(
            &action,
            &mut LazyDealer {
                ctx,
                root: tree.root,
            },
        )?;
        let dealt: Vec<Card> = next.board()[node.state.board().len()..].to_vec();

        if let Some(child) = node.child(action_idx, &dealt) {
            return Ok(Step::Child {
                action_idx,
                child,
                created: false,
            });
        }

        let child = tree.arena.push(SearchNode::new(
            next,
            Some(node_id),
            &self.config.raise_sizing,
        ))?;
        node.add_child(action_idx, dealt, child);
        Ok(Step::Child {
            action_idx,
            child,
            created: true,
        })
    }
}

enum Step {
    Leaf,
    Child {
        action_idx: usize,
        child: NodeId,
        created: bool,
    },
}

/// Дерево одного поиска и общие счётчики воркеров.
struct SearchTree<'a> {
    root: &'a GameState,
    root_id: NodeId,
    arena: Arena,
    /// Нормировка ChipDelta: pot + to_call корня.
    scale: f64,
    claimed: AtomicUsize,
    completed: AtomicUsize,
    /// Сумма эквити в половинках (выигрыш = 2, делёж = 1).
    equity_halves: AtomicU64,
    abort: AtomicBool,
    deadline: Option<Instant>,
}

impl<'a> SearchTree<'a> {
    fn new(root: &'a GameState, config: &MctsConfig, started: Instant) -> Result<Self, SearchError> {
        let arena = Arena::new();
        let root_id = arena.push(SearchNode::new(root.clone(), None, &config.raise_sizing))?;
        let scale = (root.pot() + root.to_call()).as_f64().max(1.0);

        Ok(Self {
            root,
            root_id,
            arena,
            scale,
            claimed: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            equity_halves: AtomicU64::new(0),
            abort: AtomicBool::new(false),
            deadline: config
                .time_limit_ms
                .map(|ms| started + Duration::from_millis(ms)),
        })
    }

    /// Время вышло. Хотя бы одна итерация выполняется всегда.
    fn out_of_time(&self) -> bool {
        match self.deadline {
            Some(deadline) => {
                self.completed.load(Ordering::Relaxed) > 0 && Instant::now() >= deadline
            }
            None => false,
        }
    }

    fn root_stats(&self, started: Instant) -> Result<RootStats, SearchError> {
        let actions = self.arena.with_node(self.root_id, |node| {
            node.actions
                .iter()
                .zip(node.stats.iter())
                .map(|(action, stats)| RootAction::new(*action, *stats))
                .collect::<Vec<_>>()
        })?;

        let iterations = self.completed.load(Ordering::Relaxed);
        if iterations == 0 {
            return Err(SearchError::Internal("ни одной итерации не выполнено"));
        }
        let win_probability =
            self.equity_halves.load(Ordering::Relaxed) as f64 / 2.0 / iterations as f64;

        Ok(RootStats {
            actions,
            iterations,
            win_probability,
            pot: self.root.pot(),
            to_call: self.root.to_call(),
            node_count: self.arena.len(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }
}

/// Состояние одной итерации конкретного воркера.
struct IterationContext {
    rng: DeterministicRng,
    det: Option<Determinization>,
}

impl IterationContext {
    /// Детерминизация текущей итерации; сэмплируется при первом обращении.
    fn determinization(&mut self, root: &GameState) -> Result<&mut Determinization, DeckError> {
        let det = match self.det.take() {
            Some(det) => det,
            None => Determinization::sample(root, &mut self.rng)?,
        };
        Ok(self.det.insert(det))
    }
}

/// Источник борда для спуска по дереву: сэмплирует детерминизацию только
/// когда действительно нужна следующая улица.
struct LazyDealer<'c> {
    ctx: &'c mut IterationContext,
    root: &'c GameState,
}

impl BoardSource for LazyDealer<'_> {
    fn deal(&mut self, state: &GameState, count: usize) -> Result<Vec<Card>, EngineError> {
        self.ctx.determinization(self.root)?.deal(state, count)
    }
}
