use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::{HandResult, Seat};
use crate::engine::{GameState, RaiseSizing, RandomSource};
use crate::search::determinization::Determinization;
use crate::search::errors::SearchError;
use crate::search::policy::RolloutPolicy;

/// Верхняя граница ходов в одном роллауте. Лимит рейзов на улицу делает
/// раздачу конечной, так что срабатывание – это ошибка в движке.
const MAX_ROLLOUT_STEPS: usize = 256;

/// Чем измеряется ценность завершённой раздачи.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValueMode {
    /// Изменение стека бота относительно корня, нормированное на
    /// `pot + to_call` корня. Фолд в корне стоит ровно 0.
    #[default]
    ChipDelta,
    /// +1 выигрыш, -1 проигрыш (в том числе свой фолд), 0 делёж.
    WinLoss,
}

impl ValueMode {
    /// Ценность исхода с точки зрения бота.
    ///
    /// `root_bot_stack` и `scale` берутся из корня поиска, поэтому значения
    /// из разных листьев сравнимы между собой.
    pub fn value(self, outcome: &Outcome, root_bot_stack: Chips, scale: f64) -> f64 {
        match self {
            ValueMode::ChipDelta => {
                outcome.bot_final_stack.signed_diff(root_bot_stack) as f64 / scale
            }
            ValueMode::WinLoss => match outcome.result {
                HandResult::BotWins => 1.0,
                HandResult::OpponentWins => -1.0,
                HandResult::Split => 0.0,
            },
        }
    }
}

/// Результат одной доигранной раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    pub result: HandResult,
    /// Стек бота после расчёта банка.
    pub bot_final_stack: Chips,
    /// Изменение стека бота относительно состояния, с которого начат роллаут.
    pub bot_net: i64,
    /// Сколько действий сыграно в роллауте.
    pub steps: usize,
}

/// Доиграть раздачу от `state` до конца.
///
/// Ходы обеих сторон выбирает `policy`, борд берётся из `det`.
/// Терминальное состояние просто рассчитывается.
pub fn rollout<R: RandomSource>(
    state: &GameState,
    det: &mut Determinization,
    policy: &RolloutPolicy,
    sizing: &RaiseSizing,
    rng: &mut R,
) -> Result<Outcome, SearchError> {
    let start_stack = state.bot_stack();
    let mut current = state.clone();
    let mut steps = 0;

    while !current.is_terminal() {
        if steps >= MAX_ROLLOUT_STEPS {
            return Err(SearchError::Internal("роллаут не завершился"));
        }

        let actor = current.to_act();
        let hole = det.hole_for(actor, &current);
        let legal = current.legal_actions(sizing);
        let action = policy.choose(&current, &hole, &legal, rng)?;

        current = current.apply(&action, det)?;
        steps += 1;
    }

    let settlement = current.settle(det.opponent_hole())?;
    let bot_final_stack = settlement.final_stacks[Seat::Bot.index()];

    Ok(Outcome {
        result: settlement.result,
        bot_final_stack,
        bot_net: bot_final_stack.signed_diff(start_stack),
        steps,
    })
}
