use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, Seat, Street};

/// Действие игрока в heads-up раздаче.
///
/// `Call` при нулевой ставке к уравниванию – это check.
/// `Raise(x)` – уравнять текущую ставку и добавить сверху ещё `x` фишек.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Call,
    Raise(Chips),
}

impl Action {
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Action::Raise(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => f.write_str("fold"),
            Action::Call => f.write_str("call"),
            Action::Raise(amount) => write!(f, "raise {amount}"),
        }
    }
}

/// Запись в истории текущей улицы.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRecord {
    pub seat: Seat,
    pub street: Street,
    pub action: Action,
}

impl ActionRecord {
    pub fn new(seat: Seat, street: Street, action: Action) -> Self {
        Self { seat, street, action }
    }
}

/// Дискретная сетка размеров рейза.
///
/// Вместо непрерывного диапазона – несколько долей банка + all-in,
/// чтобы ветвление дерева поиска оставалось небольшим.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RaiseSizing {
    /// Доли банка (после колла): 0.5 = полбанка, 1.0 = банк.
    pub pot_fractions: Vec<f64>,
    /// Добавлять ли all-in отдельным действием.
    pub include_all_in: bool,
    /// Минимальный размер надбавки в фишках.
    pub min_raise: Chips,
    /// Лимит рейзов за улицу (после него остаются только fold/call).
    pub max_raises_per_round: u8,
}

impl Default for RaiseSizing {
    fn default() -> Self {
        Self {
            pot_fractions: vec![0.5, 1.0],
            include_all_in: true,
            min_raise: Chips(1),
            max_raises_per_round: 4,
        }
    }
}

impl RaiseSizing {
    /// Размеры надбавок для текущего банка.
    ///
    /// `cap` – максимально возможная надбавка (эффективный стек).
    /// Результат отсортирован по возрастанию и без повторов.
    pub fn amounts(&self, pot: Chips, to_call: Chips, cap: Chips) -> Vec<Chips> {
        if cap.is_zero() {
            return Vec::new();
        }

        let pot_after_call = (pot + to_call).as_f64();
        let floor = to_call.max(self.min_raise).max(Chips(1));

        let mut out: Vec<Chips> = self
            .pot_fractions
            .iter()
            .filter(|f| f.is_finite() && **f > 0.0)
            .map(|f| Chips((f * pot_after_call).round() as u64).max(floor).min(cap))
            .collect();

        if self.include_all_in {
            out.push(cap);
        }

        out.sort_unstable();
        out.dedup();
        out
    }
}
