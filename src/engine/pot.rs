use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::Seat;

/// Банк раздачи. В heads-up сайд-потов нет: всё, что сверх стека
/// соперника, возвращается как неуравненная ставка.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub total: Chips,
}

impl Pot {
    pub fn new(total: Chips) -> Self {
        Self { total }
    }

    pub fn add(&mut self, amount: Chips) {
        self.total += amount;
    }

    /// Вернуть неуравненную часть ставки.
    pub fn refund(&mut self, amount: Chips) {
        self.total -= amount;
    }

    /// Поделить банк пополам; нечётная фишка уходит `odd_chip_to`.
    /// Возвращает доли по `Seat::index()`.
    pub fn split(&self, odd_chip_to: Seat) -> [Chips; 2] {
        let half = Chips(self.total.0 / 2);
        let mut shares = [half, half];
        if self.total.0 % 2 == 1 {
            shares[odd_chip_to.index()] += Chips(1);
        }
        shares
    }
}
