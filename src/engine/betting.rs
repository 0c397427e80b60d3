use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::Seat;

/// Состояние раунда ставок (на конкретной улице) для двух игроков.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingRound {
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Сколько каждый место поставило на этой улице (индекс = `Seat::index()`).
    pub bets: [Chips; 2],
    /// Действовал ли игрок на этой улице после последней агрессии.
    pub acted: [bool; 2],
    /// Сколько рейзов уже было на улице.
    pub raises: u8,
}

impl BettingRound {
    pub fn new(street: Street) -> Self {
        Self {
            street,
            bets: [Chips::ZERO; 2],
            acted: [false; 2],
            raises: 0,
        }
    }

    pub fn bet(&self, seat: Seat) -> Chips {
        self.bets[seat.index()]
    }

    /// Сколько фишек нужно добавить месту, чтобы уравнять ставку соперника.
    pub fn to_call(&self, seat: Seat) -> Chips {
        self.bet(seat.other()).saturating_sub(self.bet(seat))
    }

    pub fn mark_acted(&mut self, seat: Seat) {
        self.acted[seat.index()] = true;
    }

    /// После рейза соперник снова обязан ответить.
    pub fn on_raise(&mut self, seat: Seat) {
        self.raises = self.raises.saturating_add(1);
        self.acted[seat.index()] = true;
        self.acted[seat.other().index()] = false;
    }

    /// Раунд завершён: оба походили и ставки равны.
    pub fn is_round_complete(&self) -> bool {
        self.acted[0] && self.acted[1] && self.bets[0] == self.bets[1]
    }
}
