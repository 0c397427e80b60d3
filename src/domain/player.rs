use core::fmt;

use serde::{Deserialize, Serialize};

/// Место за heads-up столом: наш бот или соперник.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Seat {
    Bot,
    Opponent,
}

impl Seat {
    pub const fn other(self) -> Seat {
        match self {
            Seat::Bot => Seat::Opponent,
            Seat::Opponent => Seat::Bot,
        }
    }

    /// Индекс для массивов вида `[T; 2]`.
    pub const fn index(self) -> usize {
        match self {
            Seat::Bot => 0,
            Seat::Opponent => 1,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Bot => f.write_str("bot"),
            Seat::Opponent => f.write_str("opponent"),
        }
    }
}

/// Исход завершённой раздачи с точки зрения бота.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HandResult {
    BotWins,
    OpponentWins,
    Split,
}

impl HandResult {
    pub fn winner(self) -> Option<Seat> {
        match self {
            HandResult::BotWins => Some(Seat::Bot),
            HandResult::OpponentWins => Some(Seat::Opponent),
            HandResult::Split => None,
        }
    }

    pub fn from_winner(winner: Option<Seat>) -> Self {
        match winner {
            Some(Seat::Bot) => HandResult::BotWins,
            Some(Seat::Opponent) => HandResult::OpponentWins,
            None => HandResult::Split,
        }
    }
}
