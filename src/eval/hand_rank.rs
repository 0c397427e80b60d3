use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    fn from_id(id: u8) -> HandCategory {
        match id {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }

    /// Сколько рангов участвуют в сравнении внутри категории.
    pub const fn significant_len(self) -> usize {
        match self {
            HandCategory::StraightFlush | HandCategory::Straight => 1,
            HandCategory::FourOfAKind | HandCategory::FullHouse => 2,
            HandCategory::ThreeOfAKind | HandCategory::TwoPair => 3,
            HandCategory::OnePair => 4,
            HandCategory::Flush | HandCategory::HighCard => 5,
        }
    }

    /// Сколько из значимых рангов описывают саму комбинацию (остальное – кикеры).
    pub const fn made_len(self) -> usize {
        match self {
            HandCategory::HighCard => 0,
            HandCategory::OnePair
            | HandCategory::ThreeOfAKind
            | HandCategory::FourOfAKind
            | HandCategory::Straight
            | HandCategory::StraightFlush => 1,
            HandCategory::TwoPair | HandCategory::FullHouse => 2,
            HandCategory::Flush => 5,
        }
    }
}

impl HandRank {
    /// Собрать HandRank из категории и значимых рангов (от старшего к младшему).
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
    /// Rank: 2..14 (2..A) влазит в 4 бита, неиспользуемые слоты = 0.
    pub fn from_category_and_ranks(category: HandCategory, ranks: &[Rank]) -> Self {
        let mut value = (category as u32) & 0x0F;
        for slot in 0..5 {
            let nibble = ranks.get(slot).map_or(0, |r| r.value() as u32);
            value = (value << 4) | nibble;
        }
        HandRank(value)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        HandCategory::from_id(((self.0 >> 20) & 0x0F) as u8)
    }

    /// Значимые ранги: сначала ранги комбинации, затем кикеры.
    ///
    /// Для стрита/стрит-флеша – одна старшая карта (у wheel A2345 это пятёрка).
    pub fn ranks(&self) -> Vec<Rank> {
        let len = self.category().significant_len();
        (0..len)
            .filter_map(|slot| {
                let shift = 16 - 4 * slot as u32;
                Rank::from_value(((self.0 >> shift) & 0x0F) as u8)
            })
            .collect()
    }

    /// Кикеры – значимые ранги, не входящие в саму комбинацию.
    pub fn kickers(&self) -> Vec<Rank> {
        let made = self.category().made_len();
        self.ranks().into_iter().skip(made).collect()
    }
}

/// Человеческое описание руки по категории.
pub fn describe_hand(rank: HandRank) -> String {
    let cat = rank.category();
    match cat {
        HandCategory::HighCard => "High card".to_string(),
        HandCategory::OnePair => "One pair".to_string(),
        HandCategory::TwoPair => "Two pair".to_string(),
        HandCategory::ThreeOfAKind => "Three of a kind".to_string(),
        HandCategory::Straight => "Straight".to_string(),
        HandCategory::Flush => "Flush".to_string(),
        HandCategory::FullHouse => "Full house".to_string(),
        HandCategory::FourOfAKind => "Four of a kind".to_string(),
        HandCategory::StraightFlush => "Straight flush".to_string(),
    }
}
