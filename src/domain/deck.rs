use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::RandomSource;

/// Ошибки колоды / сэмплера.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("Недостаточно неизвестных карт: запрошено {requested}, осталось {available}")]
    InsufficientCards { requested: usize, available: usize },
}

/// Множество карт в виде 52-битной маски (бит = `Card::index()`).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CardMask(pub u64);

impl CardMask {
    pub const EMPTY: CardMask = CardMask(0);

    pub fn from_cards(cards: &[Card]) -> Self {
        let mut mask = CardMask::EMPTY;
        for &c in cards {
            mask.insert(c);
        }
        mask
    }

    /// Добавить карту. Возвращает `false`, если карта уже была в маске.
    pub fn insert(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.index();
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0 & (1u64 << card.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Колода карт. В домене – просто упорядоченный список карт.
/// Перемешивание делает вызывающий код через `RandomSource`, НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// Перемешанная полная колода.
    pub fn shuffled<R: RandomSource>(rng: &mut R) -> Self {
        let mut deck = Deck::standard_52();
        rng.shuffle(&mut deck.cards);
        deck
    }

    /// Колода без уже известных карт (hole + board + уже сэмплированные).
    pub fn without(known: &[Card]) -> Self {
        let mask = CardMask::from_cards(known);
        let mut deck = Deck::standard_52();
        deck.cards.retain(|c| !mask.contains(*c));
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять n карт сверху.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let keep = self.cards.len().saturating_sub(n);
        let mut taken = self.cards.split_off(keep);
        taken.reverse();
        taken
    }
}

/// Deck Sampler: `count` различных случайных карт из 52 минус `known`.
///
/// Выбор равномерный и без возвращения (частичный Фишер–Йетс).
/// Повторы внутри `known` допустимы и считаются одной картой.
pub fn sample<R: RandomSource>(
    known: &[Card],
    count: usize,
    rng: &mut R,
) -> Result<Vec<Card>, DeckError> {
    let mut pool = Deck::without(known).cards;
    let available = pool.len();
    if count > available {
        return Err(DeckError::InsufficientCards {
            requested: count,
            available,
        });
    }

    for i in 0..count {
        let j = i + rng.below(available - i);
        pool.swap(i, j);
    }
    pool.truncate(count);
    Ok(pool)
}
