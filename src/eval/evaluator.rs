use std::cmp::Ordering;

use thiserror::Error;

use crate::domain::card::{Card, Rank};
use crate::domain::deck::CardMask;
use crate::domain::hand::HandRank;

use super::hand_rank::HandCategory;
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Ошибки оценки руки (некорректный вход).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Оценка руки ожидает от 5 до 7 карт, получено {0}")]
    WrongCardCount(usize),

    #[error("Карта {0} встречается дважды")]
    DuplicateCard(Card),
}

/// Оценить 5–7 карт: категория + тайбрейки лучшей 5-карточной комбинации.
///
/// Для 6–7 карт перебираются все 5-карточные подмножества.
pub fn evaluate(cards: &[Card]) -> Result<HandRank, EvalError> {
    validate_cards(cards)?;
    Ok(best_of_all_5card_combinations(cards))
}

/// Сравнить две руки по 5–7 карт.
///
/// `Greater` – выигрывает первая, `Less` – вторая, `Equal` – ничья.
pub fn compare_hands(a: &[Card], b: &[Card]) -> Result<Ordering, EvalError> {
    let ra = evaluate(a)?;
    let rb = evaluate(b)?;
    Ok(ra.cmp(&rb))
}

/// Лучшая рука из hole + board (обычно 2 + 5, но подходит любой набор 5–7 карт).
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Result<HandRank, EvalError> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate(&all_cards)
}

fn validate_cards(cards: &[Card]) -> Result<(), EvalError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EvalError::WrongCardCount(cards.len()));
    }
    let mut seen = CardMask::EMPTY;
    for &card in cards {
        if !seen.insert(card) {
            return Err(EvalError::DuplicateCard(card));
        }
    }
    Ok(())
}

/// Перебираем все комбинации 5 карт из N (N=5–7) и выбираем лучшую.
fn best_of_all_5card_combinations(cards: &[Card]) -> HandRank {
    let n = cards.len();
    let mut best = HandRank(0);

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let r = evaluate_5card_hand(&five);
                        if r > best {
                            best = r;
                        }
                    }
                }
            }
        }
    }

    best
}

/// Оценка строго 5-карточной комбинации.
fn evaluate_5card_hand(cards: &[Card; 5]) -> HandRank {
    let mut rank_counts = [0u8; 15]; // индексы 2..14
    let mut rank_mask: RankMask = 0;

    let first_suit = cards[0].suit;
    let mut is_flush = true;

    for card in cards.iter() {
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
        is_flush &= card.suit == first_suit;
    }

    let straight_high = detect_straight(rank_mask);

    if is_flush {
        if let Some(high) = straight_high {
            return HandRank::from_category_and_ranks(HandCategory::StraightFlush, &[high]);
        }
    }

    // Группы (count, rank), сортировка: по количеству desc, затем по рангу desc.
    let mut groups: [(u8, Rank); 5] = [(0, Rank::Two); 5];
    let mut len = 0;
    for rank in Rank::ALL.iter().rev() {
        let c = rank_counts[rank.value() as usize];
        if c > 0 {
            groups[len] = (c, *rank);
            len += 1;
        }
    }
    let groups = &mut groups[..len];
    groups.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

    let ranks: Vec<Rank> = groups.iter().map(|g| g.1).collect();

    // pattern: [4,1], [3,2], [3,1,1], [2,2,1], [2,1,1,1], [1,1,1,1,1]
    let category = match (groups[0].0, groups.get(1).map(|g| g.0)) {
        (4, _) => HandCategory::FourOfAKind,
        (3, Some(2)) => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        _ if straight_high.is_some() => HandCategory::Straight,
        (3, _) => HandCategory::ThreeOfAKind,
        (2, Some(2)) => HandCategory::TwoPair,
        (2, _) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    match (category, straight_high) {
        (HandCategory::Straight, Some(high)) => {
            HandRank::from_category_and_ranks(HandCategory::Straight, &[high])
        }
        _ => HandRank::from_category_and_ranks(category, &ranks),
    }
}
