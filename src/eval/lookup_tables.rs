use crate::domain::card::Rank;

/// Битовая маска рангов.
///
/// Используем 13 бит (от 2 до A):
/// бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

const ACE_BIT: RankMask = 1 << 12;

/// Маски всех стритов, индекс = старшая карта стрита минус 5.
///
///   0: A2345 (wheel, туз внизу – единственный особый случай)
///   1: 23456
///   ...
///   9: TJQKA (broadway)
pub const STRAIGHT_MASKS: [RankMask; 10] = build_straight_masks();

const fn build_straight_masks() -> [RankMask; 10] {
    let mut masks = [0 as RankMask; 10];
    // wheel: A,2,3,4,5
    masks[0] = ACE_BIT | 0b1111;
    let mut i = 1;
    while i < 10 {
        // пять подряд, начиная с бита (i - 1)
        masks[i] = 0b1_1111 << (i - 1);
        i += 1;
    }
    masks
}

/// Получить битовую маску для одного ранга.
pub const fn rank_to_bit(rank: Rank) -> RankMask {
    1 << (rank as u8 - 2)
}

/// Найти самый старший стрит в маске рангов.
/// Возвращает старшую карту стрита; для wheel (A2345) – `Rank::Five`.
pub fn detect_straight(rank_mask: RankMask) -> Option<Rank> {
    STRAIGHT_MASKS
        .iter()
        .enumerate()
        .rev()
        .find(|(_, &sm)| rank_mask & sm == sm)
        .and_then(|(i, _)| Rank::from_value(i as u8 + 5))
}
