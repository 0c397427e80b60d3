//! Deck Sampler: выборка без известных карт, без повторов, равномерно.

use std::collections::HashSet;

use holdem_mcts::domain::deck::{sample, Deck, DeckError};
use holdem_mcts::domain::{parse_cards, Card};
use holdem_mcts::infra::DeterministicRng;

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

#[test]
fn deck_without_known_cards_has_remaining_count() {
    let known = cards("As Kd Qc");
    let deck = Deck::without(&known);
    assert_eq!(deck.len(), 49);
    assert_eq!(Deck::standard_52().len(), 52);
}

#[test]
fn sample_never_returns_known_or_duplicate_cards() {
    let known = cards("As Kd Qc Jh Th");
    let mut rng = DeterministicRng::from_seed(42);

    for _ in 0..500 {
        let drawn = sample(&known, 4, &mut rng).unwrap();
        assert_eq!(drawn.len(), 4);

        let unique: HashSet<Card> = drawn.iter().copied().collect();
        assert_eq!(unique.len(), 4, "в выборке повтор: {:?}", drawn);
        assert!(drawn.iter().all(|c| !known.contains(c)));
    }
}

#[test]
fn sample_exact_remaining_and_too_many() {
    let known: Vec<Card> = Deck::standard_52().draw_n(50);
    let mut rng = DeterministicRng::from_seed(1);

    let last_two = sample(&known, 2, &mut rng).unwrap();
    assert_eq!(last_two.len(), 2);

    let err = sample(&known, 3, &mut rng).unwrap_err();
    assert_eq!(
        err,
        DeckError::InsufficientCards {
            requested: 3,
            available: 2
        }
    );
}

#[test]
fn sample_is_roughly_uniform() {
    // 47 оставшихся карт, по одной за сэмпл: каждая должна выпадать ~1/47.
    let known = cards("As Kd Qc Jh Th");
    let mut rng = DeterministicRng::from_seed(7);
    let draws = 47_000;

    let mut counts = std::collections::HashMap::new();
    for _ in 0..draws {
        let card = sample(&known, 1, &mut rng).unwrap()[0];
        *counts.entry(card).or_insert(0u32) += 1;
    }

    assert_eq!(counts.len(), 47);
    for (card, n) in counts {
        assert!(
            (700..=1300).contains(&n),
            "карта {card} выпала {n} раз из {draws}"
        );
    }
}

#[test]
fn same_seed_same_sample() {
    let known = cards("2c 3d");
    let mut a = DeterministicRng::from_seed(99);
    let mut b = DeterministicRng::from_seed(99);
    assert_eq!(
        sample(&known, 7, &mut a).unwrap(),
        sample(&known, 7, &mut b).unwrap()
    );
}

#[test]
fn shuffled_deck_is_a_reproducible_permutation() {
    let a = Deck::shuffled(&mut DeterministicRng::from_seed(9));
    let b = Deck::shuffled(&mut DeterministicRng::from_seed(9));
    assert_eq!(a, b);
    assert_ne!(a, Deck::standard_52());

    let unique: HashSet<Card> = a.cards.iter().copied().collect();
    assert_eq!(unique.len(), 52);

    let mut sys = Deck::shuffled(&mut holdem_mcts::infra::SystemRng);
    let hole = sys.draw_n(4);
    assert_eq!(hole.len(), 4);
    assert_eq!(sys.len(), 48);
}
