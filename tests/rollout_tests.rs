//! Детерминизации, политика роллаутов и сами роллауты.

use std::collections::HashSet;

use holdem_mcts::domain::{parse_cards, Card, Chips, HandResult, Seat, Street};
use holdem_mcts::engine::{Action, FixedBoard, GameState, RaiseSizing};
use holdem_mcts::infra::DeterministicRng;
use holdem_mcts::search::{
    hand_strength, rollout, Determinization, Outcome, RolloutPolicy, ValueMode,
};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

fn hole(s: &str) -> [Card; 2] {
    let c = cards(s);
    [c[0], c[1]]
}

fn flop_state() -> GameState {
    GameState::new(
        hole("Ah Kd"),
        cards("Qs Jh 4c"),
        Chips(40),
        Chips(180),
        Chips(180),
        Chips(0),
    )
    .unwrap()
}

fn always_call() -> RolloutPolicy {
    RolloutPolicy::CallDominant {
        raise_probability: 0.0,
        fold_probability: 0.0,
    }
}

#[test]
fn sampled_determinization_avoids_known_cards() {
    let state = flop_state();
    let known: HashSet<Card> = state.known_cards().into_iter().collect();
    let mut rng = DeterministicRng::from_seed(3);

    for _ in 0..200 {
        let det = Determinization::sample(&state, &mut rng).unwrap();
        assert_eq!(det.runout().len(), 2);

        let mut hidden: Vec<Card> = det.opponent_hole().to_vec();
        hidden.extend_from_slice(det.runout());
        let unique: HashSet<Card> = hidden.iter().copied().collect();
        assert_eq!(unique.len(), 4);
        assert!(hidden.iter().all(|c| !known.contains(c)));
    }
}

#[test]
fn river_determinization_needs_only_opponent_cards() {
    let state = GameState::new(
        hole("As Ks"),
        cards("Qs Js Ts 2d 3c"),
        Chips(100),
        Chips(100),
        Chips(100),
        Chips(0),
    )
    .unwrap();
    let det = Determinization::sample(&state, &mut DeterministicRng::from_seed(1)).unwrap();
    assert!(det.runout().is_empty());
    assert_eq!(det.bot_equity(&state).unwrap(), 1.0);
}

#[test]
fn determinization_deals_same_board_at_any_depth() {
    let state = flop_state();
    let mut det = Determinization::fixed(&state, hole("7c 7d"), cards("Tc 2h")).unwrap();

    // Чек-чек на флопе → тёрн из детерминизации.
    let turn = state
        .apply(&Action::Call, &mut det)
        .and_then(|s| s.apply(&Action::Call, &mut det))
        .unwrap();
    assert_eq!(turn.street(), Street::Turn);
    assert_eq!(turn.board().last(), Some(&cards("Tc")[0]));

    // Другой путь к тёрну (ставка-колл) даёт ту же карту.
    let turn_again = state
        .apply(&Action::Raise(Chips(20)), &mut det)
        .and_then(|s| s.apply(&Action::Call, &mut det))
        .unwrap();
    assert_eq!(turn_again.board(), turn.board());

    let river = turn
        .apply(&Action::Call, &mut det)
        .and_then(|s| s.apply(&Action::Call, &mut det))
        .unwrap();
    assert_eq!(river.board(), &cards("Qs Jh 4c Tc 2h")[..]);
}

#[test]
fn fixed_determinization_rejects_known_cards() {
    let state = flop_state();
    assert!(Determinization::fixed(&state, hole("Ah 7d"), cards("Tc 2h")).is_err());
    assert!(Determinization::fixed(&state, hole("7c 7d"), cards("Tc")).is_err());
}

#[test]
fn check_down_rollout_reaches_showdown() {
    let state = flop_state();
    let mut det = Determinization::fixed(&state, hole("7c 7d"), cards("Tc 2h")).unwrap();
    let mut rng = DeterministicRng::from_seed(9);

    let outcome = rollout(
        &state,
        &mut det,
        &always_call(),
        &RaiseSizing::default(),
        &mut rng,
    )
    .unwrap();

    // AK на Q J 4 T 2 – стрит до туза против пары семёрок.
    assert_eq!(outcome.result, HandResult::BotWins);
    assert_eq!(outcome.bot_net, 40);
    assert_eq!(outcome.bot_final_stack, Chips(220));
    // Чек-чек на флопе, тёрне и ривере.
    assert_eq!(outcome.steps, 6);
}

#[test]
fn rollout_from_terminal_state_only_settles() {
    let state = flop_state();
    let folded = state
        .apply(&Action::Fold, &mut FixedBoard { cards: Vec::new() })
        .unwrap();
    let mut det = Determinization::fixed(&state, hole("7c 7d"), cards("Tc 2h")).unwrap();

    let outcome = rollout(
        &folded,
        &mut det,
        &RolloutPolicy::default(),
        &RaiseSizing::default(),
        &mut DeterministicRng::from_seed(0),
    )
    .unwrap();

    assert_eq!(outcome.result, HandResult::OpponentWins);
    assert_eq!(outcome.bot_net, 0);
    assert_eq!(outcome.steps, 0);
}

#[test]
fn random_rollouts_conserve_chips_and_terminate() {
    let state = GameState::new(
        hole("9h 8h"),
        Vec::new(),
        Chips(3),
        Chips(199),
        Chips(198),
        Chips(1),
    )
    .unwrap();
    let total = state.chips_in_play();
    let sizing = RaiseSizing::default();
    let mut rng = DeterministicRng::from_seed(2024);

    for policy in [RolloutPolicy::default(), RolloutPolicy::call_dominant()] {
        for _ in 0..300 {
            let mut det = Determinization::sample(&state, &mut rng).unwrap();
            let outcome = rollout(&state, &mut det, &policy, &sizing, &mut rng).unwrap();

            let opponent_final = total.0 as i64 - outcome.bot_final_stack.0 as i64;
            assert!(opponent_final >= 0);
            assert!(outcome.bot_net >= -199 && outcome.bot_net <= 201);
        }
    }
}

#[test]
fn chip_delta_value_is_zero_for_root_fold() {
    let outcome = Outcome {
        result: HandResult::OpponentWins,
        bot_final_stack: Chips(180),
        bot_net: 0,
        steps: 1,
    };
    assert_eq!(ValueMode::ChipDelta.value(&outcome, Chips(180), 60.0), 0.0);
    assert_eq!(ValueMode::WinLoss.value(&outcome, Chips(180), 60.0), -1.0);

    let won = Outcome {
        result: HandResult::BotWins,
        bot_final_stack: Chips(240),
        bot_net: 60,
        steps: 2,
    };
    assert_eq!(ValueMode::ChipDelta.value(&won, Chips(180), 60.0), 1.0);
    assert_eq!(ValueMode::WinLoss.value(&won, Chips(180), 60.0), 1.0);
}

#[test]
fn policy_always_returns_a_legal_action() {
    let state = GameState::new(
        hole("Ah Kd"),
        cards("Qs Jh 4c"),
        Chips(40),
        Chips(180),
        Chips(160),
        Chips(20),
    )
    .unwrap();
    let legal = state.legal_actions(&RaiseSizing::default());
    let mut rng = DeterministicRng::from_seed(5);

    for policy in [RolloutPolicy::default(), RolloutPolicy::call_dominant()] {
        for h in ["2c 7d", "Qd Qc", "Ts 9s", "Ad Ac"] {
            for _ in 0..50 {
                let action = policy.choose(&state, &hole(h), &legal, &mut rng).unwrap();
                assert!(legal.contains(&action), "{action} не из {legal:?}");
            }
        }
    }
}

#[test]
fn call_dominant_without_noise_always_calls() {
    let state = flop_state();
    let legal = state.legal_actions(&RaiseSizing::default());
    let mut rng = DeterministicRng::from_seed(8);
    for _ in 0..100 {
        assert_eq!(
            always_call().choose(&state, &hole("2c 7d"), &legal, &mut rng).unwrap(),
            Action::Call
        );
    }
}

#[test]
fn strong_hands_never_fold_under_hand_strength_policy() {
    let state = GameState::new(
        hole("Qd Qc"),
        cards("Qs Qh 4c"),
        Chips(40),
        Chips(180),
        Chips(160),
        Chips(20),
    )
    .unwrap();
    let legal = state.legal_actions(&RaiseSizing::default());
    let policy = RolloutPolicy::default();
    let mut rng = DeterministicRng::from_seed(12);

    for _ in 0..200 {
        let action = policy.choose(&state, state.hole_cards(), &legal, &mut rng).unwrap();
        assert_ne!(action, Action::Fold);
    }
}

#[test]
fn hand_strength_orders_hands() {
    let aces = hand_strength(&hole("Ah Ad"), &[]).unwrap();
    let trash = hand_strength(&hole("7c 2d"), &[]).unwrap();
    assert!(aces > trash);
    assert!((0.0..=1.0).contains(&aces));

    let board = cards("Qs Qh 4c");
    let quads = hand_strength(&hole("Qd Qc"), &board).unwrap();
    let pair = hand_strength(&hole("7c 2d"), &board).unwrap();
    assert!(quads > pair);
    assert!(quads <= 1.0);
}

#[test]
fn opponent_hole_is_used_for_opponent_seat() {
    let state = flop_state();
    let det = Determinization::fixed(&state, hole("7c 7d"), cards("Tc 2h")).unwrap();
    assert_eq!(det.hole_for(Seat::Opponent, &state), hole("7c 7d"));
    assert_eq!(det.hole_for(Seat::Bot, &state), hole("Ah Kd"));
}

#[test]
fn rollout_is_reproducible_for_fixed_world_and_seed() {
    let state = flop_state();
    let sizing = RaiseSizing::default();
    let policy = RolloutPolicy::default();

    for world in 0..20 {
        let det = Determinization::sample(&state, &mut DeterministicRng::from_seed(world)).unwrap();

        let first = rollout(
            &state,
            &mut det.clone(),
            &policy,
            &sizing,
            &mut DeterministicRng::from_seed(1000 + world),
        )
        .unwrap();
        let second = rollout(
            &state,
            &mut det.clone(),
            &policy,
            &sizing,
            &mut DeterministicRng::from_seed(1000 + world),
        )
        .unwrap();

        assert_eq!(first, second, "мир {world}");
    }
}
