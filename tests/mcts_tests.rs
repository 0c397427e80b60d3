//! MCTS: статистика корня, воспроизводимость, параллельные воркеры,
//! ограничение по времени и дисперсия оценки winProbability.

use holdem_mcts::domain::{parse_cards, Card, Chips};
use holdem_mcts::engine::{Action, FixedBoard, GameState};
use holdem_mcts::infra::DeterministicRng;
use holdem_mcts::search::{MctsConfig, MctsEngine, SearchError, ValueMode};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

fn hole(s: &str) -> [Card; 2] {
    let c = cards(s);
    [c[0], c[1]]
}

fn engine(iterations: usize) -> MctsEngine {
    MctsEngine::new(MctsConfig {
        iterations,
        ..MctsConfig::default()
    })
    .unwrap()
}

/// Пара девяток на ривере, чек к боту.
fn river_pair() -> GameState {
    GameState::new(
        hole("Ah 9c"),
        cards("Kd 9s 5h 2c 7d"),
        Chips(100),
        Chips(200),
        Chips(200),
        Chips(0),
    )
    .unwrap()
}

fn royal_flush_river(to_call: u64) -> GameState {
    GameState::new(
        hole("As Ks"),
        cards("Qs Js Ts 2d 3c"),
        Chips(100 + to_call),
        Chips(300),
        Chips(300),
        Chips(to_call),
    )
    .unwrap()
}

fn std_dev(xs: &[f64]) -> f64 {
    let mean = xs.iter().sum::<f64>() / xs.len() as f64;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / xs.len() as f64;
    var.sqrt()
}

#[test]
fn root_visits_match_iterations() {
    let state = GameState::new(
        hole("Ah Kd"),
        cards("Qs Jh 4c"),
        Chips(40),
        Chips(180),
        Chips(160),
        Chips(20),
    )
    .unwrap();
    let stats = engine(400)
        .search(&state, &mut DeterministicRng::from_seed(1))
        .unwrap();

    assert_eq!(stats.iterations, 400);
    assert_eq!(stats.total_visits(), 400);
    assert_eq!(stats.actions.len(), state.legal_actions(&Default::default()).len());
    // Каждое действие корня раскрыто хотя бы раз.
    assert!(stats.actions.iter().all(|a| a.visits > 0));
    assert!(stats.node_count > stats.actions.len());
    assert!((0.0..=1.0).contains(&stats.win_probability));
}

#[test]
fn same_seed_same_statistics() {
    let state = river_pair();
    let a = engine(300)
        .search(&state, &mut DeterministicRng::from_seed(77))
        .unwrap();
    let b = engine(300)
        .search(&state, &mut DeterministicRng::from_seed(77))
        .unwrap();

    assert_eq!(a.actions, b.actions);
    assert_eq!(a.win_probability, b.win_probability);
    assert_eq!(a.node_count, b.node_count);
}

#[test]
fn parallel_workers_honour_exact_budget() {
    let state = river_pair();
    let engine = MctsEngine::new(MctsConfig {
        iterations: 1000,
        workers: 4,
        ..MctsConfig::default()
    })
    .unwrap();

    let stats = engine
        .search(&state, &mut DeterministicRng::from_seed(5))
        .unwrap();
    assert_eq!(stats.iterations, 1000);
    assert_eq!(stats.total_visits(), 1000);
}

#[test]
fn time_limit_cuts_search_short_but_keeps_statistics_valid() {
    let engine = MctsEngine::new(MctsConfig {
        iterations: 10_000_000,
        time_limit_ms: Some(0),
        ..MctsConfig::default()
    })
    .unwrap();

    let stats = engine
        .search(&river_pair(), &mut DeterministicRng::from_seed(3))
        .unwrap();
    assert!(stats.iterations >= 1);
    assert!(stats.iterations < 10_000_000);
    assert_eq!(stats.total_visits() as usize, stats.iterations);
}

#[test]
fn royal_flush_on_river_is_a_lock() {
    for to_call in [0, 50] {
        let stats = engine(200)
            .search(&royal_flush_river(to_call), &mut DeterministicRng::from_seed(to_call))
            .unwrap();
        assert_eq!(stats.win_probability, 1.0);

        let fold = stats.get(&Action::Fold).unwrap();
        let call = stats.get(&Action::Call).unwrap();
        assert!(call.mean_value > fold.mean_value);
    }
}

#[test]
fn folding_at_root_is_worth_zero() {
    let stats = engine(300)
        .search(&river_pair(), &mut DeterministicRng::from_seed(4))
        .unwrap();
    let fold = stats.get(&Action::Fold).unwrap();
    assert!(fold.visits > 0);
    assert_eq!(fold.mean_value, 0.0);
}

#[test]
fn win_loss_values_stay_in_unit_range() {
    let engine = MctsEngine::new(MctsConfig {
        iterations: 300,
        value_mode: ValueMode::WinLoss,
        ..MctsConfig::default()
    })
    .unwrap();
    let stats = engine
        .search(&river_pair(), &mut DeterministicRng::from_seed(6))
        .unwrap();

    for a in &stats.actions {
        assert!((-1.0..=1.0).contains(&a.mean_value), "{:?}", a);
    }
    // Свой фолд – всегда проигрыш.
    assert_eq!(stats.get(&Action::Fold).unwrap().mean_value, -1.0);
}

#[test]
fn bigger_budget_gives_tighter_win_probability() {
    let state = river_pair();
    let runs = 100;

    let estimates = |budget: usize| -> Vec<f64> {
        (0..runs)
            .map(|seed| {
                engine(budget)
                    .search(&state, &mut DeterministicRng::from_seed(seed))
                    .unwrap()
                    .win_probability
            })
            .collect()
    };

    let small = std_dev(&estimates(50));
    let large = std_dev(&estimates(1000));
    assert!(
        large < small,
        "разброс при 1000 итерациях ({large:.4}) должен быть меньше, чем при 50 ({small:.4})"
    );
}

#[test]
fn terminal_and_opponent_states_are_rejected() {
    let state = GameState::new(
        hole("Ah Kd"),
        Vec::new(),
        Chips(3),
        Chips(199),
        Chips(198),
        Chips(1),
    )
    .unwrap();
    let mut none = FixedBoard { cards: Vec::new() };
    let mut rng = DeterministicRng::from_seed(0);

    let folded = state.apply(&Action::Fold, &mut none).unwrap();
    assert_eq!(
        engine(10).search(&folded, &mut rng).unwrap_err(),
        SearchError::TerminalState
    );

    let opponent_to_act = state.apply(&Action::Call, &mut none).unwrap();
    assert_eq!(
        engine(10).search(&opponent_to_act, &mut rng).unwrap_err(),
        SearchError::NotBotsTurn
    );
}

#[test]
fn invalid_configs_are_rejected() {
    let zero = MctsEngine::new(MctsConfig {
        iterations: 0,
        ..MctsConfig::default()
    });
    assert!(matches!(zero, Err(SearchError::InvalidConfig(_))));

    let negative_c = MctsEngine::new(MctsConfig {
        exploration_constant: -1.0,
        ..MctsConfig::default()
    });
    assert!(matches!(negative_c, Err(SearchError::InvalidConfig(_))));

    let no_workers = MctsEngine::new(MctsConfig {
        workers: 0,
        ..MctsConfig::default()
    });
    assert!(matches!(no_workers, Err(SearchError::InvalidConfig(_))));
}
