//! Внешний API: decide_action, PokerBot, конфиг, DTO.

use holdem_mcts::api::{decide_action, BotError, DecisionDto, PokerBot};
use holdem_mcts::config::{BotConfig, ConfigError};
use holdem_mcts::domain::{parse_cards, Card, Chips, Street};
use holdem_mcts::engine::{Action, FixedBoard, GameState};
use holdem_mcts::infra::DeterministicRng;
use holdem_mcts::search::{estimate_equity, RolloutPolicy, ValueMode};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

fn hole(s: &str) -> [Card; 2] {
    let c = cards(s);
    [c[0], c[1]]
}

fn seeded_bot(iterations: usize, seed: u64) -> PokerBot {
    let mut config = BotConfig::default();
    config.mcts.iterations = iterations;
    config.mcts.seed = Some(seed);
    PokerBot::new(config).unwrap()
}

#[test]
fn straight_flush_on_river_is_confident() {
    let state = GameState::new(
        hole("As Ks"),
        cards("Qs Js Ts 2d 3c"),
        Chips(100),
        Chips(300),
        Chips(300),
        Chips(0),
    )
    .unwrap();

    let decision = decide_action(&state, 50, std::f64::consts::SQRT_2).unwrap();
    assert!(decision.win_probability >= 0.95);
    assert_ne!(decision.action, Action::Fold);
}

#[test]
fn hopeless_hand_facing_big_bet_folds() {
    // Семь старших против ставки 100 в банк 50 на ривере.
    let state = GameState::new(
        hole("2c 3d"),
        cards("As Kh Qd 9s 8h"),
        Chips(150),
        Chips(300),
        Chips(200),
        Chips(100),
    )
    .unwrap();

    let report = seeded_bot(1000, 17).decide(&state).unwrap();
    assert_eq!(report.action, Action::Fold);
    assert!(report.win_probability < 0.4);
    assert_eq!(report.iterations, 1000);
}

#[test]
fn terminal_state_is_invalid() {
    let state = GameState::new(
        hole("Ah Kd"),
        Vec::new(),
        Chips(3),
        Chips(199),
        Chips(198),
        Chips(1),
    )
    .unwrap();
    let folded = state
        .apply(&Action::Fold, &mut FixedBoard { cards: Vec::new() })
        .unwrap();

    let err = decide_action(&folded, 100, 1.4).unwrap_err();
    assert!(matches!(err, BotError::InvalidState(_)), "{err}");
}

#[test]
fn zero_budget_is_invalid_config() {
    let state = GameState::new(
        hole("Ah Kd"),
        Vec::new(),
        Chips(3),
        Chips(199),
        Chips(198),
        Chips(1),
    )
    .unwrap();

    let err = decide_action(&state, 0, 1.4).unwrap_err();
    assert!(matches!(err, BotError::InvalidConfig(_)), "{err}");

    let err = decide_action(&state, 10, f64::NAN).unwrap_err();
    assert!(matches!(err, BotError::InvalidConfig(_)), "{err}");
}

#[test]
fn seeded_bot_is_reproducible() {
    let state = GameState::new(
        hole("Ah Kd"),
        cards("Qs Jh 4c"),
        Chips(40),
        Chips(180),
        Chips(160),
        Chips(20),
    )
    .unwrap();

    let a = seeded_bot(300, 99).decide(&state).unwrap();
    let b = seeded_bot(300, 99).decide(&state).unwrap();
    assert_eq!(a.action, b.action);
    assert_eq!(a.win_probability, b.win_probability);
    assert_eq!(a.actions, b.actions);
}

#[test]
fn dto_reflects_report_and_state() {
    let state = GameState::new(
        hole("Ah Kd"),
        cards("Qs Jh 4c"),
        Chips(40),
        Chips(180),
        Chips(160),
        Chips(20),
    )
    .unwrap();
    let bot = seeded_bot(200, 1);
    let report = bot
        .decide_with_rng(&state, &mut DeterministicRng::from_seed(1))
        .unwrap();
    let dto = DecisionDto::from_report(&report, &state);

    assert_eq!(dto.street, Street::Flop);
    assert_eq!(dto.to_call, Chips(20));
    assert_eq!(dto.action, report.action.to_string());
    assert_eq!(dto.actions.len(), report.actions.len());

    let json = serde_json::to_string(&dto).unwrap();
    assert!(json.contains("\"street\""));
    assert!(json.contains("\"win_probability\""));
}

#[test]
fn partial_config_json_uses_defaults() {
    let config = BotConfig::from_json_str(
        r#"{
            "mcts": {
                "iterations": 500,
                "exploration_constant": 1.5,
                "value_mode": "win_loss",
                "rollout": { "kind": "call_dominant", "raise_probability": 0.2, "fold_probability": 0.1 }
            },
            "decision": { "min_visits": 10 }
        }"#,
    )
    .unwrap();

    assert_eq!(config.mcts.iterations, 500);
    assert_eq!(config.mcts.value_mode, ValueMode::WinLoss);
    assert_eq!(config.mcts.exploration_constant, 1.5);
    assert_eq!(config.mcts.workers, 1);
    assert_eq!(
        config.mcts.rollout,
        RolloutPolicy::CallDominant {
            raise_probability: 0.2,
            fold_probability: 0.1
        }
    );
    assert_eq!(config.decision.min_visits, 10);
    assert_eq!(config.decision.min_visit_share, 0.05);

    let back = BotConfig::from_json_str(&config.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, config);
}

#[test]
fn invalid_config_json_is_rejected() {
    assert!(matches!(
        BotConfig::from_json_str("{ not json"),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        BotConfig::from_json_str(r#"{ "mcts": { "iterations": 0 } }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        BotConfig::from_path("/nonexistent/bot.json"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn monte_carlo_equity_matches_known_spots() {
    let mut rng = DeterministicRng::from_seed(21);

    let aces = estimate_equity(&hole("Ah Ad"), &[], 4000, &mut rng).unwrap();
    assert_eq!(aces.samples(), 4000);
    assert!(aces.equity() > 0.80 && aces.equity() < 0.90, "{}", aces.equity());
    assert!(aces.stays());

    let trash = estimate_equity(&hole("7c 2d"), &cards("As Ks Qs"), 2000, &mut rng).unwrap();
    assert!(!trash.stays());

    let royal = estimate_equity(&hole("As Ks"), &cards("Qs Js Ts"), 500, &mut rng).unwrap();
    assert_eq!(royal.equity(), 1.0);

    assert!(estimate_equity(&hole("As Ks"), &cards("As"), 10, &mut rng).is_err());
}

#[test]
fn bot_never_folds_when_checking_is_free() {
    let spots = [
        ("4c 2d", "Ah Kh Qh 9h 8c"),
        ("7s 3d", "Ac Kd Qh Js 9c"),
        ("5c 4d", "Ah Ac Kh Kd Qs"),
        ("Tc 2s", "Ks Qs 8d 7h 3c"),
        ("9d 8d", "Ad Kc Jh 4s 2h"),
    ];

    for (hole_cards, board) in spots {
        let state = GameState::new(
            hole(hole_cards),
            cards(board),
            Chips(100),
            Chips(200),
            Chips(200),
            Chips(0),
        )
        .unwrap();

        for seed in 0..20 {
            let report = seeded_bot(500, seed).decide(&state).unwrap();
            assert_ne!(
                report.action,
                Action::Fold,
                "{hole_cards} / seed {seed}: {:?}",
                report.actions
            );
        }
    }
}
