use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use holdem_mcts::api::{DecisionDto, PokerBot};
use holdem_mcts::config::BotConfig;
use holdem_mcts::domain::deck::Deck;
use holdem_mcts::domain::{Card, Chips, Seat};
use holdem_mcts::engine::{GameState, HandStatus, SamplingDealer};
use holdem_mcts::eval::{describe_hand, evaluate_best_hand};
use holdem_mcts::infra::{self, logging, SystemRng};
use holdem_mcts::search::RolloutPolicy;

/// Демонстрационная раздача: бот против эвристического соперника.
#[derive(Parser)]
#[command(name = "poker_bot_cli")]
#[command(about = "Сыграть одну heads-up раздачу против MCTS-бота")]
struct Cli {
    /// Бюджет итераций на одно решение
    #[arg(short, long)]
    iterations: Option<usize>,
    /// Константа исследования UCB1
    #[arg(short, long)]
    exploration: Option<f64>,
    /// Число воркеров поиска
    #[arg(short, long)]
    workers: Option<usize>,
    /// Seed процессного RNG (раздача + поиск)
    #[arg(short, long)]
    seed: Option<u64>,
    /// JSON-конфиг бота
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Печатать решения в JSON
    #[arg(long)]
    json: bool,
    /// Подробность логов (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// Блайнды 1/2, по 100 больших блайндов у каждого.
const SMALL_BLIND: u64 = 1;
const BIG_BLIND: u64 = 2;
const STARTING_STACK: u64 = 200;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(logging::level_from_verbosity(cli.verbose));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[BOT] ОШИБКА: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => BotConfig::from_path(path)?,
        None => BotConfig::default(),
    };
    if let Some(n) = cli.iterations {
        config.mcts.iterations = n;
    }
    if let Some(c) = cli.exploration {
        config.mcts.exploration_constant = c;
    }
    if let Some(w) = cli.workers {
        config.mcts.workers = w;
    }

    infra::init_global(cli.seed);
    let mut rng = infra::global_fork();
    let bot = PokerBot::new(config)?;

    // Раздаём по 2 карты; борд открывается по ходу раздачи.
    // Без --seed карманные карты тасует генератор ОС.
    let mut deck = match cli.seed {
        Some(_) => Deck::shuffled(&mut rng),
        None => Deck::shuffled(&mut SystemRng),
    };
    let cards = deck.draw_n(4);
    let bot_hole = [cards[0], cards[1]];
    let opp_hole = [cards[2], cards[3]];
    let mut deal_rng = infra::global_fork();
    let mut dealer = SamplingDealer::new(&mut deal_rng).with_dead_cards(&opp_hole);

    println!("[BOT] Карты бота: {}", show(&bot_hole));

    // Бот на баттоне (SB): блайнды уже в банке, боту доплатить SB.
    let mut state = GameState::new(
        bot_hole,
        Vec::new(),
        Chips::new(SMALL_BLIND + BIG_BLIND),
        Chips::new(STARTING_STACK - SMALL_BLIND),
        Chips::new(STARTING_STACK - BIG_BLIND),
        Chips::new(BIG_BLIND - SMALL_BLIND),
    )?;
    let opponent_policy = RolloutPolicy::default();
    let sizing = bot.config().mcts.raise_sizing.clone();

    while !state.is_terminal() {
        let action = match state.to_act() {
            Seat::Bot => {
                let report = bot.decide_with_rng(&state, &mut rng)?;
                if cli.json {
                    let dto = DecisionDto::from_report(&report, &state);
                    println!("{}", serde_json::to_string(&dto)?);
                } else {
                    println!(
                        "[BOT] {} | борд [{}] | банк {} | к коллу {} -> {} (winProbability {:.2}{})",
                        state.street(),
                        show(state.board()),
                        state.pot(),
                        state.to_call(),
                        report.action,
                        report.win_probability,
                        if report.pot_odds_override {
                            ", фолд по шансам банка"
                        } else {
                            ""
                        }
                    );
                }
                report.action
            }
            Seat::Opponent => {
                let legal = state.legal_actions(&sizing);
                let action = opponent_policy.choose(&state, &opp_hole, &legal, &mut rng)?;
                println!("[OPP] {} -> {}", state.street(), action);
                action
            }
        };
        state = state.apply(&action, &mut dealer)?;
    }

    let settlement = state.settle(&opp_hole)?;
    println!("[OPP] Карты соперника: {}", show(&opp_hole));
    println!("[BOT] Борд: {}", show(state.board()));

    if state.status() == HandStatus::Showdown {
        let ours = evaluate_best_hand(&bot_hole, state.board())?;
        let theirs = evaluate_best_hand(&opp_hole, state.board())?;
        println!(
            "[BOT] Вскрытие: бот – {}, соперник – {}",
            describe_hand(ours),
            describe_hand(theirs)
        );
    }

    let net = settlement.bot_stack().signed_diff(Chips::new(STARTING_STACK));
    println!("[BOT] Итог: {:?}, бот {:+} фишек", settlement.result, net);
    Ok(())
}

fn show(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
