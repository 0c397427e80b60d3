//! Настройка логов для бинарей. Библиотека сама логгер не ставит,
//! только пишет через фасад `log`.

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Поставить терминальный логгер. Повторный вызов – no-op (возвращает `false`).
pub fn init(level: LevelFilter) -> bool {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto).is_ok()
}

/// Уровень по флагу `--verbose` (0 = warn, 1 = info, 2 = debug, 3+ = trace).
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
