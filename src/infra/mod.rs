//! Инфраструктурный слой вокруг бота:
//! - RNG-реализации (процессный источник, детерминированные потоки);
//! - настройка логов для бинарей.

pub mod logging;
pub mod rng;

pub use rng::{global_fork, init_global, DeterministicRng, SystemRng};
