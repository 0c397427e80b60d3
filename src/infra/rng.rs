use std::sync::{Mutex, OnceLock};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use crate::engine::RandomSource;

/// RNG на основе thread-local генератора ОС.
/// Удобен для разовых вызовов; внутри поиска используем `DeterministicRng`.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut rand::thread_rng());
    }

    fn next_u64(&mut self) -> u64 {
        rand::thread_rng().next_u64()
    }

    fn unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn below(&mut self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Детерминированный RNG для тестов, реплея и воркеров поиска.
/// Одинаковый seed → одинаковые детерминизации и роллауты.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Независимый поток: seed берётся из текущего генератора.
    pub fn fork(&mut self) -> DeterministicRng {
        DeterministicRng::from_seed(self.inner.next_u64())
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn below(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }
}

/// Единый процессный источник случайности. Сидируется один раз.
static GLOBAL_RNG: OnceLock<Mutex<StdRng>> = OnceLock::new();

/// Засидировать процессный RNG при старте.
///
/// `None` – seed из энтропии ОС. Возвращает `false`, если RNG уже был
/// инициализирован раньше (повторный seed игнорируется).
pub fn init_global(seed: Option<u64>) -> bool {
    let mut fresh = false;
    GLOBAL_RNG.get_or_init(|| {
        fresh = true;
        Mutex::new(match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        })
    });
    if fresh {
        log::debug!("процессный RNG инициализирован (seed: {:?})", seed);
    }
    fresh
}

/// Отдельный детерминированный поток из процессного RNG.
///
/// Блокировка держится только на время чтения одного u64, так что
/// параллельные решения/воркеры не конкурируют за генератор во время роллаутов.
pub fn global_fork() -> DeterministicRng {
    init_global(None);
    let seed = match GLOBAL_RNG.get() {
        Some(m) => {
            let mut guard = m.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            guard.next_u64()
        }
        None => SystemRng.next_u64(),
    };
    DeterministicRng::from_seed(seed)
}
