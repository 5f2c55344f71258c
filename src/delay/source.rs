//! Random sources for sleep durations.

use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::delay::SleepRange;

/// Produces the delay for the next `/randomsleep` request.
pub trait DelaySource: Send + Sync {
    fn next_delay(&self, range: &SleepRange) -> Duration;
}

/// Draws from the calling thread's RNG. No coordination between requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl DelaySource for ThreadRngSource {
    fn next_delay(&self, range: &SleepRange) -> Duration {
        range.sample(&mut rand::thread_rng())
    }
}

/// Reproducible sequence of delays from a fixed seed.
///
/// Requests share one generator, so the order in which concurrent requests
/// take their draws decides which delay each one gets.
#[derive(Debug)]
pub struct SeededSource {
    rng: Mutex<StdRng>,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl DelaySource for SeededSource {
    fn next_delay(&self, range: &SleepRange) -> Duration {
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        range.sample(&mut *rng)
    }
}
