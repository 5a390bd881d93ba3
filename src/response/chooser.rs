//! Injectable random choice.

use std::fmt;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks one index out of a non-empty list of candidates.
pub trait Chooser: Send + Sync {
    /// Return an index in `0..len`. `len` is never zero.
    fn choose(&self, len: usize) -> usize;

    /// Get the name of this chooser for debugging and logging.
    fn name(&self) -> &str;
}

/// Uniform random chooser backed by a seedable [`StdRng`].
pub struct RandomChooser {
    rng: Mutex<StdRng>,
    seed: Option<u64>,
}

impl RandomChooser {
    /// Chooser seeded from operating system entropy.
    pub fn new() -> Self {
        RandomChooser {
            rng: Mutex::new(StdRng::from_os_rng()),
            seed: None,
        }
    }

    /// Chooser with a fixed seed; the same seed yields the same picks.
    pub fn seeded(seed: u64) -> Self {
        RandomChooser {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            seed: Some(seed),
        }
    }

    /// Seeded when `seed` is given, entropy-based otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for RandomChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RandomChooser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomChooser")
            .field("seed", &self.seed)
            .finish()
    }
}

impl Chooser for RandomChooser {
    fn choose(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.lock().random_range(0..len)
    }

    fn name(&self) -> &str {
        "random"
    }
}
