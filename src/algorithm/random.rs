use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Seeded random source for every stochastic choice the solver makes
///
/// Scan directions, search strategies and item shuffles all draw from the
/// same generator, so one seed replays one layout exactly.
#[derive(Clone, Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Wrap an already-constructed generator
    pub const fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Fair coin flip
    pub fn coin_flip(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
