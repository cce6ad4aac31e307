//! Seeded randomness handle.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Random number generator that remembers the seed it was built from.
///
/// Every randomized step of trace generation draws from one explicitly passed
/// `TraceRng`, so a run is reproducible from its logged seed.
#[derive(Debug, Clone)]
pub struct TraceRng {
    seed: u64,
    inner: StdRng,
}

impl TraceRng {
    /// Creates a generator from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator from a seed drawn from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::seeded(rand::rng().random())
    }

    /// Uses `seed` when given, otherwise draws a fresh one.
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for TraceRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.inner.fill_bytes(dst);
    }
}
