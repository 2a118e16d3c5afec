use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::UniformSource;

/// `UniformSource` backed by `rand`. Seeded runs are reproducible.
pub struct RngUniformSource {
    rng: StdRng,
}

impl RngUniformSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl UniformSource for RngUniformSource {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
