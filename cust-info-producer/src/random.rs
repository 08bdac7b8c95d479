use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::error::GenerateError;

/// Source of uniform random draws used by the generators.
pub trait RandomSource {
    /// Draw uniformly from `low..=high`.
    fn draw(&mut self, low: u64, high: u64) -> Result<u64, GenerateError>;

    /// Draw an index into a collection of `len` elements.
    fn index(&mut self, len: usize) -> Result<usize, GenerateError> {
        let last = len.checked_sub(1).ok_or(GenerateError::EmptyChoice)?;
        let i = self.draw(0, last as u64)?;
        Ok(i as usize)
    }

    fn coin_flip(&mut self) -> Result<bool, GenerateError> {
        Ok(self.draw(0, 1)? == 1)
    }
}

/// `RandomSource` over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Invocation-local generator seeded from the operating system.
    pub fn from_os() -> Result<Self, GenerateError> {
        StdRng::try_from_os_rng()
            .map(Self::new)
            .map_err(|e| GenerateError::Entropy(e.to_string()))
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn draw(&mut self, low: u64, high: u64) -> Result<u64, GenerateError> {
        Ok(self.rng.random_range(low..=high))
    }
}
