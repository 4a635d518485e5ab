//! # Displacement Noise
//!
//! Random offsets for midpoint displacement.
//!
//! The synthesizer never owns a generator. It asks a [`NoiseSource`] for one
//! offset per generated cell, in a fixed order: the square pass before the
//! diamond pass, row-major within each pass. Any source that returns the same
//! sequence therefore reproduces the same terrain.
//!
//! ## Determinism Guarantee
//!
//! [`GaussianNoise::seeded`] uses ChaCha8, whose output stream is specified
//! and platform independent. [`GaussianNoise::from_entropy`] is seeded from
//! the OS and differs on every run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// A source of zero-mean displacement offsets.
pub trait NoiseSource {
    /// Returns one offset whose standard deviation is `amplitude`.
    ///
    /// An `amplitude` of zero must yield zero.
    fn offset(&mut self, amplitude: f32) -> f32;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    #[inline]
    fn offset(&mut self, amplitude: f32) -> f32 {
        (**self).offset(amplitude)
    }
}

/// Normally distributed offsets drawn from any `rand` generator.
///
/// # Example
///
/// ```rust,ignore
/// let mut noise = GaussianNoise::seeded(42);
/// let offset = noise.offset(0.5);
/// ```
#[derive(Clone, Debug)]
pub struct GaussianNoise<R> {
    rng: R,
}

impl<R: Rng> GaussianNoise<R> {
    /// Wraps an existing generator.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Unwraps the generator.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl GaussianNoise<ChaCha8Rng> {
    /// Reproducible noise: the same seed always yields the same offsets.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Non-reproducible noise seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> NoiseSource for GaussianNoise<R> {
    #[inline]
    fn offset(&mut self, amplitude: f32) -> f32 {
        let unit: f32 = self.rng.sample(StandardNormal);
        unit * amplitude
    }
}

/// Replays a fixed sequence of unit samples, cycling when it runs out.
///
/// Each sample is multiplied by the requested amplitude, so zero amplitude
/// still yields zero. An empty sequence yields zero.
#[derive(Clone, Debug, Default)]
pub struct ScriptedNoise {
    samples: Vec<f32>,
    cursor: usize,
}

impl ScriptedNoise {
    /// Creates a source that replays `samples` in order.
    #[must_use]
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples, cursor: 0 }
    }

    /// How many offsets have been drawn so far.
    #[must_use]
    pub const fn drawn(&self) -> usize {
        self.cursor
    }
}

impl NoiseSource for ScriptedNoise {
    fn offset(&mut self, amplitude: f32) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let unit = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        unit * amplitude
    }
}
