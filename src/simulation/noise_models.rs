//! Multiplicative sensor noise for PPG simulation
//! Location: src/simulation/noise_models.rs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draw a gain factor `1 + u` with `u` uniform in `[-amplitude, +amplitude]`.
///
/// A zero amplitude returns exactly 1.0 without touching the generator.
pub fn draw_factor<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    if amplitude <= 0.0 {
        return 1.0;
    }
    1.0 + rng.gen_range(-amplitude..=amplitude)
}

/// Uniform multiplicative noise with its own random source
#[derive(Debug, Clone)]
pub struct MultiplicativeNoise {
    amplitude: f64,
    rng: StdRng,
}

impl MultiplicativeNoise {
    /// Seeded when `seed` is given, entropy-seeded otherwise
    pub fn new(amplitude: f64, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(amplitude, seed),
            None => Self::from_entropy(amplitude),
        }
    }

    pub fn seeded(amplitude: f64, seed: u64) -> Self {
        Self {
            amplitude,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy(amplitude: f64) -> Self {
        Self {
            amplitude,
            rng: StdRng::from_entropy(),
        }
    }

    /// Next gain factor
    pub fn factor(&mut self) -> f64 {
        draw_factor(&mut self.rng, self.amplitude)
    }

    pub fn apply(&mut self, value: f64) -> f64 {
        value * self.factor()
    }
}
