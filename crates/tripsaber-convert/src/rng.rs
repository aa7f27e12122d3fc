//! Deterministic jitter using PCG32 with BLAKE3 seed derivation.
//!
//! All randomness in a conversion flows through one [`JitterStream`], so the
//! output is a pure function of the seed and the order notes are processed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use tripsaber_format::seed_from_bytes;

/// One two-component jitter sample, each component in `[-1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JitterSample {
    pub x: f64,
    pub y: f64,
}

impl JitterSample {
    /// A sample that leaves positions on their lattice centres.
    pub const ZERO: JitterSample = JitterSample { x: 0.0, y: 0.0 };
}

/// A reproducible stream of jitter samples.
///
/// Owned by exactly one document build and consumed one sample per note.
/// Building a new stream from the same seed replays the same sequence.
#[derive(Debug, Clone)]
pub struct JitterStream {
    seed: u64,
    rng: Pcg32,
}

impl JitterStream {
    /// Creates a stream from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Creates a stream from opaque seed material.
    ///
    /// ```text
    /// seed = truncate_u64_be(BLAKE3(material))
    /// ```
    pub fn from_material(material: &[u8]) -> Self {
        Self::new(seed_from_bytes(material))
    }

    /// The seed this stream was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws the next sample. `x` is drawn before `y`.
    pub fn next_sample(&mut self) -> JitterSample {
        let x = self.rng.gen::<f64>() * 2.0 - 1.0;
        let y = self.rng.gen::<f64>() * 2.0 - 1.0;
        JitterSample { x, y }
    }
}
