//! Deterministic input/output buffers shared across kernel runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Owns the two read-only input buffers and the scratch output buffer every
/// kernel operates on.
///
/// Inputs are filled with values in `[0, 100)` from a seeded generator, so
/// two fixtures built from the same seed are bit-identical. The inputs are
/// never mutated after construction. `scratch` carries no meaning between
/// kernel runs: each map kernel overwrites it completely before anything
/// reads it, and reduce kernels ignore it.
pub struct ArrayFixture {
    input_a: Vec<f32>,
    input_b: Vec<f32>,
    scratch: Vec<f32>,
}

impl ArrayFixture {
    /// Build a fixture of `size` elements from `seed`.
    pub fn new(size: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut input_a = vec![0.0f32; size];
        let mut input_b = vec![0.0f32; size];
        // Interleaved draws: a[i] then b[i], matching the seeded sequence.
        for i in 0..size {
            input_a[i] = rng.gen::<f32>() * 100.0;
            input_b[i] = rng.gen::<f32>() * 100.0;
        }
        Self {
            input_a,
            input_b,
            scratch: vec![0.0; size],
        }
    }

    /// Build a fixture from explicit buffers. Used by tests and alternate
    /// drivers that need known inputs.
    ///
    /// # Panics
    ///
    /// Panics if the buffers differ in length.
    pub fn from_buffers(input_a: Vec<f32>, input_b: Vec<f32>) -> Self {
        assert_eq!(
            input_a.len(),
            input_b.len(),
            "fixture buffers must be equal length"
        );
        let len = input_a.len();
        Self {
            input_a,
            input_b,
            scratch: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.input_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_a.is_empty()
    }

    pub fn input_a(&self) -> &[f32] {
        &self.input_a
    }

    pub fn input_b(&self) -> &[f32] {
        &self.input_b
    }

    pub fn scratch(&self) -> &[f32] {
        &self.scratch
    }

    /// Split borrows for a map kernel: both inputs read-only plus the
    /// writable scratch buffer.
    pub fn split_mut(&mut self) -> (&[f32], &[f32], &mut [f32]) {
        (&self.input_a, &self.input_b, &mut self.scratch)
    }
}
