//! Seeded pseudo-random generator for reproducible simulations.
//!
//! A 32-bit linear congruential generator (`a = 22695477`, `c = 1`,
//! `m = 2^32`). Every generation call takes an explicit `&mut
//! DeterministicRng`; there is no process-wide generator.

const MULTIPLIER: u32 = 22_695_477;
const INCREMENT: u32 = 1;
const MODULUS: f64 = 4_294_967_296.0;

/// Reproducible LCG. Two instances built from the same seed yield the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterministicRng {
    state: u32,
}

impl DeterministicRng {
    /// Any integer is accepted; the seed is reduced modulo 2^32.
    pub fn new(seed: i64) -> Self {
        Self { state: seed as u32 }
    }

    /// Returns a value in `[0, 1)` and advances the state.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        f64::from(self.state) / MODULUS
    }

    /// Returns an integer in `[min, max)`. Returns `min` without advancing when the range is empty.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let (min, max) = (i128::from(min), i128::from(max));
        let span = (max - min) as f64;
        let offset = (self.next_f64() * span).floor() as i128;
        (min + offset).min(max - 1) as i64
    }

    /// Uniformly picks one element, or `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_int(0, items.len() as i64) as usize;
        items.get(idx)
    }
}
