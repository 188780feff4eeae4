//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through StreamRng instances derived from the
//! session's master seed.
//!
//! Each consumer gets its own stream, seeded from
//! (master_seed XOR slot_index * golden-ratio constant), so adding a new
//! stream never shifts an existing one.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// The slot index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Uniform integer in the closed range [lo, hi].
    pub fn range_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi, "empty range {lo}..={hi}");
        self.inner.gen_range(lo..=hi)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }
}

/// Hands out per-slot streams for one session.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_stream(&self, slot: RngStream) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries. Only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngStream {
    Market = 0,
    Autopilot = 1,
}

impl RngStream {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Market    => "market",
            Self::Autopilot => "autopilot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = RngBank::new(12345).for_stream(RngStream::Market);
        let mut b = RngBank::new(12345).for_stream(RngStream::Market);

        let rolls_a: Vec<i64> = (0..32).map(|_| a.range_inclusive(-5, 5)).collect();
        let rolls_b: Vec<i64> = (0..32).map(|_| b.range_inclusive(-5, 5)).collect();

        assert_eq!(rolls_a, rolls_b, "Same seed should produce same draws");
    }

    #[test]
    fn range_inclusive_stays_in_bounds() {
        let mut rng = RngBank::new(7).for_stream(RngStream::Market);
        for _ in 0..1000 {
            let r = rng.range_inclusive(-5, 5);
            assert!((-5..=5).contains(&r), "draw {r} out of range");
        }
    }
}
