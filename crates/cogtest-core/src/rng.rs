//! Seeded deterministic RNG.
//!
//! Every generator draws through a [`RandomSource`]; nothing else in the
//! engine is random. The seed string is folded into a 32-bit state with
//! FNV-1a, and each draw advances the state by a large odd constant before a
//! mulberry32-style mixing pass. The sequence depends only on the seed bytes,
//! so it is stable across processes and platforms.
//!
//! Call order is part of the contract: a generator that reconstructs a value
//! (for example the position of a planted anomaly) must draw in exactly the
//! documented order.

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;
const MIX_INCREMENT: u32 = 0x6d2b_79f5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Hash a seed string into a 32-bit state with FNV-1a.
pub fn fnv1a_32(seed: &str) -> u32 {
    seed.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Derive the substream seed used by one section generator.
///
/// Sections draw from independent streams so that adding or reordering a
/// section never shifts the content of another.
pub fn section_seed(seed: &str, code: &str) -> String {
    format!("{seed}::{code}")
}

/// The single randomness interface used by generation code.
///
/// Implementors only provide [`RandomSource::float`]; every other helper is
/// derived from it so that all consumers agree on how many draws each
/// operation consumes.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn float(&mut self) -> f64;

    /// Integer in `[0, max)`; returns 0 when `max` is 0. Consumes one draw.
    fn int(&mut self, max: usize) -> usize {
        if max == 0 {
            // Keep the draw so call order does not depend on the bound.
            let _ = self.float();
            return 0;
        }
        ((self.float() * max as f64).floor() as usize).min(max - 1)
    }

    /// Integer in `[low, high)`. Consumes one draw.
    fn range(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            let _ = self.float();
            return low;
        }
        let span = (high - low) as f64;
        low + ((self.float() * span).floor() as i64).min(high - low - 1)
    }

    /// Float in `[low, high)`. Consumes one draw.
    fn float_range(&mut self, low: f64, high: f64) -> f64 {
        low + self.float() * (high - low)
    }

    /// `true` with probability `p`. Consumes one draw.
    fn chance(&mut self, p: f64) -> bool {
        self.float() < p
    }

    /// Pick one element. Consumes one draw.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let idx = self.int(items.len());
        items.get(idx)
    }

    /// Fisher-Yates shuffle in place. Consumes `len - 1` draws.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.int(i + 1);
            items.swap(i, j);
        }
    }

    /// Draw `count` distinct indices from `0..len`, in draw order.
    ///
    /// Uses a partial Fisher-Yates over an index table, consuming exactly
    /// `min(count, len)` draws.
    fn sample_indices(&mut self, len: usize, count: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let take = count.min(len);
        let mut out = Vec::with_capacity(take);
        for i in 0..take {
            let j = i + self.int(len - i);
            pool.swap(i, j);
            out.push(pool[i]);
        }
        out
    }
}

/// Deterministic generator seeded from an opaque string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator from a seed string. Any string, including the
    /// empty string, is a valid seed.
    pub fn new(seed: &str) -> Self {
        Self {
            state: fnv1a_32(seed),
        }
    }

    /// Create a generator from a raw 32-bit state.
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Advance and return the next mixed 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MIX_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }
}

impl RandomSource for SeededRng {
    fn float(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }
}

/// Convenience constructor mirroring the engine-wide `createRng(seed)` shape.
pub fn create_rng(seed: &str) -> SeededRng {
    SeededRng::new(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_known_vectors() {
        assert_eq!(fnv1a_32(""), 0x811c_9dc5);
        assert_eq!(fnv1a_32("a"), 0xe40c_292c);
        assert_eq!(fnv1a_32("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRng::new("alpha");
        let mut b = SeededRng::new("alpha");
        let seq_a: Vec<u32> = (0..200).map(|_| a.next_u32()).collect();
        let seq_b: Vec<u32> = (0..200).map(|_| b.next_u32()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn floats_stay_in_unit_interval() {
        let mut rng = SeededRng::new("bounds");
        for _ in 0..10_000 {
            let v = rng.float();
            assert!((0.0..1.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn one_bit_seed_change_avalanches() {
        // "a" and "c" differ in a single bit.
        let mut a = SeededRng::new("a");
        let mut c = SeededRng::new("c");
        let mut flipped = 0u32;
        let rounds = 64;
        for _ in 0..rounds {
            flipped += (a.next_u32() ^ c.next_u32()).count_ones();
        }
        let avg = f64::from(flipped) / f64::from(rounds);
        assert!(avg > 10.0 && avg < 22.0, "average flipped bits {avg}");
    }

    #[test]
    fn empty_seed_is_valid() {
        let mut rng = SeededRng::new("");
        let v = rng.float();
        assert!((0.0..1.0).contains(&v));
    }

    #[test]
    fn int_respects_bound() {
        let mut rng = SeededRng::new("ints");
        for _ in 0..5_000 {
            assert!(rng.int(7) < 7);
        }
        assert_eq!(rng.int(0), 0);
    }

    #[test]
    fn range_respects_bounds() {
        let mut rng = SeededRng::new("range");
        for _ in 0..5_000 {
            let v = rng.range(-5, 5);
            assert!((-5..5).contains(&v));
        }
        assert_eq!(rng.range(3, 3), 3);
    }

    #[test]
    fn sample_indices_are_distinct() {
        let mut rng = SeededRng::new("sample");
        let picks = rng.sample_indices(10, 6);
        assert_eq!(picks.len(), 6);
        let mut sorted = picks.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 6);
        assert!(picks.iter().all(|&i| i < 10));
    }

    #[test]
    fn sample_indices_clamps_to_len() {
        let mut rng = SeededRng::new("clamp");
        assert_eq!(rng.sample_indices(3, 10).len(), 3);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SeededRng::new("shuffle");
        let mut items: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn section_seed_is_namespaced() {
        assert_eq!(section_seed("alpha", "arith"), "alpha::arith");
        assert_ne!(
            fnv1a_32(&section_seed("alpha", "arith")),
            fnv1a_32(&section_seed("alpha", "lang"))
        );
    }
}
