//! RNG module - deterministic random source for row generation
//!
//! A small LCG keeps every game reproducible from its seed: the same seed
//! produces the same rows, gaps and colors on every platform.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    seed: u32,
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { seed, state }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Generate next random value (the upper 16 bits of the LCG state)
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Low bits of a power-of-two LCG cycle quickly; hand out the high half.
        self.state >> 16
    }

    /// Generate random value in range [0, max)
    ///
    /// Returns 0 when `max` is 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Uniform integer between `a` and `b`, both inclusive, in either order
    pub fn range_inclusive(&mut self, a: u32, b: u32) -> u32 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        lo + self.next_range(hi - lo + 1)
    }

    /// Pick one element uniformly
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_range(items.len() as u32) as usize;
        items.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_simple_rng_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        let first = rng.next_u32();
        let second = rng.next_u32();
        assert_ne!(first, second);
        assert_eq!(rng.seed(), 0);
    }

    #[test]
    fn test_range_inclusive_bounds() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 4];
        for _ in 0..500 {
            let v = rng.range_inclusive(1, 4);
            assert!((1..=4).contains(&v));
            seen[(v - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "every value should appear: {:?}", seen);
    }

    #[test]
    fn test_range_inclusive_accepts_reversed_bounds() {
        let mut rng = SimpleRng::new(3);
        for _ in 0..100 {
            let v = rng.range_inclusive(5, 2);
            assert!((2..=5).contains(&v));
        }
        assert_eq!(rng.range_inclusive(6, 6), 6);
    }

    #[test]
    fn test_pick_empty_slice() {
        let mut rng = SimpleRng::new(1);
        let empty: [u8; 0] = [];
        assert_eq!(rng.pick(&empty), None);
        assert_eq!(rng.pick(&[9]), Some(&9));
    }
}
