//! Deterministic xorshift32 PRNG with entropy remixing

use chaos_core::Vec2;

/// Nonzero fallback state; xorshift never leaves the all-zero state
const ZERO_STATE_SUBSTITUTE: u32 = 0x9E37_79B9;

/// Seedable generator whose stream can be perturbed by external values
/// (particle positions) without reseeding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChaosRng {
    state: u32,
}

impl ChaosRng {
    pub fn new(seed: u32) -> Self {
        let mut rng = Self { state: 1 };
        rng.seed(seed);
        rng
    }

    /// Restart the stream from `seed`
    pub fn seed(&mut self, seed: u32) {
        self.state = nonzero(fmix32(seed));
    }

    /// Fold an external value into the state. Fractional parts are
    /// discarded, so callers scale small values up first.
    pub fn remix(&mut self, value: f32) {
        let bits = value as i64 as u32;
        self.state = nonzero(self.state ^ fmix32(bits));
        self.next_u32();
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 * (1.0 / 16_777_216.0)
    }

    /// Returns a float in [lo, hi)
    pub fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    /// Returns a vector whose length lies in [inner, outer], uniformly
    /// distributed over the area of that ring
    pub fn ring_vector(&mut self, inner: f32, outer: f32) -> Vec2 {
        let (inner, outer) = if inner <= outer {
            (inner, outer)
        } else {
            (outer, inner)
        };
        if outer <= 0.0 {
            return Vec2::ZERO;
        }
        // Rejection sampling from the enclosing square
        loop {
            let v = Vec2::new(self.uniform(-outer, outer), self.uniform(-outer, outer));
            let len = v.length();
            if len >= inner && len <= outer {
                return v;
            }
        }
    }
}

/// Murmur3 finalizer; spreads low-entropy seeds across all bits
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

fn nonzero(state: u32) -> u32 {
    if state == 0 {
        ZERO_STATE_SUBSTITUTE
    } else {
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_uniform_bounds() {
        let mut rng = ChaosRng::new(42);
        for _ in 0..1000 {
            let v = rng.uniform(0.9, 1.7);
            assert!(v >= 0.9 && v < 1.7);
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = ChaosRng::new(19);
        let mut b = ChaosRng::new(7);
        b.seed(19);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_does_not_stick() {
        let mut rng = ChaosRng::new(0);
        let first = rng.next_u32();
        let second = rng.next_u32();
        assert_ne!(first, 0);
        assert_ne!(first, second);
    }

    #[test]
    fn remix_perturbs_stream() {
        let mut plain = ChaosRng::new(19);
        let mut mixed = ChaosRng::new(19);
        mixed.remix(0.0123 * 1e8);
        assert_ne!(plain.next_u32(), mixed.next_u32());

        // Identical remix inputs stay in lockstep
        let mut a = ChaosRng::new(19);
        let mut b = ChaosRng::new(19);
        a.remix(-4.5e5);
        b.remix(-4.5e5);
        assert_eq!(a, b);
    }

    #[test]
    fn ring_vector_length_in_band() {
        let mut rng = ChaosRng::new(123);
        for _ in 0..500 {
            let len = rng.ring_vector(0.01, 1.0).length();
            assert!(len >= 0.01 && len <= 1.0);
        }
    }

    #[test]
    fn ring_vector_covers_all_quadrants() {
        let mut rng = ChaosRng::new(5);
        let mut quadrants = [false; 4];
        for _ in 0..200 {
            let v = rng.ring_vector(0.5, 1.0);
            let q = (v.x < 0.0) as usize * 2 + (v.y < 0.0) as usize;
            quadrants[q] = true;
        }
        assert!(quadrants.iter().all(|&hit| hit));
    }
}
