//! Lane-parallel xorshift128+ generator.
//!
//! Four independent 64-bit xorshift128+ streams produce 256 bits per step,
//! read as eight 32-bit lanes. Streams are separated by the xorshift128+
//! jump polynomial (2^64 steps per jump), so lanes never overlap and a
//! generator that has been jumped `n` times is disjoint from one jumped
//! any other number of times.

use mandelheat_core::LANES;

const STREAMS: usize = LANES / 2;

/// Jump polynomial advancing a xorshift128+ state by 2^64 steps.
const JUMP: [u64; 2] = [0x8a5c_d789_635d_2dff, 0x121f_d215_5c47_2f96];

/// Scale from a 24-bit integer to `[0, 1)`.
const UNIT_SCALE: f32 = 1.0 / (1u32 << 24) as f32;

#[inline]
fn step(s0: &mut u64, s1: &mut u64) {
    let mut a = *s0;
    let b = *s1;
    *s0 = b;
    a ^= a << 23;
    *s1 = a ^ b ^ (a >> 18) ^ (b >> 5);
}

/// State reached by jumping `(s0, s1)` forward 2^64 steps.
fn jumped(mut s0: u64, mut s1: u64) -> (u64, u64) {
    let mut j0 = 0;
    let mut j1 = 0;
    for word in JUMP {
        for bit in 0..64 {
            if word & (1u64 << bit) != 0 {
                j0 ^= s0;
                j1 ^= s1;
            }
            step(&mut s0, &mut s1);
        }
    }
    (j0, j1)
}

/// Eight-lane uniform random generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorRng {
    s0: [u64; STREAMS],
    s1: [u64; STREAMS],
}

impl VectorRng {
    /// Seed stream 0 with `(key1, key2)`; each further stream is one jump
    /// ahead of the previous one.
    pub fn new(key1: u64, key2: u64) -> Self {
        let mut rng = Self {
            s0: [0; STREAMS],
            s1: [0; STREAMS],
        };
        rng.fill_from(key1, key2);
        rng
    }

    fn fill_from(&mut self, mut s0: u64, mut s1: u64) {
        self.s0[0] = s0;
        self.s1[0] = s1;
        for stream in 1..STREAMS {
            (s0, s1) = jumped(s0, s1);
            self.s0[stream] = s0;
            self.s1[stream] = s1;
        }
    }

    /// Move every stream past the ones currently in use.
    ///
    /// The last stream is jumped once more to become the new first stream,
    /// and the rest are chained from there.
    pub fn jump(&mut self) {
        let (s0, s1) = jumped(self.s0[STREAMS - 1], self.s1[STREAMS - 1]);
        self.fill_from(s0, s1);
    }

    /// Raw per-stream state, for inspection in tests and diagnostics.
    pub fn state(&self) -> [(u64, u64); STREAMS] {
        std::array::from_fn(|i| (self.s0[i], self.s1[i]))
    }

    /// Next 256 random bits as four 64-bit words.
    #[inline]
    pub fn next_u64x4(&mut self) -> [u64; STREAMS] {
        std::array::from_fn(|i| {
            let s0 = self.s1[i];
            step(&mut self.s0[i], &mut self.s1[i]);
            self.s1[i].wrapping_add(s0)
        })
    }

    /// Next 256 random bits as eight 32-bit lanes (low half first).
    #[inline]
    pub fn next_u32x8(&mut self) -> [u32; LANES] {
        let words = self.next_u64x4();
        std::array::from_fn(|lane| {
            let word = words[lane / 2];
            if lane % 2 == 0 {
                word as u32
            } else {
                (word >> 32) as u32
            }
        })
    }

    /// Eight uniform draws from `[0, 1)`.
    #[inline]
    pub fn next_unit(&mut self) -> [f32; LANES] {
        self.next_u32x8().map(|v| (v >> 8) as f32 * UNIT_SCALE)
    }

    /// Eight uniform draws from `[lo, hi)`, remapped from `[0, 1)`.
    #[inline]
    pub fn next_in_range(&mut self, lo: f32, hi: f32) -> [f32; LANES] {
        self.next_unit().map(|u| lo + u * (hi - lo))
    }

    /// Eight uniform draws from `[-1, 1)`.
    #[inline]
    pub fn next_signed_unit(&mut self) -> [f32; LANES] {
        self.next_in_range(-1.0, 1.0)
    }
}
