//! Deterministic pseudo-random generator
//!
//! MT19937 Mersenne Twister, implemented directly rather than through a
//! third-party RNG crate: runs are compared across machines and tool
//! versions by seed, so the exact output stream is part of the tool's
//! contract. Two generators constructed with the same seed produce
//! identical words forever.
//!
//! Each worker owns one `Prng`, seeded as `base_seed + worker_index`, which
//! makes every worker's operation and content stream reproducible yet
//! distinct.

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// Seeded MT19937 stream
pub struct Prng {
    state: [u32; N],
    index: usize,
}

impl Prng {
    /// Create a generator seeded with `seed`
    pub fn new(seed: u32) -> Self {
        let mut state = [0u32; N];
        state[0] = seed;
        for i in 1..N {
            let y = state[i - 1] ^ (state[i - 1] >> 30);
            state[i] = 0x6c07_8965u32.wrapping_mul(y).wrapping_add(i as u32);
        }
        Self { state, index: 0 }
    }

    /// Regenerate the full state array (the twist transform)
    fn twist(&mut self) {
        for i in 0..N {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            self.state[i] = self.state[(i + M) % N] ^ (y >> 1);
            if y & 1 != 0 {
                self.state[i] ^= MATRIX_A;
            }
        }
    }

    /// Next raw 32-bit word from the stream
    pub fn next_word(&mut self) -> u32 {
        if self.index == 0 {
            self.twist();
        }

        let mut y = self.state[self.index];
        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;

        self.index = (self.index + 1) % N;
        y
    }

    /// Uniform value in `[low, high)`.
    ///
    /// Not perfectly uniform when `high - low` does not divide 2^32; the
    /// modulo bias is accepted and must stay as-is so that seeded traces
    /// keep reproducing.
    pub fn range(&mut self, low: u32, high: u32) -> u32 {
        debug_assert!(low < high);
        low + self.next_word() % (high - low)
    }

    /// Bernoulli draw: true with probability ~`true_ratio`.
    ///
    /// Compares the raw word against a float-scaled threshold, as the
    /// benchmark has always done; rounding at ratio extremes is a documented
    /// approximation, not worth breaking existing seeds over.
    pub fn boolean(&mut self, true_ratio: f64) -> bool {
        f64::from(self.next_word()) <= f64::from(u32::MAX) * true_ratio
    }

    /// Fill `buf` with successive words, truncating the final word to the
    /// remaining byte count
    pub fn fill_bytes(&mut self, buf: &mut [u8]) {
        let mut chunks = buf.chunks_exact_mut(4);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.next_word().to_le_bytes());
        }

        let rem = chunks.into_remainder();
        if !rem.is_empty() {
            let word = self.next_word().to_le_bytes();
            rem.copy_from_slice(&word[..rem.len()]);
        }
    }
}

impl std::fmt::Debug for Prng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prng").field("index", &self.index).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_vector() {
        // First outputs of the reference MT19937 with its default seed.
        let mut prng = Prng::new(5489);
        let expected: [u32; 5] = [
            3499211612, 581869302, 3890346734, 3586334585, 545404204,
        ];
        for &want in &expected {
            assert_eq!(prng.next_word(), want);
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Prng::new(0xdeadbeef);
        let mut b = Prng::new(0xdeadbeef);
        for _ in 0..2000 {
            assert_eq!(a.next_word(), b.next_word());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = Prng::new(1);
        let mut b = Prng::new(2);
        let differs = (0..16).any(|_| a.next_word() != b.next_word());
        assert!(differs);
    }

    #[test]
    fn test_range_bounds() {
        let mut prng = Prng::new(42);
        for _ in 0..10_000 {
            let v = prng.range(10, 20);
            assert!((10..20).contains(&v));
        }
    }

    #[test]
    fn test_range_single_value() {
        let mut prng = Prng::new(42);
        assert_eq!(prng.range(7, 8), 7);
    }

    #[test]
    fn test_boolean_extremes() {
        // ratio 1.0: word <= u32::MAX always holds
        let mut prng = Prng::new(99);
        assert!((0..1000).all(|_| prng.boolean(1.0)));

        // ratio 0.0: true only for the word 0 itself
        let mut draws = Prng::new(99);
        let mut words = Prng::new(99);
        for _ in 0..1000 {
            let b = draws.boolean(0.0);
            assert_eq!(b, words.next_word() == 0);
        }
    }

    #[test]
    fn test_fill_bytes_matches_words() {
        let mut bytes = Prng::new(7);
        let mut words = Prng::new(7);

        let mut buf = [0u8; 11];
        bytes.fill_bytes(&mut buf);

        assert_eq!(&buf[0..4], &words.next_word().to_le_bytes());
        assert_eq!(&buf[4..8], &words.next_word().to_le_bytes());
        // final word truncated to the remaining 3 bytes
        assert_eq!(&buf[8..11], &words.next_word().to_le_bytes()[..3]);
    }

    #[test]
    fn test_fill_bytes_reproducible() {
        let mut a = Prng::new(1234);
        let mut b = Prng::new(1234);
        let mut buf_a = vec![0u8; 4096];
        let mut buf_b = vec![0u8; 4096];
        a.fill_bytes(&mut buf_a);
        b.fill_bytes(&mut buf_b);
        assert_eq!(buf_a, buf_b);
    }
}
