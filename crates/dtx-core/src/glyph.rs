//! Random glyph index sources.
//!
//! Scramble output is a pure function of the reveal state plus a stream
//! of random indices. The stream is abstracted behind [`GlyphSource`] so
//! tests can pin it down and assert exact displayed strings.

/// Source of random indices into an alphabet.
pub trait GlyphSource {
    /// Next index, uniformly distributed in `0..bound`.
    ///
    /// Callers guarantee `bound > 0`.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Deterministic splitmix64 index source.
///
/// The same seed always produces the same scramble stream, which keeps
/// the animation reproducible across runs and in snapshots. This is not
/// a cryptographic generator and does not need to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededGlyphs {
    state: u64,
}

impl SeededGlyphs {
    /// Create a source from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl Default for SeededGlyphs {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl GlyphSource for SeededGlyphs {
    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "sampling from an empty alphabet");
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z % bound as u64) as usize
    }
}
