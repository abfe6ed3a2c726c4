//! Glyph pools sampled for scrambled character slots.

/// The set of glyphs drawn from when rendering a not-yet-revealed,
/// non-whitespace position.
///
/// An alphabet may be empty; whether that is acceptable depends on the
/// text it is paired with. [`RevealConfig::validate`] rejects an empty
/// alphabet whenever any line contains a non-whitespace glyph, since
/// there would be nothing to sample.
///
/// [`RevealConfig::validate`]: crate::RevealConfig::validate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    glyphs: Vec<char>,
}

impl Alphabet {
    /// Upper- and lowercase ASCII letters, the default scramble pool.
    pub const LATIN_LETTERS: &'static str =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

    /// Create an alphabet from any collection of glyphs.
    pub fn new(glyphs: impl IntoIterator<Item = char>) -> Self {
        Self {
            glyphs: glyphs.into_iter().collect(),
        }
    }

    /// The default pool: [`Self::LATIN_LETTERS`].
    pub fn latin_letters() -> Self {
        Self::new(Self::LATIN_LETTERS.chars())
    }

    /// Number of glyphs in the pool.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the pool has no glyphs at all.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index`.
    ///
    /// Indices come from a [`GlyphSource`](crate::GlyphSource) bounded by
    /// [`len`](Self::len); anything out of range is a programmer error and
    /// panics.
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index]
    }

    /// All glyphs in the pool, in insertion order.
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::latin_letters()
    }
}

impl From<&str> for Alphabet {
    fn from(glyphs: &str) -> Self {
        Self::new(glyphs.chars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_latin_letters() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.len(), 52);
        assert_eq!(alphabet.glyph(0), 'A');
        assert_eq!(alphabet.glyph(51), 'z');
    }

    #[test]
    fn from_str_preserves_order() {
        let alphabet = Alphabet::from("xyz");
        assert_eq!(alphabet.glyphs(), &['x', 'y', 'z']);
    }

    #[test]
    fn empty_alphabet_reports_empty() {
        let alphabet = Alphabet::new([]);
        assert!(alphabet.is_empty());
        assert_eq!(alphabet.len(), 0);
    }

    #[test]
    fn duplicate_glyphs_are_kept() {
        // Duplicates skew sampling toward the repeated glyph, which is a
        // legitimate way to weight the pool.
        let alphabet = Alphabet::from("aab");
        assert_eq!(alphabet.len(), 3);
    }
}
