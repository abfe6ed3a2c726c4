//! Per-line reveal state.
//!
//! A [`LineReveal`] owns the animation state of one line: which glyph
//! slots are locked to their final value and what the line currently
//! displays. Slots are Unicode grapheme clusters, so a combining
//! sequence or emoji locks as one unit and the displayed string always
//! has the same slot count as the source text.

use unicode_segmentation::UnicodeSegmentation;

use crate::{Alphabet, GlyphSource};

/// Outcome of one reveal tick for a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTick {
    /// One more slot locked; every unrevealed slot was rescrambled.
    Scrambled {
        /// Slot index that locked on this tick.
        index: usize,
    },
    /// The line was already fully revealed when the tick fired; the
    /// display now equals the final content.
    Completed,
    /// The safety bound tripped and the line jumped straight to its
    /// fully revealed state.
    ForceCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    start: usize,
    end: usize,
    whitespace: bool,
}

/// Animation state for one line of text.
///
/// Reveal order is strictly left-to-right, so the locked set is always a
/// prefix; it grows by one slot per tick and only resets via
/// [`reset`](Self::reset) when a new playback pass begins. Whitespace
/// slots are treated as revealed from the start and are never scrambled.
///
/// Until the first tick fires the display equals the final content, so
/// cancelling a pending animation leaves no visible trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReveal {
    content: String,
    slots: Vec<Slot>,
    revealed: usize,
    ticks: u64,
    display: String,
}

impl LineReveal {
    /// Create the reveal state for `content`.
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let slots = content
            .grapheme_indices(true)
            .map(|(start, grapheme)| Slot {
                start,
                end: start + grapheme.len(),
                whitespace: grapheme.chars().all(char::is_whitespace),
            })
            .collect();
        let display = content.clone();
        Self {
            content,
            slots,
            revealed: 0,
            ticks: 0,
            display,
        }
    }

    /// Number of glyph slots (grapheme clusters) in the line.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the line has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The final text of the line.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The string currently shown for this line.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// How many slots have locked during the current pass.
    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// Whether slot `index` currently shows its final glyph.
    ///
    /// Whitespace slots count as revealed from tick zero.
    pub fn is_revealed(&self, index: usize) -> bool {
        index < self.revealed || self.slots[index].whitespace
    }

    /// Whether every slot has locked.
    pub fn is_fully_revealed(&self) -> bool {
        self.revealed >= self.slots.len()
    }

    /// Reset to the pre-animation state for a new pass.
    pub fn reset(&mut self) {
        self.revealed = 0;
        self.ticks = 0;
        self.display.clone_from(&self.content);
    }

    /// Apply one timer firing.
    ///
    /// Locks the next slot and rescrambles the rest, or reports
    /// completion if the line already resolved on an earlier tick. After
    /// `max_iterations_per_char × len` ticks the line force-completes so
    /// playback terminates even if the surrounding loop is miswired.
    pub fn tick(
        &mut self,
        alphabet: &Alphabet,
        glyphs: &mut dyn GlyphSource,
        max_iterations_per_char: u32,
    ) -> LineTick {
        let len = self.slots.len();
        if self.revealed >= len {
            self.display.clone_from(&self.content);
            return LineTick::Completed;
        }

        let index = self.revealed;
        self.revealed += 1;
        self.ticks += 1;

        if self.ticks >= u64::from(max_iterations_per_char) * len as u64 {
            self.revealed = len;
            self.display.clone_from(&self.content);
            return LineTick::ForceCompleted;
        }

        self.rescramble(alphabet, glyphs);
        LineTick::Scrambled { index }
    }

    fn rescramble(&mut self, alphabet: &Alphabet, glyphs: &mut dyn GlyphSource) {
        let mut out = String::with_capacity(self.content.len());
        for (index, slot) in self.slots.iter().enumerate() {
            if index < self.revealed || slot.whitespace {
                out.push_str(&self.content[slot.start..slot.end]);
            } else {
                out.push(alphabet.glyph(glyphs.next_index(alphabet.len())));
            }
        }
        self.display = out;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always yields index 0, so the scramble glyph is the alphabet's
    /// first entry. Makes displayed strings exactly predictable.
    struct FirstGlyph;

    impl GlyphSource for FirstGlyph {
        fn next_index(&mut self, _bound: usize) -> usize {
            0
        }
    }

    #[test]
    fn display_starts_as_content() {
        let line = LineReveal::new("Hello World");
        assert_eq!(line.display(), "Hello World");
        assert_eq!(line.revealed_count(), 0);
    }

    #[test]
    fn tick_locks_left_to_right() {
        let alphabet = Alphabet::from("X");
        let mut line = LineReveal::new("AB");
        let mut glyphs = FirstGlyph;

        assert_eq!(
            line.tick(&alphabet, &mut glyphs, 10),
            LineTick::Scrambled { index: 0 }
        );
        assert_eq!(line.display(), "AX");

        assert_eq!(
            line.tick(&alphabet, &mut glyphs, 10),
            LineTick::Scrambled { index: 1 }
        );
        assert_eq!(line.display(), "AB");

        assert_eq!(line.tick(&alphabet, &mut glyphs, 10), LineTick::Completed);
        assert_eq!(line.display(), "AB");
    }

    #[test]
    fn fully_revealed_after_len_ticks() {
        let alphabet = Alphabet::default();
        let mut line = LineReveal::new("reveal");
        let mut glyphs = crate::SeededGlyphs::default();

        for _ in 0.."reveal".len() {
            line.tick(&alphabet, &mut glyphs, 10);
        }
        assert!(line.is_fully_revealed());
        assert_eq!(line.display(), "reveal");
    }

    #[test]
    fn whitespace_is_never_scrambled() {
        let alphabet = Alphabet::from("X");
        let mut line = LineReveal::new("A B");
        let mut glyphs = FirstGlyph;

        assert!(line.is_revealed(1));
        line.tick(&alphabet, &mut glyphs, 10);
        assert_eq!(line.display(), "A X");
        line.tick(&alphabet, &mut glyphs, 10);
        assert_eq!(line.display(), "A X");
        line.tick(&alphabet, &mut glyphs, 10);
        assert_eq!(line.display(), "A B");
    }

    #[test]
    fn revealed_prefix_always_shows_final_glyphs() {
        let alphabet = Alphabet::default();
        let mut line = LineReveal::new("scramble me");
        let mut glyphs = crate::SeededGlyphs::new(7);

        for _ in 0..5 {
            line.tick(&alphabet, &mut glyphs, 10);
        }
        let display: Vec<&str> = line.display().graphemes(true).collect();
        let content: Vec<&str> = line.content().graphemes(true).collect();
        for index in 0..line.len() {
            if line.is_revealed(index) {
                assert_eq!(display[index], content[index]);
            }
        }
    }

    #[test]
    fn grapheme_clusters_lock_as_one_slot() {
        // Combining acute on 'e': one slot, two chars.
        let content = "e\u{301}x";
        let alphabet = Alphabet::from("Z");
        let mut line = LineReveal::new(content);
        let mut glyphs = FirstGlyph;

        assert_eq!(line.len(), 2);
        line.tick(&alphabet, &mut glyphs, 10);
        assert_eq!(line.display(), "e\u{301}Z");
        line.tick(&alphabet, &mut glyphs, 10);
        assert_eq!(line.display(), content);
    }

    #[test]
    fn display_slot_count_is_stable() {
        let alphabet = Alphabet::default();
        let mut line = LineReveal::new("stable width");
        let mut glyphs = crate::SeededGlyphs::default();

        for _ in 0..20 {
            line.tick(&alphabet, &mut glyphs, 10);
            assert_eq!(line.display().graphemes(true).count(), line.len());
        }
    }

    #[test]
    fn force_completes_at_safety_bound() {
        let alphabet = Alphabet::from("X");
        let mut line = LineReveal::new("abcd");
        let mut glyphs = FirstGlyph;

        // max one iteration per char: bound is 4 ticks for 4 slots.
        let mut outcome = LineTick::Completed;
        for _ in 0..4 {
            outcome = line.tick(&alphabet, &mut glyphs, 1);
        }
        assert_eq!(outcome, LineTick::ForceCompleted);
        assert_eq!(line.display(), "abcd");
        assert!(line.is_fully_revealed());
    }

    #[test]
    fn empty_line_completes_immediately() {
        let alphabet = Alphabet::default();
        let mut line = LineReveal::new("");
        let mut glyphs = FirstGlyph;
        assert_eq!(line.tick(&alphabet, &mut glyphs, 10), LineTick::Completed);
        assert_eq!(line.display(), "");
    }

    #[test]
    fn reset_restores_pre_animation_state() {
        let alphabet = Alphabet::from("X");
        let mut line = LineReveal::new("ab");
        let mut glyphs = FirstGlyph;

        line.tick(&alphabet, &mut glyphs, 10);
        assert_eq!(line.display(), "aX");

        line.reset();
        assert_eq!(line.display(), "ab");
        assert_eq!(line.revealed_count(), 0);
        assert!(!line.is_fully_revealed());
    }
}
