//! Typewriter phrase rotation.
//!
//! Types a phrase one grapheme at a time, holds it, deletes it one
//! grapheme at a time, then moves to the next phrase and wraps around.
//! Same driver contract as [`SequencePlayer`](crate::SequencePlayer):
//! `tick()` applies one timer firing, `next_delay()` says when the next
//! one is due.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

/// Timing knobs for the typewriter cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterConfig {
    /// Delay between typed graphemes.
    pub type_interval: Duration,
    /// How long a fully typed phrase stays on screen.
    pub hold_delay: Duration,
    /// Delay between deleted graphemes.
    pub delete_interval: Duration,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            type_interval: Duration::from_millis(100),
            hold_delay: Duration::from_millis(1500),
            delete_interval: Duration::from_millis(50),
        }
    }
}

/// Which leg of the cycle the current phrase is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePhase {
    /// Graphemes are being appended.
    Typing,
    /// The full phrase is showing.
    Holding,
    /// Graphemes are being removed.
    Deleting,
}

/// What one timer firing did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeStep {
    /// One grapheme appeared.
    Typed,
    /// The phrase finished typing; the hold began.
    HoldStarted,
    /// One grapheme was removed.
    Deleted,
    /// The phrase emptied and rotation moved to `phrase`.
    PhraseAdvanced { phrase: usize },
    /// There are no phrases; nothing will ever be shown.
    Empty,
}

/// Rotates through phrases in a type, hold, delete loop.
///
/// The rotation never terminates on its own; drop the driver to stop it.
pub struct Typewriter {
    phrases: Vec<String>,
    config: TypewriterConfig,
    phrase: usize,
    shown: usize,
    phase: TypePhase,
}

impl Typewriter {
    pub fn new(phrases: impl IntoIterator<Item = impl Into<String>>, config: TypewriterConfig) -> Self {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
            config,
            phrase: 0,
            shown: 0,
            phase: TypePhase::Typing,
        }
    }

    /// The visible prefix of the current phrase.
    pub fn display(&self) -> String {
        match self.phrases.get(self.phrase) {
            Some(phrase) => phrase.graphemes(true).take(self.shown).collect(),
            None => String::new(),
        }
    }

    /// Index of the phrase currently in rotation.
    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn phase(&self) -> TypePhase {
        self.phase
    }

    /// When the next firing is due, or `None` if there is nothing to do.
    pub fn next_delay(&self) -> Option<Duration> {
        if self.phrases.is_empty() {
            return None;
        }
        Some(match self.phase {
            TypePhase::Typing => self.config.type_interval,
            TypePhase::Holding => self.config.hold_delay,
            TypePhase::Deleting => self.config.delete_interval,
        })
    }

    /// Apply one timer firing.
    pub fn tick(&mut self) -> TypeStep {
        let Some(phrase) = self.phrases.get(self.phrase) else {
            return TypeStep::Empty;
        };
        let len = phrase.graphemes(true).count();
        match self.phase {
            TypePhase::Typing => {
                if self.shown < len {
                    self.shown += 1;
                }
                if self.shown == len {
                    self.phase = TypePhase::Holding;
                    TypeStep::HoldStarted
                } else {
                    TypeStep::Typed
                }
            }
            TypePhase::Holding => {
                self.phase = TypePhase::Deleting;
                // The hold elapsing and the first deletion share a firing
                // only when the phrase is already empty.
                if self.shown == 0 {
                    self.advance()
                } else {
                    self.shown -= 1;
                    TypeStep::Deleted
                }
            }
            TypePhase::Deleting => {
                if self.shown > 0 {
                    self.shown -= 1;
                    TypeStep::Deleted
                } else {
                    self.advance()
                }
            }
        }
    }

    fn advance(&mut self) -> TypeStep {
        self.phrase = (self.phrase + 1) % self.phrases.len();
        self.shown = 0;
        self.phase = TypePhase::Typing;
        TypeStep::PhraseAdvanced {
            phrase: self.phrase,
        }
    }
}
