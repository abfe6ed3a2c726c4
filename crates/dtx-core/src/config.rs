//! Playback configuration and validation.

use std::time::Duration;

use crate::{Alphabet, Sequence};

/// Configuration error detected before playback starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The alphabet is empty but a line contains non-whitespace glyphs,
    /// so there is nothing to sample for its scrambled slots.
    EmptyAlphabet {
        /// Index of the first offending line.
        line: usize,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAlphabet { line } => write!(
                f,
                "alphabet is empty but line {line} has non-whitespace glyphs to scramble"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Timing and sampling options for a reveal sequence.
///
/// Defaults match the classic presentation: a 50 ms reveal cadence, a
/// 300 ms pause between lines, a 10 s pause before the sequence loops,
/// latin letters as the scramble pool, and unbounded looping.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use dtx_core::RevealConfig;
///
/// let config = RevealConfig::default()
///     .tick_interval(Duration::from_millis(40))
///     .loop_delay(Duration::from_secs(5))
///     .max_loops(3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealConfig {
    pub(crate) tick_interval: Duration,
    pub(crate) max_iterations_per_char: u32,
    pub(crate) alphabet: Alphabet,
    pub(crate) inter_line_delay: Duration,
    pub(crate) loop_delay: Duration,
    pub(crate) max_loops: Option<u32>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(50),
            max_iterations_per_char: 10,
            alphabet: Alphabet::default(),
            inter_line_delay: Duration::from_millis(300),
            loop_delay: Duration::from_secs(10),
            max_loops: None,
        }
    }
}

impl RevealConfig {
    /// Delay between successive reveal ticks within a line.
    pub fn tick_interval(self, interval: Duration) -> Self {
        Self {
            tick_interval: interval,
            ..self
        }
    }

    /// Scramble ticks allowed per character before a line is forced to
    /// completion. Guards against a miswired reveal loop ticking forever.
    pub fn max_iterations_per_char(self, iterations: u32) -> Self {
        Self {
            max_iterations_per_char: iterations,
            ..self
        }
    }

    /// Glyph pool sampled for unrevealed positions.
    pub fn alphabet(self, alphabet: Alphabet) -> Self {
        Self { alphabet, ..self }
    }

    /// Pause after a line resolves before the next line begins.
    pub fn inter_line_delay(self, delay: Duration) -> Self {
        Self {
            inter_line_delay: delay,
            ..self
        }
    }

    /// Pause after the last line resolves before the sequence restarts.
    pub fn loop_delay(self, delay: Duration) -> Self {
        Self {
            loop_delay: delay,
            ..self
        }
    }

    /// Cap on full-sequence repetitions; unbounded when never set.
    /// A cap of zero finishes playback immediately on start.
    pub fn max_loops(self, loops: u32) -> Self {
        Self {
            max_loops: Some(loops),
            ..self
        }
    }

    /// Check this configuration against the sequence it will drive.
    ///
    /// An empty alphabet is only legal when every glyph in every line is
    /// whitespace (whitespace is never scrambled, so no sampling occurs).
    /// No fallback pool is ever substituted.
    pub fn validate(&self, sequence: &Sequence) -> Result<(), ConfigError> {
        if self.alphabet.is_empty() {
            for (line, text) in sequence.lines().iter().enumerate() {
                if text.content().chars().any(|c| !c.is_whitespace()) {
                    return Err(ConfigError::EmptyAlphabet { line });
                }
            }
        }
        Ok(())
    }
}
