#![forbid(unsafe_code)]

//! Core reveal logic for Decryptext.
//!
//! This crate contains the pure, timer-free state machines behind the
//! decrypt-style text animations:
//!
//! - **Scramble reveal**: characters lock in left-to-right at a fixed
//!   cadence while not-yet-revealed positions cycle through random glyphs
//!   ([`LineReveal`], [`SequencePlayer`])
//! - **Typewriter rotation**: phrases typed out, held, deleted, and
//!   advanced in a loop ([`Typewriter`])
//!
//! Nothing in this crate schedules work or touches a clock. Each state
//! machine exposes `tick()` (apply one timer firing) and `next_delay()`
//! (how long the caller should wait before the next one), so the driver
//! owns all timing, whether that is the `dtx-engine` worker thread, a
//! test, or any event loop. Random glyph selection goes through the
//! [`GlyphSource`] trait
//! for the same reason: tests can substitute a fixed source and assert
//! exact output.
//!
//! # Example
//!
//! ```
//! use dtx_core::{RevealConfig, Sequence, SequencePlayer, Step, TextLine};
//!
//! let sequence = Sequence::from(vec![TextLine::new("HI").tag("title")]);
//! let mut player = SequencePlayer::new(sequence, RevealConfig::default()).unwrap();
//! player.start();
//!
//! // Two ticks lock both characters; the third observes completion.
//! player.tick();
//! player.tick();
//! assert_eq!(player.display(0), "HI");
//! assert!(matches!(player.tick(), Step::SequenceCompleted { .. }));
//! ```

pub mod alphabet;
pub mod config;
pub mod glyph;
pub mod line;
pub mod player;
pub mod reveal;
pub mod typewriter;

pub use alphabet::Alphabet;
pub use config::{ConfigError, RevealConfig};
pub use glyph::{GlyphSource, SeededGlyphs};
pub use line::{Sequence, TextLine};
pub use player::{LineSnapshot, Phase, SequencePlayer, Step};
pub use reveal::{LineReveal, LineTick};
pub use typewriter::{TypePhase, TypeStep, Typewriter, TypewriterConfig};
