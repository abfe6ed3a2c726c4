//! Sequence playback.
//!
//! [`SequencePlayer`] chains per-line reveals into the full animation
//! cycle: reveal each line in order, pause between lines, pause after
//! the last line, then start over, until an optional loop cap is hit.
//!
//! The player never sleeps. It tells its driver how long to wait before
//! the next timer firing ([`next_delay`](SequencePlayer::next_delay))
//! and applies exactly one firing per [`tick`](SequencePlayer::tick).

use std::time::Duration;

use crate::reveal::{LineReveal, LineTick};
use crate::{ConfigError, GlyphSource, RevealConfig, SeededGlyphs, Sequence};

/// Where playback currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not started; no delay is pending.
    Idle,
    /// Revealing the line at this index.
    Revealing(usize),
    /// A line resolved; waiting before the next one starts.
    InterLinePause {
        /// Line that will reveal next.
        next: usize,
    },
    /// The last line resolved; waiting before the sequence restarts.
    LoopPause,
    /// Playback is over (loop cap reached, or the sequence was empty).
    Finished,
}

/// What happened on one timer firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One slot locked on `line` and its unrevealed slots rescrambled.
    Scrambled { line: usize },
    /// `line` resolved and the inter-line pause began.
    LineCompleted { line: usize },
    /// The final line resolved: one full pass is done. Observed before
    /// the loop pause (or before finishing, if the loop cap is hit).
    SequenceCompleted { line: usize, loops_completed: u32 },
    /// The inter-line pause elapsed; `line` is revealing now.
    LineStarted { line: usize },
    /// The loop pause elapsed; all lines reset and the first line is
    /// revealing again. `iteration` counts completed passes so far.
    LoopRestarted { iteration: u32 },
    /// Nothing to do: playback already finished or never started.
    Finished,
}

/// Snapshot of one line, safe to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSnapshot {
    /// The scrambled visual rendering.
    pub display: String,
    /// The final text, exposed for assistive consumption; never
    /// scrambled regardless of animation state.
    pub full_text: String,
    /// Opaque presentation label, passed through unchanged.
    pub style_tag: String,
    /// Locked slot count.
    pub revealed: usize,
    /// Whether the line has fully resolved this pass.
    pub complete: bool,
}

/// Plays a [`Sequence`] through the scramble-then-lock cycle.
pub struct SequencePlayer {
    sequence: Sequence,
    lines: Vec<LineReveal>,
    config: RevealConfig,
    glyphs: Box<dyn GlyphSource + Send>,
    phase: Phase,
    loops_completed: u32,
}

impl SequencePlayer {
    /// Create a player with the default deterministic glyph source.
    pub fn new(sequence: Sequence, config: RevealConfig) -> Result<Self, ConfigError> {
        Self::with_glyph_source(sequence, config, SeededGlyphs::default())
    }

    /// Create a player with an explicit glyph source.
    pub fn with_glyph_source(
        sequence: Sequence,
        config: RevealConfig,
        glyphs: impl GlyphSource + Send + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate(&sequence)?;
        let lines = sequence
            .lines()
            .iter()
            .map(|line| LineReveal::new(line.content()))
            .collect();
        Ok(Self {
            sequence,
            lines,
            config,
            glyphs: Box::new(glyphs),
            phase: Phase::Idle,
            loops_completed: 0,
        })
    }

    /// Begin playback. No-op unless the player is [`Phase::Idle`].
    ///
    /// An empty sequence (or a loop cap of zero) finishes immediately.
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        if self.lines.is_empty() || self.config.max_loops == Some(0) {
            self.phase = Phase::Finished;
            return;
        }
        for line in &mut self.lines {
            line.reset();
        }
        self.phase = Phase::Revealing(0);
    }

    /// How long the driver should wait before calling [`tick`](Self::tick),
    /// or `None` when no firing is pending.
    pub fn next_delay(&self) -> Option<Duration> {
        match self.phase {
            Phase::Idle | Phase::Finished => None,
            Phase::Revealing(_) => Some(self.config.tick_interval),
            Phase::InterLinePause { .. } => Some(self.config.inter_line_delay),
            Phase::LoopPause => Some(self.config.loop_delay),
        }
    }

    /// Apply one timer firing and report what happened.
    ///
    /// Calling this while [`next_delay`](Self::next_delay) is `None` is a
    /// driver bug; it is a no-op that reports [`Step::Finished`].
    pub fn tick(&mut self) -> Step {
        match self.phase {
            Phase::Idle | Phase::Finished => {
                debug_assert!(
                    self.phase == Phase::Finished,
                    "tick() called before start()"
                );
                Step::Finished
            }
            Phase::Revealing(index) => {
                let outcome = self.lines[index].tick(
                    &self.config.alphabet,
                    self.glyphs.as_mut(),
                    self.config.max_iterations_per_char,
                );
                match outcome {
                    LineTick::Scrambled { .. } => Step::Scrambled { line: index },
                    LineTick::Completed | LineTick::ForceCompleted => self.complete_line(index),
                }
            }
            Phase::InterLinePause { next } => {
                self.phase = Phase::Revealing(next);
                Step::LineStarted { line: next }
            }
            Phase::LoopPause => {
                for line in &mut self.lines {
                    line.reset();
                }
                self.phase = Phase::Revealing(0);
                Step::LoopRestarted {
                    iteration: self.loops_completed,
                }
            }
        }
    }

    fn complete_line(&mut self, index: usize) -> Step {
        if index + 1 < self.lines.len() {
            self.phase = Phase::InterLinePause { next: index + 1 };
            Step::LineCompleted { line: index }
        } else {
            self.loops_completed += 1;
            self.phase = match self.config.max_loops {
                Some(cap) if self.loops_completed >= cap => Phase::Finished,
                _ => Phase::LoopPause,
            };
            Step::SequenceCompleted {
                line: index,
                loops_completed: self.loops_completed,
            }
        }
    }

    /// Current playback phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether playback reached its terminal state.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Completed full passes so far.
    pub fn loops_completed(&self) -> u32 {
        self.loops_completed
    }

    /// Number of lines in the sequence.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The string currently shown for `line`.
    pub fn display(&self, line: usize) -> &str {
        self.lines[line].display()
    }

    /// The final text of `line`, for assistive consumption.
    pub fn full_text(&self, line: usize) -> &str {
        self.lines[line].content()
    }

    /// Locked slot count for `line` in the current pass.
    pub fn revealed_count(&self, line: usize) -> usize {
        self.lines[line].revealed_count()
    }

    /// Snapshot every line for rendering.
    pub fn snapshot(&self) -> Vec<LineSnapshot> {
        self.sequence
            .lines()
            .iter()
            .zip(&self.lines)
            .map(|(spec, state)| LineSnapshot {
                display: state.display().to_owned(),
                full_text: state.content().to_owned(),
                style_tag: spec.style_tag().to_owned(),
                revealed: state.revealed_count(),
                complete: state.is_fully_revealed(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextLine;

    fn two_line_player() -> SequencePlayer {
        let sequence = Sequence::from(vec![
            TextLine::new("AB").tag("h1"),
            TextLine::new("cd").tag("p"),
        ]);
        let config = RevealConfig::default().alphabet("X".into()).max_loops(2);
        SequencePlayer::with_glyph_source(sequence, config, First).unwrap()
    }

    struct First;

    impl GlyphSource for First {
        fn next_index(&mut self, _bound: usize) -> usize {
            0
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    #[test]
    fn idle_until_started() {
        let player = two_line_player();
        assert_eq!(player.phase(), Phase::Idle);
        assert_eq!(player.next_delay(), None);
    }

    #[test]
    fn start_is_one_shot() {
        let mut player = two_line_player();
        player.start();
        player.tick();
        let before = player.display(0).to_owned();

        player.start();
        assert_eq!(player.display(0), before);
        assert_eq!(player.phase(), Phase::Revealing(0));
    }

    #[test]
    fn empty_sequence_finishes_on_start() {
        let mut player =
            SequencePlayer::new(Sequence::default(), RevealConfig::default()).unwrap();
        player.start();
        assert!(player.is_finished());
        assert_eq!(player.next_delay(), None);
    }

    #[test]
    fn zero_loop_cap_finishes_on_start() {
        let sequence = Sequence::from(vec![TextLine::new("hi")]);
        let config = RevealConfig::default().max_loops(0);
        let mut player = SequencePlayer::new(sequence, config).unwrap();
        player.start();
        assert!(player.is_finished());
    }

    #[test]
    fn empty_alphabet_rejected_at_construction() {
        let sequence = Sequence::from(vec![TextLine::new("text")]);
        let config = RevealConfig::default().alphabet(crate::Alphabet::new([]));
        assert!(matches!(
            SequencePlayer::new(sequence, config),
            Err(ConfigError::EmptyAlphabet { line: 0 })
        ));
    }

    // ── Full playback walk ──────────────────────────────────────────

    #[test]
    fn walks_the_full_cycle() {
        let mut player = two_line_player();
        player.start();
        assert_eq!(player.phase(), Phase::Revealing(0));

        // Line 0: two reveal ticks, then the completion tick.
        assert_eq!(player.tick(), Step::Scrambled { line: 0 });
        assert_eq!(player.display(0), "AX");
        assert_eq!(player.tick(), Step::Scrambled { line: 0 });
        assert_eq!(player.display(0), "AB");
        assert_eq!(player.tick(), Step::LineCompleted { line: 0 });
        assert_eq!(player.phase(), Phase::InterLinePause { next: 1 });

        // Inter-line pause elapses, line 1 starts.
        assert_eq!(player.tick(), Step::LineStarted { line: 1 });
        assert_eq!(player.phase(), Phase::Revealing(1));

        // Line 1 resolves; this was the last line, so the pass is done.
        player.tick();
        player.tick();
        assert_eq!(
            player.tick(),
            Step::SequenceCompleted {
                line: 1,
                loops_completed: 1
            }
        );
        assert_eq!(player.phase(), Phase::LoopPause);

        // Loop pause elapses: everything resets and line 0 restarts.
        assert_eq!(player.tick(), Step::LoopRestarted { iteration: 1 });
        assert_eq!(player.phase(), Phase::Revealing(0));
        assert_eq!(player.display(0), "AB");
        assert_eq!(player.revealed_count(0), 0);
    }

    #[test]
    fn finishes_when_loop_cap_reached() {
        let mut player = two_line_player();
        player.start();

        // Two full passes with a cap of two.
        for pass in 0..2 {
            if pass > 0 {
                player.tick(); // loop restart
            }
            for _ in 0..3 {
                player.tick(); // line 0
            }
            player.tick(); // line start
            for _ in 0..2 {
                player.tick(); // line 1 reveals
            }
            let step = player.tick(); // line 1 completes
            assert!(matches!(step, Step::SequenceCompleted { .. }));
        }

        assert!(player.is_finished());
        assert_eq!(player.loops_completed(), 2);
        assert_eq!(player.next_delay(), None);
        // Displays hold the fully revealed text.
        assert_eq!(player.display(0), "AB");
        assert_eq!(player.display(1), "cd");
    }

    #[test]
    fn revealed_count_monotonic_within_a_pass() {
        let sequence = Sequence::from(vec![TextLine::new("monotonic")]);
        let mut player =
            SequencePlayer::new(sequence, RevealConfig::default()).unwrap();
        player.start();

        let mut last = 0;
        for _ in 0..9 {
            player.tick();
            let revealed = player.revealed_count(0);
            assert!(revealed >= last);
            last = revealed;
        }
        assert_eq!(last, 9);
    }

    // ── Delays ──────────────────────────────────────────────────────

    #[test]
    fn next_delay_tracks_phase() {
        use std::time::Duration;

        let sequence = Sequence::from(vec![TextLine::new("a"), TextLine::new("b")]);
        let config = RevealConfig::default()
            .tick_interval(Duration::from_millis(1))
            .inter_line_delay(Duration::from_millis(2))
            .loop_delay(Duration::from_millis(3));
        let mut player = SequencePlayer::new(sequence, config).unwrap();

        player.start();
        assert_eq!(player.next_delay(), Some(Duration::from_millis(1)));

        player.tick(); // reveal 'a'
        player.tick(); // complete line 0
        assert_eq!(player.next_delay(), Some(Duration::from_millis(2)));

        player.tick(); // start line 1
        player.tick(); // reveal 'b'
        player.tick(); // complete line 1, pass done
        assert_eq!(player.next_delay(), Some(Duration::from_millis(3)));
    }

    // ── Snapshots ───────────────────────────────────────────────────

    #[test]
    fn snapshot_carries_tags_and_full_text() {
        let mut player = two_line_player();
        player.start();
        player.tick();

        let snapshot = player.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].style_tag, "h1");
        assert_eq!(snapshot[0].full_text, "AB");
        assert_eq!(snapshot[0].display, "AX");
        assert_eq!(snapshot[0].revealed, 1);
        assert!(!snapshot[0].complete);

        // Untouched second line still displays its final text.
        assert_eq!(snapshot[1].display, "cd");
        assert_eq!(snapshot[1].revealed, 0);
    }
}
