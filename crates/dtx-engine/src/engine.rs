#![forbid(unsafe_code)]

//! Worker-thread drivers for the core state machines.
//!
//! Each engine spawns one background thread that owns the state machine,
//! sleeps for `next_delay()` between firings, and sends an event per tick
//! through an mpsc channel. The caller polls events at its own pace and
//! controls the worker through the engine handle.
//!
//! A [`RevealEngine`] holds its animation until [`reveal`](RevealEngine::reveal)
//! is called, the equivalent of the content first scrolling into view.
//! The trigger is one-shot: hiding again does not rewind a running
//! animation.

use std::sync::mpsc;
use std::thread;

use dtx_core::{
    ConfigError, LineSnapshot, RevealConfig, Sequence, SequencePlayer, Step, TypeStep, Typewriter,
    TypewriterConfig,
};

use crate::cancel::{Gate, GateControl, Wait};

/// Event from a running [`RevealEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// The reveal trigger fired and playback began.
    Started,
    /// One timer firing was applied. `lines` is the post-tick state of
    /// every line, ready to render.
    Frame {
        step: Step,
        lines: Vec<LineSnapshot>,
    },
    /// Playback reached its terminal state; no further events follow.
    Finished { loops_completed: u32 },
}

/// Drives a [`SequencePlayer`] on a worker thread.
///
/// The worker exits on its own when playback finishes, when the engine
/// is stopped, or when the engine (and with it the event receiver) is
/// dropped.
pub struct RevealEngine {
    events: mpsc::Receiver<RevealEvent>,
    control: GateControl,
    worker: Option<thread::JoinHandle<()>>,
}

impl RevealEngine {
    /// Validate the configuration and spawn the worker. Playback stays
    /// pending until [`reveal`](Self::reveal).
    pub fn spawn(sequence: Sequence, config: RevealConfig) -> Result<Self, ConfigError> {
        let player = SequencePlayer::new(sequence, config)?;
        let (gate, control) = Gate::new(false);
        let (sender, events) = mpsc::channel();

        let worker = thread::spawn(move || drive_reveal(player, gate, sender));

        Ok(Self {
            events,
            control,
            worker: Some(worker),
        })
    }

    /// Trigger playback. Idempotent; later calls have no effect.
    pub fn reveal(&self) {
        self.control.open();
    }

    /// The event channel. `try_recv` it from a render loop, or block on
    /// `recv` when the engine is the only event source.
    pub fn events(&self) -> &mpsc::Receiver<RevealEvent> {
        &self.events
    }

    /// Drain everything the worker has produced so far.
    pub fn drain_events(&self) -> Vec<RevealEvent> {
        self.events.try_iter().collect()
    }

    /// Stop the worker and join it.
    pub fn stop(mut self) {
        self.control.stop();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for RevealEngine {
    fn drop(&mut self) {
        self.control.stop();
        // No join in drop; stop() is the blocking path.
    }
}

fn drive_reveal(
    mut player: SequencePlayer,
    gate: Gate,
    sender: mpsc::Sender<RevealEvent>,
) {
    if !gate.wait_open() {
        tracing::debug!("reveal worker stopped before trigger");
        return;
    }

    player.start();
    tracing::debug!(lines = player.line_count(), "reveal started");
    if sender.send(RevealEvent::Started).is_err() {
        return;
    }

    while let Some(delay) = player.next_delay() {
        if gate.wait_timeout(delay) == Wait::Stopped {
            tracing::debug!("reveal worker stopped");
            return;
        }
        let step = player.tick();
        let event = RevealEvent::Frame {
            step,
            lines: player.snapshot(),
        };
        if sender.send(event).is_err() {
            return;
        }
    }

    tracing::debug!(loops = player.loops_completed(), "reveal finished");
    let _ = sender.send(RevealEvent::Finished {
        loops_completed: player.loops_completed(),
    });
}

/// Event from a running [`TypewriterEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEvent {
    pub step: TypeStep,
    /// The visible prefix after this firing.
    pub display: String,
}

/// Drives a [`Typewriter`] on a worker thread.
///
/// The rotation runs until the engine is stopped or dropped.
pub struct TypewriterEngine {
    events: mpsc::Receiver<TypeEvent>,
    control: GateControl,
    worker: Option<thread::JoinHandle<()>>,
}

impl TypewriterEngine {
    pub fn spawn(
        phrases: impl IntoIterator<Item = impl Into<String>>,
        config: TypewriterConfig,
    ) -> Self {
        let typewriter = Typewriter::new(phrases, config);
        let (gate, control) = Gate::new(true);
        let (sender, events) = mpsc::channel();

        let worker = thread::spawn(move || drive_typewriter(typewriter, gate, sender));

        Self {
            events,
            control,
            worker: Some(worker),
        }
    }

    pub fn events(&self) -> &mpsc::Receiver<TypeEvent> {
        &self.events
    }

    pub fn drain_events(&self) -> Vec<TypeEvent> {
        self.events.try_iter().collect()
    }

    /// Stop the worker and join it.
    pub fn stop(mut self) {
        self.control.stop();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for TypewriterEngine {
    fn drop(&mut self) {
        self.control.stop();
    }
}

fn drive_typewriter(mut typewriter: Typewriter, gate: Gate, sender: mpsc::Sender<TypeEvent>) {
    tracing::debug!("typewriter started");
    while let Some(delay) = typewriter.next_delay() {
        if gate.wait_timeout(delay) == Wait::Stopped {
            tracing::debug!("typewriter worker stopped");
            return;
        }
        let step = typewriter.tick();
        let event = TypeEvent {
            step,
            display: typewriter.display(),
        };
        if sender.send(event).is_err() {
            return;
        }
    }
}
