#![forbid(unsafe_code)]

//! Timer drivers for `dtx-core` animations.
//!
//! `dtx-core` state machines never touch a clock; this crate supplies the
//! clock. Each engine runs its state machine on a worker thread, applies
//! one `tick()` per elapsed delay, and streams events over an mpsc
//! channel. Workers shut down promptly on stop or drop via a
//! condvar-backed [`Gate`].

pub mod cancel;
pub mod engine;

pub use cancel::{Gate, GateControl, Wait};
pub use engine::{RevealEngine, RevealEvent, TypeEvent, TypewriterEngine};
