#![forbid(unsafe_code)]

//! Cancellation and visibility gating for animation workers.
//!
//! An animation worker blocks between timer firings. Both of those waits
//! must be interruptible: the owner can stop the worker at any time, and
//! a reveal worker additionally holds off until its content first becomes
//! visible. [`Gate`] (worker side) and [`GateControl`] (owner side) share
//! one condition variable so every wait wakes promptly on either change.

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GateState {
    open: bool,
    stopped: bool,
}

/// Outcome of a timed wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    /// The full duration elapsed; the pending timer firing is due.
    TimedOut,
    /// The owner stopped the worker.
    Stopped,
}

/// Worker-side view of the gate.
///
/// Cloneable so a worker can hand it to helpers; all clones observe the
/// same state.
#[derive(Clone)]
pub struct Gate {
    inner: Arc<(Mutex<GateState>, Condvar)>,
}

impl Gate {
    /// Create a gate pair. `open` is the initial visibility.
    pub fn new(open: bool) -> (Self, GateControl) {
        let inner = Arc::new((
            Mutex::new(GateState {
                open,
                stopped: false,
            }),
            Condvar::new(),
        ));
        let gate = Self {
            inner: inner.clone(),
        };
        let control = GateControl { inner };
        (gate, control)
    }

    /// Whether the owner has stopped the worker.
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        lock.lock().unwrap().stopped
    }

    /// Block until the gate opens. Returns `false` if the worker was
    /// stopped before (or instead of) the gate opening.
    pub fn wait_open(&self) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut state = lock.lock().unwrap();
        while !state.open && !state.stopped {
            state = cvar.wait(state).unwrap();
        }
        !state.stopped
    }

    /// Wait for either a stop or the timeout, whichever comes first.
    ///
    /// Loops on the condition variable so spurious wakeups and visibility
    /// changes do not cut the wait short.
    pub fn wait_timeout(&self, duration: Duration) -> Wait {
        let (lock, cvar) = &*self.inner;
        let mut state = lock.lock().unwrap();
        if state.stopped {
            return Wait::Stopped;
        }

        let start = Instant::now();
        let mut remaining = duration;

        loop {
            let (guard, result) = cvar.wait_timeout(state, remaining).unwrap();
            state = guard;
            if state.stopped {
                return Wait::Stopped;
            }
            if result.timed_out() {
                return Wait::TimedOut;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return Wait::TimedOut;
            }
            remaining = duration - elapsed;
        }
    }
}

/// Owner-side control half of a [`Gate`].
pub struct GateControl {
    inner: Arc<(Mutex<GateState>, Condvar)>,
}

impl GateControl {
    /// Open the gate, waking any worker blocked in
    /// [`Gate::wait_open`].
    pub fn open(&self) {
        self.set(|state| state.open = true);
    }

    /// Close the gate. Workers already past their open wait are not
    /// affected.
    pub fn close(&self) {
        self.set(|state| state.open = false);
    }

    /// Stop the worker, waking every pending wait.
    pub fn stop(&self) {
        self.set(|state| state.stopped = true);
    }

    fn set(&self, change: impl FnOnce(&mut GateState)) {
        let (lock, cvar) = &*self.inner;
        let mut state = lock.lock().unwrap();
        change(&mut state);
        cvar.notify_all();
    }
}
