//! Debounced preview scheduling.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use playground_rs::{BuildCounter, BuildTicket, QUIESCENCE_MS, ReadyFlag, Session, can_build};

struct Inner {
    pending: RefCell<Option<Timeout>>,
    builds: BuildCounter,
    compiler_ready: ReadyFlag,
}

/// Debounces preview rebuilds and tags each one with a build ticket.
///
/// `schedule` restarts the quiescence timer, so a burst of edits
/// collapses into one rebuild running the closure the last call
/// supplied. `force` cancels any pending timer and runs immediately
/// (the format-trigger path). Both honor the compiler-readiness gate:
/// while a typed-script session cannot be built yet the request is
/// dropped, and the readiness flip re-runs the scheduling effect to
/// pick it up.
///
/// Jobs receive a [`BuildTicket`] taken at start; an async job must
/// check [`is_current`](Self::is_current) before publishing so a result
/// superseded while in flight is discarded rather than published.
///
/// Clones share state, so a clone captured by a timer or a future
/// observes the same pending timeout and ticket counter.
#[derive(Clone)]
pub struct PreviewScheduler {
    inner: Rc<Inner>,
}

impl Default for PreviewScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewScheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                pending: RefCell::new(None),
                builds: BuildCounter::new(),
                compiler_ready: ReadyFlag::new(),
            }),
        }
    }

    /// Record that the compiler finished initializing. One-shot.
    pub fn mark_ready(&self) {
        self.inner.compiler_ready.set();
    }

    pub fn is_ready(&self) -> bool {
        self.inner.compiler_ready.get()
    }

    /// Run `job` after the quiescence window, superseding any pending run.
    pub fn schedule(&self, session: &Session, job: impl FnOnce(BuildTicket) + 'static) {
        if !can_build(session, self.inner.compiler_ready.get()) {
            // Deferred: the readiness flip reschedules.
            return;
        }
        let inner = Rc::clone(&self.inner);
        let timeout = Timeout::new(QUIESCENCE_MS, move || {
            inner.pending.borrow_mut().take();
            job(inner.builds.begin());
        });
        if let Some(superseded) = self.inner.pending.borrow_mut().replace(timeout) {
            superseded.cancel();
        }
    }

    /// Run `job` immediately, bypassing the quiescence window but still
    /// honoring the readiness gate.
    pub fn force(&self, session: &Session, job: impl FnOnce(BuildTicket) + 'static) {
        if !can_build(session, self.inner.compiler_ready.get()) {
            return;
        }
        if let Some(superseded) = self.inner.pending.borrow_mut().take() {
            superseded.cancel();
        }
        job(self.inner.builds.begin());
    }

    /// Whether `ticket` still identifies the newest rebuild.
    pub fn is_current(&self, ticket: BuildTicket) -> bool {
        self.inner.builds.is_current(ticket)
    }
}
