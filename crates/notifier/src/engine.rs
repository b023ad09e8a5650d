//! Suspend/resume debounce state machine.
//!
//! `NotifierEngine` is a pure, `no_std`, allocation-free state machine that
//! tracks whether the device is active, waiting out a deferred suspend, or
//! suspended.  It deliberately has **no** I/O — it does not start timers,
//! touch channels, or call observers.  Those concerns are handled by the
//! [`StateNotifier`](crate::service::StateNotifier) service, which executes
//! the decisions this machine returns.  This separation makes the debounce
//! logic trivially testable on the host.
//!
//! Cancellation uses a generation counter: every resume request bumps the
//! generation, and a deferred suspend action only commits if the generation
//! it was scheduled under is still current.  A resume therefore invalidates
//! any scheduled-but-not-started suspend without needing to reach into the
//! timer that is waiting on it.

use thiserror_no_std::Error;

/// Default suspend defer duration in seconds.
pub const DEFAULT_DEFER_SECS: u32 = 5;

/// Upper bound (inclusive) accepted by [`NotifierEngine::set_defer_secs`].
pub const MAX_DEFER_SECS: u32 = 30;

/// Current notifier state, derived from the internal flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotifierState {
    /// Fully awake; a suspend request will be accepted.
    Active,
    /// A suspend has been requested and its deferred action has not yet
    /// completed (waiting out the defer window, or mid-broadcast).
    SuspendPending,
    /// The suspend action has completed and no resume has occurred since.
    Suspended,
}

/// Errors returned when writing the defer-time tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeferTimeError {
    /// The value exceeds [`MAX_DEFER_SECS`].
    #[error("defer time out of range")]
    OutOfRange,
    /// The value equals the current setting; the write is rejected as a
    /// no-op.
    #[error("defer time unchanged")]
    Unchanged,
}

/// An accepted suspend request: what the worker must schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuspendTicket {
    /// Generation the request was accepted under.  The action only commits
    /// if this is still the current generation when its timer fires.
    pub generation: u32,
    /// Defer duration captured at request time.  A later change to the
    /// tunable never affects an already-issued ticket.
    pub defer_secs: u32,
}

/// Outcome of a resume request: what the worker must be told.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeDecision {
    /// The new (post-bump) generation, to be broadcast on the cancel signal
    /// so a worker parked in the defer window wakes and drops its ticket.
    pub generation: u32,
    /// Whether a resume action must be enqueued: the device is suspended, or
    /// a suspend body is in flight whose effect must be undone once it
    /// drains.
    pub wake_worker: bool,
}

/// Pure state machine for suspend/resume debouncing.
///
/// All fields are private; state is mutated only through the method API.
/// No allocations, no I/O, no hardware dependencies.
pub struct NotifierEngine {
    suspended: bool,
    suspend_pending: bool,
    suspend_running: bool,
    generation: u32,
    defer_secs: u32,
}

impl NotifierEngine {
    /// Create a new engine: active, nothing pending, default defer time.
    pub const fn new() -> Self {
        Self {
            suspended: false,
            suspend_pending: false,
            suspend_running: false,
            generation: 0,
            defer_secs: DEFAULT_DEFER_SECS,
        }
    }

    /// Accept or reject a suspend request.
    ///
    /// Returns `None` (no-op) when the device is already suspended, a
    /// deferred suspend is already scheduled, or a suspend body is currently
    /// executing — at most one suspend action is ever outstanding.
    /// Otherwise marks the suspend pending and returns the ticket the worker
    /// must schedule.
    pub fn request_suspend(&mut self) -> Option<SuspendTicket> {
        if self.suspended || self.suspend_pending || self.suspend_running {
            return None;
        }
        self.suspend_pending = true;
        Some(SuspendTicket {
            generation: self.generation,
            defer_secs: self.defer_secs,
        })
    }

    /// Roll back an accepted suspend request whose ticket could not be
    /// handed to the worker, so a later request can schedule again.
    pub fn abandon_suspend_request(&mut self) {
        self.suspend_pending = false;
    }

    /// Process a resume request.
    ///
    /// Always bumps the generation (invalidating any scheduled suspend
    /// ticket) and clears the pending flag; resuming with nothing pending is
    /// a safe no-op.  The returned decision carries the new generation for
    /// the cancel signal and whether a resume action is needed.
    pub fn request_resume(&mut self) -> ResumeDecision {
        self.generation = self.generation.wrapping_add(1);
        self.suspend_pending = false;
        ResumeDecision {
            generation: self.generation,
            wake_worker: self.suspended || self.suspend_running,
        }
    }

    /// Returns `true` while `generation` is still the current one, i.e. no
    /// resume has invalidated a ticket issued under it.
    ///
    /// The worker checks this before parking in a ticket's defer window:
    /// a superseded ticket is dropped immediately instead of holding the
    /// serial queue open for a window that can never commit.
    pub fn is_ticket_current(&self, generation: u32) -> bool {
        generation == self.generation
    }

    /// The worker's point of no return for a suspend action.
    ///
    /// Succeeds — marking the suspend body as running — only if `generation`
    /// is still current.  A resume that landed after the ticket was issued
    /// (even one racing the timer's expiry) has bumped the generation, and
    /// the stale action must be dropped without side effects.
    pub fn try_begin_suspend(&mut self, generation: u32) -> bool {
        if generation != self.generation {
            return false;
        }
        self.suspend_running = true;
        true
    }

    /// Commit a completed suspend body.
    pub fn complete_suspend(&mut self) {
        self.suspended = true;
        self.suspend_pending = false;
        self.suspend_running = false;
    }

    /// Decide whether a dequeued resume action should run its body.
    ///
    /// Returns `false` for a stale or duplicate wake (the device is already
    /// active); the action is skipped without notifying observers.
    pub fn begin_resume(&self) -> bool {
        self.suspended
    }

    /// Commit a completed resume body.
    pub fn complete_resume(&mut self) {
        self.suspended = false;
    }

    /// Returns `true` once a suspend action has completed and no resume has
    /// occurred since.
    pub fn suspended(&self) -> bool {
        self.suspended
    }

    /// Returns `true` while a suspend request is accepted but its deferred
    /// action has neither completed nor been canceled.
    pub fn suspend_pending(&self) -> bool {
        self.suspend_pending
    }

    /// Return the current [`NotifierState`].
    pub fn state(&self) -> NotifierState {
        if self.suspended {
            NotifierState::Suspended
        } else if self.suspend_pending || self.suspend_running {
            NotifierState::SuspendPending
        } else {
            NotifierState::Active
        }
    }

    /// Return the defer duration in seconds.
    pub fn defer_secs(&self) -> u32 {
        self.defer_secs
    }

    /// Set the defer duration used by subsequent suspend requests.
    ///
    /// An already-issued ticket keeps the duration it was accepted with.
    ///
    /// # Errors
    ///
    /// Returns [`DeferTimeError::OutOfRange`] above [`MAX_DEFER_SECS`] and
    /// [`DeferTimeError::Unchanged`] when `secs` equals the current value.
    pub fn set_defer_secs(&mut self, secs: u32) -> Result<(), DeferTimeError> {
        if secs > MAX_DEFER_SECS {
            return Err(DeferTimeError::OutOfRange);
        }
        if secs == self.defer_secs {
            return Err(DeferTimeError::Unchanged);
        }
        self.defer_secs = secs;
        Ok(())
    }
}

impl Default for NotifierEngine {
    fn default() -> Self {
        Self::new()
    }
}
