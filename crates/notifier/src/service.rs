//! State notifier service — entry points, work queue, and the worker loop.
//!
//! # Architecture
//!
//! [`StateNotifier`] bundles the debounce engine, the observer registry, a
//! work channel, and a cancel signal into one const-constructible service.
//! On hardware it lives in a `static` and [`StateNotifier::run`] is spawned
//! once as an Embassy task; host tests build their own instance and drive
//! `run()` under `select`.
//!
//! The two entry points are synchronous and callable from any task or
//! interrupt context: they mutate the engine under a critical section and
//! hand work to the single worker task over the channel.  Because the worker
//! is serial, the suspend and resume bodies can never run concurrently, and
//! a resume action enqueued while a suspend body is mid-flight cannot start
//! until that body has drained — observers never see `Active` overtake an
//! in-flight `Suspend`.
//!
//! Cancellation never interrupts a running body.  A worker parked in the
//! defer window is woken early by the cancel signal; a worker past the point
//! of no return finishes, and the serialized resume action then undoes its
//! effect.

use core::cell::RefCell;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};

use crate::engine::{DeferTimeError, NotifierEngine, NotifierState};
use crate::event::{StateEvent, StateObserver};
use crate::registry::{ObserverHandle, ObserverRegistry, RegistryError};

/// Depth of the worker's work-item channel.
///
/// The pending flag admits at most one live suspend ticket, and consecutive
/// suspend tickets are always separated by a resume item, so the queue depth
/// stays tiny in practice; 8 leaves headroom for request bursts.
const WORK_DEPTH: usize = 8;

/// Settle window held after each broadcast, before the state flag commits.
/// Gives downstream subsystems time to quiesce on the event.
const QUIESCENCE_HOLD_MS: u64 = 50;

/// Work items handed from the entry points to the worker task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Work {
    /// Wait out the defer window, then broadcast [`StateEvent::Suspend`] and
    /// mark the device suspended — unless the generation has moved on.
    Suspend { generation: u32, defer_secs: u32 },
    /// Broadcast [`StateEvent::Active`] and mark the device active, if it is
    /// actually suspended when the item is processed.
    Resume,
}

/// Suspend/resume state notifier.
///
/// See the [module docs](self) for the concurrency model.
pub struct StateNotifier {
    engine: Mutex<CriticalSectionRawMutex, RefCell<NotifierEngine>>,
    registry: ObserverRegistry,
    work: Channel<CriticalSectionRawMutex, Work, WORK_DEPTH>,
    cancel: Signal<CriticalSectionRawMutex, u32>,
}

impl StateNotifier {
    /// Create a new notifier: active, nothing pending, default defer time.
    pub const fn new() -> Self {
        Self {
            engine: Mutex::new(RefCell::new(NotifierEngine::new())),
            registry: ObserverRegistry::new(),
            work: Channel::new(),
            cancel: Signal::new(),
        }
    }

    /// Register `observer` to receive state events.
    ///
    /// # Errors
    ///
    /// See [`ObserverRegistry::register`].
    pub fn register_observer(
        &self,
        observer: &'static dyn StateObserver,
    ) -> Result<ObserverHandle, RegistryError> {
        self.registry.register(observer)
    }

    /// Remove a previously registered observer.
    ///
    /// # Errors
    ///
    /// See [`ObserverRegistry::unregister`].
    pub fn unregister_observer(&self, handle: ObserverHandle) -> Result<(), RegistryError> {
        self.registry.unregister(handle)
    }

    /// Request a deferred suspend.  Fire-and-forget: never fails.
    ///
    /// A request while the device is already suspended, or while a suspend
    /// action is already outstanding, is a no-op.  An accepted request
    /// schedules the suspend body to run after the current defer time.
    pub fn request_suspend(&self) {
        #[cfg(feature = "defmt")]
        defmt::info!("state notifier: going into suspend");

        let Some(ticket) = self.engine.lock(|e| e.borrow_mut().request_suspend()) else {
            return;
        };
        let item = Work::Suspend {
            generation: ticket.generation,
            defer_secs: ticket.defer_secs,
        };
        if self.work.try_send(item).is_err() {
            // Unreachable with WORK_DEPTH sized as above, but a lost ticket
            // must not leave the pending flag wedged.
            self.engine.lock(|e| e.borrow_mut().abandon_suspend_request());
            #[cfg(feature = "defmt")]
            defmt::warn!("state notifier: work queue full, suspend request dropped");
        }
    }

    /// Request a resume.  Fire-and-forget: never fails.
    ///
    /// Cancels any outstanding deferred suspend: a ticket still waiting out
    /// its defer window is invalidated and the parked worker woken; a suspend
    /// body already past its point of no return drains first, and the resume
    /// action runs serialized behind it.  If the device is (or ends up)
    /// suspended, the resume body broadcasts [`StateEvent::Active`];
    /// otherwise nothing is observable.  Resuming an active device is a safe
    /// no-op.
    pub fn request_resume(&self) {
        #[cfg(feature = "defmt")]
        defmt::info!("state notifier: resuming");

        let decision = self.engine.lock(|e| e.borrow_mut().request_resume());
        self.cancel.signal(decision.generation);
        if decision.wake_worker && self.work.try_send(Work::Resume).is_err() {
            // A full queue here already contains a resume item that will
            // perform the wake; dropping this one is harmless.
            #[cfg(feature = "defmt")]
            defmt::warn!("state notifier: work queue full, resume request coalesced");
        }
    }

    /// Returns `true` once a suspend action has completed and no resume has
    /// occurred since.
    pub fn is_suspended(&self) -> bool {
        self.engine.lock(|e| e.borrow().suspended())
    }

    /// Returns `true` while a suspend request is accepted but its deferred
    /// action has neither completed nor been canceled.
    pub fn suspend_pending(&self) -> bool {
        self.engine.lock(|e| e.borrow().suspend_pending())
    }

    /// Return the current [`NotifierState`].
    pub fn state(&self) -> NotifierState {
        self.engine.lock(|e| e.borrow().state())
    }

    /// Return the defer duration in seconds.
    pub fn defer_time(&self) -> u32 {
        self.engine.lock(|e| e.borrow().defer_secs())
    }

    /// Set the defer duration used by subsequent suspend requests.
    ///
    /// # Errors
    ///
    /// See [`NotifierEngine::set_defer_secs`].
    pub fn set_defer_time(&self, secs: u32) -> Result<(), DeferTimeError> {
        self.engine.lock(|e| e.borrow_mut().set_defer_secs(secs))
    }

    /// The worker loop.  Spawn exactly once; never returns.
    ///
    /// All suspend and resume bodies execute here, serially, so they can
    /// never race each other or deliver events out of order.
    pub async fn run(&self) -> ! {
        loop {
            match self.work.receive().await {
                Work::Suspend {
                    generation,
                    defer_secs,
                } => self.perform_suspend(generation, defer_secs).await,
                Work::Resume => self.perform_resume().await,
            }
        }
    }

    /// Suspend body: defer window, broadcast, quiescence, commit.
    async fn perform_suspend(&self, generation: u32, defer_secs: u32) {
        if !self.engine.lock(|e| e.borrow().is_ticket_current(generation)) {
            // Superseded while queued; don't hold the worker parked in a
            // window that can never commit.
            return;
        }
        let defer = Timer::after(Duration::from_secs(u64::from(defer_secs)));
        if let Either::Second(()) = select(defer, self.canceled(generation)).await {
            // Resume arrived inside the defer window; the suspend never
            // becomes observable.
            return;
        }
        let proceed = self
            .engine
            .lock(|e| e.borrow_mut().try_begin_suspend(generation));
        if !proceed {
            // A resume raced the timer's expiry and won.
            return;
        }

        self.registry.notify(StateEvent::Suspend);
        Timer::after_millis(QUIESCENCE_HOLD_MS).await;
        self.engine.lock(|e| e.borrow_mut().complete_suspend());

        #[cfg(feature = "defmt")]
        defmt::info!("state notifier: successfully suspended");
    }

    /// Resume body: broadcast, quiescence, commit.
    async fn perform_resume(&self) {
        if !self.engine.lock(|e| e.borrow().begin_resume()) {
            // Stale or duplicate wake; the device is already active.
            return;
        }

        self.registry.notify(StateEvent::Active);
        Timer::after_millis(QUIESCENCE_HOLD_MS).await;
        self.engine.lock(|e| e.borrow_mut().complete_resume());

        #[cfg(feature = "defmt")]
        defmt::info!("state notifier: successfully resumed");
    }

    /// Resolves when the ticket scheduled under `generation` is canceled.
    ///
    /// The cancel signal always carries the latest generation.  A value equal
    /// to ours is a leftover from before our ticket was issued (resumes bump
    /// before signaling, so a genuine cancel is always newer) and is ignored.
    async fn canceled(&self, generation: u32) {
        loop {
            if self.cancel.wait().await != generation {
                return;
            }
        }
    }
}

impl Default for StateNotifier {
    fn default() -> Self {
        Self::new()
    }
}
