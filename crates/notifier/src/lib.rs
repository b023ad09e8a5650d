//! Device suspend/resume state notifier.
//!
//! Broadcasts suspend/resume transitions to interested subsystems, debouncing
//! rapid toggles: a suspend request is held back for a configurable defer
//! window, and a resume arriving inside that window cancels it outright — no
//! observer ever hears about it.
//!
//! # Architecture
//!
//! ```text
//! request_suspend / request_resume   (any task or ISR context, synchronous)
//!         ↓
//! NotifierEngine                     (pure debounce state machine)
//!         ↓ work items
//! StateNotifier::run                 (single serial worker task)
//!         ↓ fan-out
//! ObserverRegistry                   (callbacks in registration order)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use notifier::{StateEvent, StateNotifier, StateObserver};
//!
//! struct Logger;
//! impl StateObserver for Logger {
//!     fn on_state_event(&self, _event: StateEvent) { /* ... */ }
//! }
//!
//! static NOTIFIER: StateNotifier = StateNotifier::new();
//! static LOGGER: Logger = Logger;
//!
//! # async fn example() {
//! NOTIFIER.register_observer(&LOGGER).unwrap();
//! NOTIFIER.request_suspend();
//! # }
//! // Somewhere, exactly once: NOTIFIER.run().await
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod engine;
pub mod event;
pub mod registry;
pub mod service;

// Re-export the public surface.
pub use engine::{
    DeferTimeError, NotifierEngine, NotifierState, DEFAULT_DEFER_SECS, MAX_DEFER_SECS,
};
pub use event::{StateEvent, StateObserver};
pub use registry::{ObserverHandle, ObserverRegistry, RegistryError, MAX_OBSERVERS};
pub use service::StateNotifier;

#[cfg(test)]
mod tests {
    /// Debounce state machine tests
    mod engine_tests {
        use crate::engine::{
            DeferTimeError, NotifierEngine, NotifierState, DEFAULT_DEFER_SECS,
        };

        #[test]
        fn test_engine_starts_active() {
            let engine = NotifierEngine::new();
            assert_eq!(engine.state(), NotifierState::Active);
            assert!(!engine.suspended());
            assert!(!engine.suspend_pending());
        }

        #[test]
        fn test_suspend_request_issues_ticket_with_current_defer() {
            let mut engine = NotifierEngine::new();
            let ticket = engine.request_suspend().expect("first request is accepted");
            assert_eq!(ticket.defer_secs, DEFAULT_DEFER_SECS);
            assert_eq!(engine.state(), NotifierState::SuspendPending);
        }

        #[test]
        fn test_second_suspend_request_is_noop() {
            let mut engine = NotifierEngine::new();
            engine.request_suspend().expect("first request is accepted");
            assert_eq!(engine.request_suspend(), None);
        }

        #[test]
        fn test_suspend_request_while_suspended_is_noop() {
            let mut engine = NotifierEngine::new();
            let ticket = engine.request_suspend().expect("request accepted");
            assert!(engine.try_begin_suspend(ticket.generation));
            engine.complete_suspend();
            assert_eq!(engine.state(), NotifierState::Suspended);
            assert_eq!(engine.request_suspend(), None);
        }

        #[test]
        fn test_resume_supersedes_queued_ticket() {
            let mut engine = NotifierEngine::new();
            let ticket = engine.request_suspend().expect("request accepted");
            assert!(engine.is_ticket_current(ticket.generation));
            engine.request_resume();
            assert!(!engine.is_ticket_current(ticket.generation));
        }

        #[test]
        fn test_resume_invalidates_pending_ticket() {
            let mut engine = NotifierEngine::new();
            let ticket = engine.request_suspend().expect("request accepted");
            let decision = engine.request_resume();
            // Not suspended, no body running: nothing to wake.
            assert!(!decision.wake_worker);
            assert!(!engine.suspend_pending());
            // The stale ticket must not be allowed to commit.
            assert!(!engine.try_begin_suspend(ticket.generation));
            assert_eq!(engine.state(), NotifierState::Active);
        }

        #[test]
        fn test_full_suspend_cycle() {
            let mut engine = NotifierEngine::new();
            let ticket = engine.request_suspend().expect("request accepted");
            assert!(engine.try_begin_suspend(ticket.generation));
            engine.complete_suspend();
            assert!(engine.suspended());
            assert!(!engine.suspend_pending());
        }

        #[test]
        fn test_resume_from_suspended_wakes_worker() {
            let mut engine = NotifierEngine::new();
            let ticket = engine.request_suspend().expect("request accepted");
            assert!(engine.try_begin_suspend(ticket.generation));
            engine.complete_suspend();

            let decision = engine.request_resume();
            assert!(decision.wake_worker);
            assert!(engine.begin_resume());
            engine.complete_resume();
            assert_eq!(engine.state(), NotifierState::Active);
        }

        #[test]
        fn test_resume_during_running_body_wakes_worker() {
            let mut engine = NotifierEngine::new();
            let ticket = engine.request_suspend().expect("request accepted");
            assert!(engine.try_begin_suspend(ticket.generation));
            // Body in flight: the resume must schedule a wake to undo its
            // effect once it drains.
            let decision = engine.request_resume();
            assert!(decision.wake_worker);
            // The body drains and commits; the queued resume then runs.
            engine.complete_suspend();
            assert!(engine.begin_resume());
            engine.complete_resume();
            assert_eq!(engine.state(), NotifierState::Active);
        }

        #[test]
        fn test_suspend_request_during_running_body_is_noop() {
            let mut engine = NotifierEngine::new();
            let ticket = engine.request_suspend().expect("request accepted");
            assert!(engine.try_begin_suspend(ticket.generation));
            engine.request_resume();
            // Pending flag is clear, but the body is still draining.
            assert_eq!(engine.request_suspend(), None);
        }

        #[test]
        fn test_stale_resume_action_is_skipped() {
            let engine = NotifierEngine::new();
            assert!(!engine.begin_resume());
        }

        #[test]
        fn test_resume_when_active_is_noop() {
            let mut engine = NotifierEngine::new();
            let decision = engine.request_resume();
            assert!(!decision.wake_worker);
            assert_eq!(engine.state(), NotifierState::Active);
        }

        #[test]
        fn test_abandoned_request_can_be_retried() {
            let mut engine = NotifierEngine::new();
            engine.request_suspend().expect("request accepted");
            engine.abandon_suspend_request();
            assert!(engine.request_suspend().is_some());
        }

        #[test]
        fn test_defer_time_default() {
            let engine = NotifierEngine::new();
            assert_eq!(engine.defer_secs(), 5);
        }

        #[test]
        fn test_defer_time_above_max_rejected() {
            let mut engine = NotifierEngine::new();
            assert_eq!(engine.set_defer_secs(31), Err(DeferTimeError::OutOfRange));
            assert_eq!(engine.defer_secs(), DEFAULT_DEFER_SECS);
        }

        #[test]
        fn test_defer_time_unchanged_rejected() {
            let mut engine = NotifierEngine::new();
            assert_eq!(
                engine.set_defer_secs(DEFAULT_DEFER_SECS),
                Err(DeferTimeError::Unchanged)
            );
        }

        #[test]
        fn test_defer_time_bounds_accepted() {
            let mut engine = NotifierEngine::new();
            engine.set_defer_secs(0).expect("0 is in range");
            engine.set_defer_secs(30).expect("30 is in range");
            assert_eq!(engine.defer_secs(), 30);
        }

        #[test]
        fn test_defer_time_change_applies_to_next_ticket() {
            let mut engine = NotifierEngine::new();
            engine.set_defer_secs(10).expect("10 is in range");
            let ticket = engine.request_suspend().expect("request accepted");
            assert_eq!(ticket.defer_secs, 10);
        }
    }

    /// Observer registry tests
    mod registry_tests {
        use std::sync::Mutex;

        use crate::event::{StateEvent, StateObserver};
        use crate::registry::{ObserverRegistry, RegistryError, MAX_OBSERVERS};

        /// Appends `(tag, event)` to a shared log on every callback.
        struct RecordingObserver {
            tag: u8,
            log: &'static Mutex<Vec<(u8, StateEvent)>>,
        }

        impl StateObserver for RecordingObserver {
            fn on_state_event(&self, event: StateEvent) {
                self.log.lock().unwrap().push((self.tag, event));
            }
        }

        fn leak_observer(tag: u8, log: &'static Mutex<Vec<(u8, StateEvent)>>) -> &'static RecordingObserver {
            Box::leak(Box::new(RecordingObserver { tag, log }))
        }

        fn leak_log() -> &'static Mutex<Vec<(u8, StateEvent)>> {
            Box::leak(Box::new(Mutex::new(Vec::new())))
        }

        #[test]
        fn test_notify_runs_in_registration_order() {
            let log = leak_log();
            let registry = ObserverRegistry::new();
            registry.register(leak_observer(1, log)).unwrap();
            registry.register(leak_observer(2, log)).unwrap();
            registry.register(leak_observer(3, log)).unwrap();

            registry.notify(StateEvent::Suspend);
            let events = log.lock().unwrap();
            assert_eq!(
                *events,
                vec![
                    (1, StateEvent::Suspend),
                    (2, StateEvent::Suspend),
                    (3, StateEvent::Suspend)
                ]
            );
        }

        #[test]
        fn test_duplicate_registration_rejected() {
            let log = leak_log();
            let registry = ObserverRegistry::new();
            let observer = leak_observer(1, log);
            registry.register(observer).unwrap();
            assert_eq!(
                registry.register(observer),
                Err(RegistryError::AlreadyRegistered)
            );
            assert_eq!(registry.len(), 1);
        }

        #[test]
        fn test_unregistered_observer_receives_nothing() {
            let log = leak_log();
            let registry = ObserverRegistry::new();
            let keep = registry.register(leak_observer(1, log)).unwrap();
            let drop_handle = registry.register(leak_observer(2, log)).unwrap();
            registry.unregister(drop_handle).unwrap();

            registry.notify(StateEvent::Active);
            let events = log.lock().unwrap();
            assert_eq!(*events, vec![(1, StateEvent::Active)]);
            let _ = keep;
        }

        #[test]
        fn test_unregister_unknown_handle_rejected() {
            let log = leak_log();
            let registry = ObserverRegistry::new();
            let handle = registry.register(leak_observer(1, log)).unwrap();
            registry.unregister(handle).unwrap();
            assert_eq!(registry.unregister(handle), Err(RegistryError::NotRegistered));
        }

        #[test]
        fn test_table_capacity_enforced() {
            let log = leak_log();
            let registry = ObserverRegistry::new();
            for tag in 0..MAX_OBSERVERS {
                #[allow(clippy::cast_possible_truncation)]
                registry.register(leak_observer(tag as u8, log)).unwrap();
            }
            assert_eq!(
                registry.register(leak_observer(0xFF, log)),
                Err(RegistryError::Full)
            );
        }

        #[test]
        fn test_empty_registry_notify_is_noop() {
            let registry = ObserverRegistry::new();
            assert!(registry.is_empty());
            registry.notify(StateEvent::Suspend);
        }
    }
}
