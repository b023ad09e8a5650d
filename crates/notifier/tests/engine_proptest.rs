//! Property-based tests for the debounce state machine.
//! Verifies invariants hold for ALL request/worker interleavings, not just
//! fixed examples.  The worker is modeled as the real one: a serial queue of
//! suspend tickets and resume wakes, processing one body at a time.

use std::collections::VecDeque;

use notifier::NotifierEngine;

/// What the modeled worker is currently executing.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Body {
    Suspend,
    Resume,
}

/// Queued work, as the service would enqueue it.
#[derive(Clone, Copy)]
enum Item {
    /// A suspend ticket and the generation it was issued under.
    Suspend(u32),
    Resume,
}

proptest::proptest! {
    /// Any interleaving of requests, timer expiries, and body completions
    /// keeps the flags coherent: `suspended` and `suspend_pending` are never
    /// both set, at most one suspend ticket is ever live, and a ticket
    /// invalidated by a resume can never commit.
    #[test]
    fn flags_stay_coherent_under_any_interleaving(ops in proptest::collection::vec(0u8..4u8, 0..128)) {
        let mut engine = NotifierEngine::new();
        let mut queue: VecDeque<Item> = VecDeque::new();
        let mut resumed_since: Vec<u32> = Vec::new(); // generations invalidated by a resume
        let mut running: Option<Body> = None;

        for op in ops {
            match op {
                // Caller: suspend request.
                0 => {
                    if let Some(ticket) = engine.request_suspend() {
                        // At most one live ticket: every earlier ticket in the
                        // queue must already be invalidated.
                        for item in &queue {
                            if let Item::Suspend(generation) = item {
                                assert!(
                                    resumed_since.contains(generation),
                                    "two live suspend tickets outstanding"
                                );
                            }
                        }
                        assert!(running != Some(Body::Suspend), "ticket issued while a suspend body runs");
                        queue.push_back(Item::Suspend(ticket.generation));
                    }
                }
                // Caller: resume request.
                1 => {
                    let decision = engine.request_resume();
                    for item in &queue {
                        if let Item::Suspend(generation) = item {
                            resumed_since.push(*generation);
                        }
                    }
                    if decision.wake_worker {
                        queue.push_back(Item::Resume);
                    }
                }
                // Worker: pick up the next item (timer expiry for tickets).
                2 => {
                    if running.is_none() {
                        match queue.pop_front() {
                            Some(Item::Suspend(generation)) => {
                                let began = engine.try_begin_suspend(generation);
                                if resumed_since.contains(&generation) {
                                    assert!(!began, "invalidated ticket committed");
                                } else if began {
                                    running = Some(Body::Suspend);
                                }
                            }
                            Some(Item::Resume) => {
                                if engine.begin_resume() {
                                    running = Some(Body::Resume);
                                }
                            }
                            None => {}
                        }
                    }
                }
                // Worker: the running body completes.
                _ => {
                    match running.take() {
                        Some(Body::Suspend) => engine.complete_suspend(),
                        Some(Body::Resume) => engine.complete_resume(),
                        None => {}
                    }
                }
            }

            assert!(
                !(engine.suspended() && engine.suspend_pending()),
                "suspended and suspend_pending both driving"
            );
        }
    }
}
