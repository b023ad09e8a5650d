//! State-transition events and the observer callback trait.

/// Device state-transition events broadcast to registered observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateEvent {
    /// The device is entering the suspended (screen-off, low-power) state.
    Suspend,
    /// The device is returning to the active state.
    Active,
}

/// Callback interface for subsystems interested in [`StateEvent`]s.
///
/// Callbacks run synchronously on the notifier worker task, in registration
/// order.  Implementations must not block: forward the event into a channel,
/// flip an atomic, or similar.  A callback that parks the worker delays every
/// later observer and the state-flag commit itself.
pub trait StateObserver: Sync {
    /// Called once per broadcast with the event being delivered.
    fn on_state_event(&self, event: StateEvent);
}
