//! Power glue: the speaker amplifier follows the device suspend state.
//!
//! [`AmpStateObserver`] bridges the state notifier to the amplifier control
//! task: a `Suspend` broadcast powers the speaker down, an `Active` broadcast
//! powers it back up.  The observer runs on the notifier worker and must not
//! block, so it forwards a command with a non-blocking send and returns.

use notifier::{StateEvent, StateObserver};

use crate::audio::amp::control::{AmpCommand, AmpController};

/// Observer that mirrors suspend/resume transitions onto the speaker amp.
pub struct AmpStateObserver {
    controller: &'static AmpController,
}

impl AmpStateObserver {
    /// Create an observer forwarding into `controller`.
    pub const fn new(controller: &'static AmpController) -> Self {
        Self { controller }
    }
}

impl StateObserver for AmpStateObserver {
    fn on_state_event(&self, event: StateEvent) {
        let command = match event {
            StateEvent::Suspend => AmpCommand::PowerOff,
            StateEvent::Active => AmpCommand::PowerOn,
        };
        if !self.controller.try_command(command) {
            #[cfg(feature = "defmt")]
            defmt::warn!("amp command queue full, speaker may lag the device state");
        }
    }
}
