//! Speaker amplifier command surface.
//!
//! The amplifier is owned by a single control task; other subsystems (power
//! glue, UI, diagnostics) talk to it through [`AmpCommand`]s on a small
//! channel.  The producer side is non-blocking: [`AmpController::try_command`]
//! never waits, so it is safe from observer callbacks and interrupt context.
//! If the consumer stalls and the channel fills, further commands are dropped
//! rather than blocking the sender — the power state converges on the last
//! command that did land once the task catches up.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use super::SpeakerAmp;

/// Depth of the command channel.  Power commands come from humans and the
/// suspend machinery, never in bursts; 4 is generous.
pub const COMMAND_DEPTH: usize = 4;

/// Commands accepted by the amplifier control task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AmpCommand {
    /// Power the speaker amplifier up.
    PowerOn,
    /// Shut the speaker amplifier down.
    PowerOff,
}

/// Speaker amplifier control service.
///
/// Const-constructible; on hardware it lives in a `static` shared between
/// the producers and the control task.
pub struct AmpController {
    commands: Channel<CriticalSectionRawMutex, AmpCommand, COMMAND_DEPTH>,
}

impl AmpController {
    /// Create a new controller with an empty command queue.
    pub const fn new() -> Self {
        Self {
            commands: Channel::new(),
        }
    }

    /// Attempt to enqueue `command` without blocking.
    ///
    /// Returns `true` if the command was enqueued, `false` if the channel
    /// was full and the command was dropped.
    pub fn try_command(&self, command: AmpCommand) -> bool {
        match self.commands.try_send(command) {
            Ok(()) => true,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("amp command queue full, dropped {}", command);
                false
            }
        }
    }

    /// The control task body: applies commands to `amp` serially, forever.
    ///
    /// Driver errors are logged and swallowed — a failed GPIO write must not
    /// kill the control task; the next command retries the pin.
    pub async fn run<A: SpeakerAmp>(&self, amp: &mut A) -> ! {
        loop {
            let command = self.commands.receive().await;
            let result = match command {
                AmpCommand::PowerOn => amp.enable().await,
                AmpCommand::PowerOff => amp.disable().await,
            };
            if let Err(error) = result {
                let _ = &error;
                #[cfg(feature = "defmt")]
                defmt::error!(
                    "amp command {} failed: {}",
                    command,
                    defmt::Debug2Format(&error)
                );
            }
        }
    }
}

impl Default for AmpController {
    fn default() -> Self {
        Self::new()
    }
}
