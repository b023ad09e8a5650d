//! Speaker amplifier driver abstractions
//!
//! Concrete drivers:
//! - `aw8736` — Awinic AW8736 class-D speaker amplifier (GPIO pulse control)
//! - `mock` — In-process mock for host tests (always available)

#![allow(async_fn_in_trait)]

pub mod aw8736;
pub mod control;
pub mod mock;

pub use aw8736::Aw8736;
pub use mock::MockAmp;

/// Speaker amplifier driver trait.
///
/// The AW8736 is controlled by a single CTRL GPIO pin: an operating-mode
/// pulse train powers it up, driving the pin low shuts it down.  This trait
/// abstracts that control for both hardware and mock implementations.
pub trait SpeakerAmp {
    /// Error type returned by amplifier operations.
    type Error: core::fmt::Debug;

    /// Power the amplifier up.
    ///
    /// After this call (including its settle time) the amplifier is active
    /// and audio will pass through to the speaker.
    async fn enable(&mut self) -> Result<(), Self::Error>;

    /// Shut the amplifier down.
    ///
    /// After this call the amplifier is in shutdown mode and the speaker
    /// path is dead.
    async fn disable(&mut self) -> Result<(), Self::Error>;

    /// Returns `true` if the amplifier is currently enabled.
    fn is_enabled(&self) -> bool;
}
