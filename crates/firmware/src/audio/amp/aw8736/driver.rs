//! AW8736 hardware driver
//!
//! Controls the amplifier via a single CTRL GPIO output pin using
//! `embedded_hal::digital::OutputPin` (v1.0).  Mode selection is a pulse
//! train on CTRL; the pulse and settle timings below come from the part's
//! datasheet and are driven with `embassy_time::Timer`.

use embassy_time::Timer;
use embedded_hal::digital::OutputPin;

use crate::audio::amp::SpeakerAmp;

/// Number of CTRL pulses selecting the operating mode (mode 5).
pub const MODE_SELECT_PULSES: u8 = 5;

/// Hold time per CTRL level during the mode pulse train, in microseconds.
/// The part samples pulses between 0.5 µs and 10 µs wide.
pub const PULSE_HOLD_US: u64 = 2;

/// Power-up settle after the mode pulse train, in microseconds.
pub const ENABLE_SETTLE_US: u64 = 13_000;

/// Output discharge settle after shutdown, in microseconds.
pub const DISABLE_SETTLE_US: u64 = 3_000;

/// Slack the part tolerates on top of either settle time, in microseconds.
/// Kept for board bring-up measurements; the driver waits the minimum.
pub const SETTLE_RANGE_US: u64 = 2_000;

/// AW8736 speaker amplifier driver.
///
/// Holds ownership of the CTRL GPIO pin and tracks the enabled state.
pub struct Aw8736<P: OutputPin> {
    ctrl_pin: P,
    enabled: bool,
}

impl<P: OutputPin> Aw8736<P> {
    /// Create a new AW8736 driver.
    ///
    /// Takes ownership of the CTRL GPIO pin and immediately drives it low,
    /// placing the amplifier in shutdown (disabled) state.
    pub fn new(mut ctrl_pin: P) -> Self {
        // Drive low on construction — amplifier starts disabled.
        // Ignore the error here; if the pin is broken the first enable()
        // call will surface it.
        let _ = ctrl_pin.set_low();
        Self {
            ctrl_pin,
            enabled: false,
        }
    }
}

impl<P: OutputPin> SpeakerAmp for Aw8736<P> {
    type Error = P::Error;

    /// Power up by clocking the mode pulse train out on CTRL, then waiting
    /// out the power-up settle.
    async fn enable(&mut self) -> Result<(), Self::Error> {
        for _ in 0..MODE_SELECT_PULSES {
            self.ctrl_pin.set_low()?;
            Timer::after_micros(PULSE_HOLD_US).await;
            self.ctrl_pin.set_high()?;
            Timer::after_micros(PULSE_HOLD_US).await;
        }
        Timer::after_micros(ENABLE_SETTLE_US).await;
        self.enabled = true;
        Ok(())
    }

    /// Shut down by holding CTRL low, then waiting out the discharge settle.
    async fn disable(&mut self) -> Result<(), Self::Error> {
        self.ctrl_pin.set_low()?;
        Timer::after_micros(DISABLE_SETTLE_US).await;
        self.enabled = false;
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
