//! AW8736 speaker amplifier driver (Awinic)
//!
//! The AW8736 is a class-D audio power amplifier for small speakers.  It has
//! no I²C/SPI interface — operating mode and power state are controlled via a
//! single CTRL GPIO pin.
//!
//! # Signal Path
//!
//! ```text
//! codec (analog out) → AW8736 → speaker
//! ```
//!
//! # CTRL Pin Logic
//!
//! ```text
//! N low→high pulses → amplifier enabled in mode N (gain/boost profile)
//! Pin held low      → amplifier disabled (shutdown)
//! ```
//!
//! The part latches the mode after the pulse train and needs a power-up
//! settle before it will pass audio cleanly; see [`ENABLE_SETTLE_US`] and
//! the other timing constants re-exported below.
//!
//! # Hardware Pin
//!
//! STM32H743 — PB14, push-pull output to the AW8736 CTRL pin.

mod driver;

pub use driver::{
    Aw8736, DISABLE_SETTLE_US, ENABLE_SETTLE_US, MODE_SELECT_PULSES, PULSE_HOLD_US,
    SETTLE_RANGE_US,
};
