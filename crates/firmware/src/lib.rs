//! Kite DAP Firmware
//!
//! Firmware for the Kite portable audio player on STM32H7: external speaker
//! amplifier control and device suspend/resume power management.
//!
//! # Architecture
//!
//! ```text
//! Application Layer (main.rs)
//!         ↓
//! Power Glue (power module — notifier events → amp commands)
//!         ↓
//! Hardware Drivers (audio::amp — AW8736, mock)
//!         ↓
//! Platform (notifier crate, Embassy, STM32)
//! ```
//!
//! # Features
//!
//! - `hardware` - Build for STM32H7 target (embassy executor, HAL, defmt)
//! - `std` - Enable standard library (for testing)
//!
//! # Examples
//!
//! ## Hardware Target
//!
//! ```bash
//! cargo build --release --target thumbv7em-none-eabihf --features hardware
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
#![allow(clippy::must_use_candidate)]

pub mod audio;
pub mod config;
pub mod power;

// Re-export key types
pub use audio::amp::control::{AmpCommand, AmpController};
pub use audio::amp::{MockAmp, SpeakerAmp};
pub use audio::Aw8736;
pub use power::AmpStateObserver;
