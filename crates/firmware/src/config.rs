//! Application configuration and constants
//!
//! This module defines central configuration values used across the
//! application.  All branding, naming, and power tuning should reference
//! these constants rather than hardcoding values.

/// The application name
pub const APP_NAME: &str = "Kite";

/// The application type/category
pub const APP_TYPE: &str = "DAP"; // Digital Audio Player

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Product tuning for the suspend defer window, in seconds.
///
/// Applied to the state notifier at boot.  Ten seconds rides out screen-off
/// blips (pocket brushes, notification peeks) without leaving the speaker
/// amp powered long after the user walks away.  Must stay within the
/// notifier's accepted range (`notifier::MAX_DEFER_SECS`).
pub const SUSPEND_DEFER_SECS: u32 = 10;

/// Power-button debounce, in milliseconds.
pub const POWER_BUTTON_DEBOUNCE_MS: u64 = 20;
