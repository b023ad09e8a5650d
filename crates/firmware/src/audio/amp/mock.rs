//! Mock speaker amplifier for host-side testing
//!
//! Implements [`SpeakerAmp`] without any hardware dependency.  Records all
//! calls for assertion in tests.

use super::SpeakerAmp;

/// Mock amplifier — records all calls for test assertions.
pub struct MockAmp {
    /// Whether the amplifier is currently enabled.
    pub enabled: bool,
    /// Total number of times [`SpeakerAmp::enable`] has been called.
    pub enable_count: usize,
    /// Total number of times [`SpeakerAmp::disable`] has been called.
    pub disable_count: usize,
}

impl MockAmp {
    /// Create a new mock amplifier.  Starts in the disabled state.
    pub fn new() -> Self {
        Self {
            enabled: false,
            enable_count: 0,
            disable_count: 0,
        }
    }

    /// Total number of power-state commands applied, in either direction.
    pub fn command_count(&self) -> usize {
        self.enable_count.saturating_add(self.disable_count)
    }
}

impl Default for MockAmp {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeakerAmp for MockAmp {
    type Error = core::convert::Infallible;

    #[allow(clippy::arithmetic_side_effects)] // Mock counter; overflow not a concern in tests
    async fn enable(&mut self) -> Result<(), Self::Error> {
        self.enabled = true;
        self.enable_count += 1;
        Ok(())
    }

    #[allow(clippy::arithmetic_side_effects)] // Mock counter; overflow not a concern in tests
    async fn disable(&mut self) -> Result<(), Self::Error> {
        self.enabled = false;
        self.disable_count += 1;
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_starts_disabled() {
        let amp = MockAmp::new();
        assert!(!amp.is_enabled(), "amp should start disabled");
        assert_eq!(amp.command_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_records_power_cycle() {
        let mut amp = MockAmp::new();
        amp.enable().await.unwrap();
        assert!(amp.is_enabled());
        amp.disable().await.unwrap();
        assert!(!amp.is_enabled());
        assert_eq!(amp.enable_count, 1);
        assert_eq!(amp.disable_count, 1);
        assert_eq!(amp.command_count(), 2);
    }
}
