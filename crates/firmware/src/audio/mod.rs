//! Audio subsystem — external speaker amplifier control
//!
//! Vertically sliced: one sub-directory per hardware component.
//!
//! # Structure
//!
//! - `amp/` — Speaker amplifier control (`Aw8736` hardware driver, `MockAmp`
//!   for tests, `AmpController` command surface)
//!
//! # Dependency Injection
//!
//! Application code targets the [`amp::SpeakerAmp`] trait.  Concrete types
//! are injected at the call site:
//!
//! ```rust,ignore
//! async fn amp_task<A: SpeakerAmp>(mut amp: A) { /* ... */ }
//!
//! // Hardware:
//! amp_task(Aw8736::new(ctrl_pin));
//! // Tests:
//! amp_task(MockAmp::new());
//! ```

pub mod amp;

// Re-export the primary amp types.
pub use amp::aw8736::Aw8736;
pub use amp::mock::MockAmp;
