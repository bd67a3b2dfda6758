//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - The remote playbook API (could swap REST -> anything else)
//! - Clock (for testing)

mod error;
mod remote;
mod testing;

pub use error::ApiError;
pub use remote::{PlaybookApiPort, PlaybookSnapshot};
pub use testing::ClockPort;

#[cfg(test)]
pub use remote::MockPlaybookApiPort;
#[cfg(test)]
pub use testing::MockClockPort;
