//! Playbook Engine library.
//!
//! Session layer over the playbook domain: the in-memory collection, the
//! remote API boundary and the use cases that tie them together.
//!
//! ## Structure
//!
//! - `stores/` - In-memory collection, tag index and pending-change log
//! - `use_cases/` - Session operations (CRUD, versions, views, sync)
//! - `infrastructure/` - External dependency implementations (ports + adapters)

pub mod infrastructure;
pub mod stores;
pub mod use_cases;

/// E2E session tests against an in-memory remote.
#[cfg(test)]
mod e2e_tests;

pub use use_cases::playbook::{PlaybookError, PlaybookSession};
