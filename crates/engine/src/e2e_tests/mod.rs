//! End-to-end session tests.
//!
//! These drive a full [`PlaybookSession`](crate::PlaybookSession) against an
//! in-memory remote that stores the JSON wire format, so every commit and
//! fetch goes through the same DTO mapping as the REST client.
//!
//! ```bash
//! cargo test -p playbook-engine --lib e2e_tests
//! ```

mod in_memory_api;

pub use in_memory_api::*;
