//! In-memory state storage modules.
//!
//! Stores manage runtime state owned by a session:
//! - `PlaybookStore` - loaded playbooks, tag index, sync state, pending writes
//! - `index` - retrieval across the loaded collection

pub mod index;
pub mod playbooks;

// Re-export store types
pub use index::current_version;
pub use playbooks::{ChangeKind, PendingChange, PlaybookStore, SyncState};
