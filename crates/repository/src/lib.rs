//! Repository abstraction for the depot system.
//!
//! Persistence is an external concern for the command core: the only
//! contract it relies on is load-by-id and save-with-version-check. This
//! crate provides that contract ([`Repository`]), the optimistic concurrency
//! stamp ([`Version`]), the error taxonomy for storage ([`StoreError`]), and
//! an in-memory implementation used by tests and the demo wiring.

pub mod error;
pub mod memory;
pub mod store;
pub mod version;

pub use error::{Result, StoreError};
pub use memory::InMemoryRepository;
pub use store::{Persistable, Repository};
pub use version::Version;
