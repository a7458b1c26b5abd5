//! Append-only version store for verconf.
//!
//! The store maps configuration names to their version histories and owns
//! every algorithm that reads or mutates them.
//!
//! # Operations
//!
//! - `create` -- store a new configuration, numbering its versions from 1
//! - `update` -- append caller-supplied content as version `latest + 1`
//! - `rollback` -- append a copy of an earlier version as `latest + 1`
//! - `fetch` -- read the latest or a specific version
//! - `list_versions` -- read the whole history
//!
//! # Design Rules
//!
//! 1. History is append-only. Rollback moves forward, never truncates.
//! 2. The store numbers versions. Sequence numbers in submissions are ignored.
//! 3. The latest version is the last element, looked up in O(1).
//! 4. Read-modify-write on a name runs under one write guard.
//! 5. A failed operation leaves the store untouched.
//!
//! # Storage Backends
//!
//! All backends implement the [`ConfigStore`] trait:
//!
//! - [`InMemoryConfigStore`] -- `HashMap` behind a single `RwLock`

pub mod chain;
pub mod error;
pub mod memory;
pub mod traits;

pub use chain::{verify_all, verify_versions, ChainReport, ChainViolation};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryConfigStore;
pub use traits::ConfigStore;
