//! Foundation types for verconf, the versioned configuration store.
//!
//! Every other verconf crate depends on `verconf-types`. It owns the data
//! model and the structural validator that gates submissions before they are
//! allowed anywhere near the store.
//!
//! # Key Types
//!
//! - [`ConfigurationType`] — Closed set of configuration categories
//! - [`Version`] — Immutable, sequence-numbered property snapshot
//! - [`Configuration`] — Named, typed, append-only version history
//! - [`ConfigurationSubmission`] — Unvalidated inbound body
//! - [`validate`] — Structural checks for create and update submissions

pub mod configuration;
pub mod error;
pub mod kind;
pub mod validation;
pub mod version;

pub use configuration::{Configuration, ConfigurationSubmission, VersionPayload};
pub use error::{ModelError, ValidationError};
pub use kind::ConfigurationType;
pub use validation::validate;
pub use version::{Properties, Version};
