use verconf_types::{Configuration, ConfigurationSubmission, Version};

use crate::error::StoreResult;

/// Authoritative mapping from configuration name to version history.
///
/// All implementations must satisfy these invariants:
/// - Version numbers of a configuration are `1..=n` with no gaps and the
///   latest version is the last one.
/// - Read-modify-write sequences on one name are atomic: two concurrent
///   updates never compute the same next version.
/// - Failed operations leave the store untouched.
/// - Configurations are never deleted.
pub trait ConfigStore: Send + Sync {
    /// Store a new configuration.
    ///
    /// Submitted versions are renumbered from 1. Fails with
    /// `AlreadyExists` if the name is taken.
    fn create(&self, candidate: &ConfigurationSubmission) -> StoreResult<Configuration>;

    /// Append the submission's first version payload as the new latest version.
    ///
    /// Caller-supplied sequence numbers are ignored and the stored type is
    /// kept. Fails with `NotFound` if the name is unknown.
    fn update(&self, submission: &ConfigurationSubmission) -> StoreResult<Configuration>;

    /// Append a copy of version `target` as the new latest version.
    ///
    /// `target` must satisfy `0 < target < latest`, otherwise the call fails
    /// with `InvalidVersion`. History is never truncated.
    fn rollback(&self, name: &str, target: i64) -> StoreResult<Configuration>;

    /// Return version `sequence` (1-based), or the latest when `None`.
    fn fetch(&self, name: &str, sequence: Option<i64>) -> StoreResult<Version>;

    /// Snapshot of the full history of `name`, oldest first.
    fn list_versions(&self, name: &str) -> StoreResult<Vec<Version>>;

    /// Names of all stored configurations, sorted.
    fn list_names(&self) -> StoreResult<Vec<String>>;
}
