//! Version chain verification.
//!
//! [`verconf_types::Configuration`] already refuses to hold a broken chain.
//! These checks exist for callers that only have a detached version list (a
//! `list_versions` snapshot, a decoded response body) and want to confirm it
//! is still contiguous.

use verconf_types::Version;

use crate::error::StoreResult;
use crate::traits::ConfigStore;

/// Result of verifying one configuration's version chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainReport {
    pub name: String,
    pub version_count: usize,
    pub latest: Option<u64>,
    pub violations: Vec<ChainViolation>,
}

impl ChainReport {
    /// Returns `true` if the chain is non-empty and contiguous from 1.
    pub fn is_valid(&self) -> bool {
        self.version_count > 0 && self.violations.is_empty()
    }
}

/// A version whose sequence number is not where it should be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainViolation {
    pub position: usize,
    pub expected: u64,
    pub found: u64,
}

/// Verify that `versions` is numbered `1..=n` in order.
pub fn verify_versions(name: &str, versions: &[Version]) -> ChainReport {
    let violations = (1u64..)
        .zip(versions)
        .enumerate()
        .filter(|(_, (expected, version))| version.version() != *expected)
        .map(|(position, (expected, version))| ChainViolation {
            position,
            expected,
            found: version.version(),
        })
        .collect();

    ChainReport {
        name: name.to_string(),
        version_count: versions.len(),
        latest: versions.last().map(Version::version),
        violations,
    }
}

/// Verify every configuration held by `store`.
pub fn verify_all<S: ConfigStore + ?Sized>(store: &S) -> StoreResult<Vec<ChainReport>> {
    store
        .list_names()?
        .iter()
        .map(|name| -> StoreResult<ChainReport> {
            Ok(verify_versions(name, &store.list_versions(name)?))
        })
        .collect()
}
