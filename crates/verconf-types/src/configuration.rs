//! Configurations and the submissions that create or extend them.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ModelError;
use crate::kind::ConfigurationType;
use crate::version::{Properties, Version};

/// A named, typed configuration with an append-only version history.
///
/// Invariants, upheld by every constructor and mutator:
/// - the history is never empty;
/// - version numbers run `1, 2, ..., n` with no gaps;
/// - the latest version is the last element.
///
/// Deserialization re-checks the invariants, so a `Configuration` decoded from
/// the wire is as trustworthy as one built locally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigurationRepr")]
pub struct Configuration {
    name: String,
    #[serde(rename = "type")]
    config_type: ConfigurationType,
    versions: Vec<Version>,
}

#[derive(Deserialize)]
struct ConfigurationRepr {
    name: String,
    #[serde(rename = "type")]
    config_type: ConfigurationType,
    versions: Vec<Version>,
}

impl TryFrom<ConfigurationRepr> for Configuration {
    type Error = ModelError;

    fn try_from(repr: ConfigurationRepr) -> Result<Self, Self::Error> {
        check_chain(&repr.versions)?;
        Ok(Self {
            name: repr.name,
            config_type: repr.config_type,
            versions: repr.versions,
        })
    }
}

impl Configuration {
    /// Build a configuration whose history is `payloads`, numbered from 1.
    ///
    /// Returns [`ModelError::EmptyHistory`] if `payloads` yields nothing.
    pub fn new(
        name: impl Into<String>,
        config_type: ConfigurationType,
        payloads: impl IntoIterator<Item = Properties>,
    ) -> Result<Self, ModelError> {
        let versions: Vec<Version> = payloads
            .into_iter()
            .zip(1u64..)
            .map(|(property, seq)| Version::new(seq, property))
            .collect();
        if versions.is_empty() {
            return Err(ModelError::EmptyHistory);
        }
        Ok(Self {
            name: name.into(),
            config_type,
            versions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config_type(&self) -> ConfigurationType {
        self.config_type
    }

    /// The full history, oldest first.
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Number of versions in the history.
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// The most recent version.
    pub fn latest(&self) -> &Version {
        // Non-empty by construction.
        &self.versions[self.versions.len() - 1]
    }

    /// The version with the given 1-based sequence number, if any.
    pub fn get(&self, sequence: u64) -> Option<&Version> {
        let index = usize::try_from(sequence.checked_sub(1)?).ok()?;
        self.versions.get(index)
    }

    /// Sequence number the next appended version will receive.
    pub fn next_version(&self) -> u64 {
        self.latest().version() + 1
    }

    /// Append `property` as a new latest version and return it.
    pub fn append_version(&mut self, property: Properties) -> &Version {
        let seq = self.next_version();
        self.versions.push(Version::new(seq, property));
        self.latest()
    }
}

fn check_chain(versions: &[Version]) -> Result<(), ModelError> {
    if versions.is_empty() {
        return Err(ModelError::EmptyHistory);
    }
    for (expected, version) in (1u64..).zip(versions) {
        if version.version() != expected {
            return Err(ModelError::SequenceGap {
                expected,
                found: version.version(),
            });
        }
    }
    Ok(())
}

/// One version entry of a submission.
///
/// The sequence number is accepted on the wire for compatibility but never
/// trusted: the store assigns numbers itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub property: Properties,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Properties, D::Error> {
    Ok(Option::<Properties>::deserialize(deserializer)?.unwrap_or_default())
}

impl VersionPayload {
    pub fn new(property: Properties) -> Self {
        Self {
            version: None,
            property,
        }
    }
}

/// An unvalidated create or update request body.
///
/// Every field tolerates absence so that the validator, not the JSON decoder,
/// decides what is wrong with a submission. `versions: None` (absent or
/// `null`) and `versions: Some(vec![])` are reported differently.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub config_type: String,
    #[serde(default)]
    pub versions: Option<Vec<VersionPayload>>,
}

impl ConfigurationSubmission {
    /// Submission carrying a single version payload.
    pub fn single(
        name: impl Into<String>,
        config_type: impl Into<String>,
        property: Properties,
    ) -> Self {
        Self {
            name: name.into(),
            config_type: config_type.into(),
            versions: Some(vec![VersionPayload::new(property)]),
        }
    }
}
