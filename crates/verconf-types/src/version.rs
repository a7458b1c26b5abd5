use serde::{Deserialize, Serialize};

/// Free-form property payload of a version. Keys are strings, values are any
/// JSON value.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// An immutable snapshot of a configuration's properties.
///
/// `version` is the 1-based position of this snapshot in its configuration's
/// history. Versions are only ever minted by [`crate::Configuration`], which
/// keeps the numbering contiguous.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Version {
    version: u64,
    property: Properties,
}

impl Version {
    pub(crate) fn new(version: u64, property: Properties) -> Self {
        Self { version, property }
    }

    /// Sequence number, starting at 1.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The property mapping captured by this version.
    pub fn property(&self) -> &Properties {
        &self.property
    }
}
