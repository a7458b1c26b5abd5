use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};

/// Body of `POST /config/rollback`.
///
/// A missing `version` decodes as 0, which the store rejects as an invalid
/// rollback target.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: i64,
}

/// Query string of `GET /config/fetch`.
///
/// Both parameters arrive as raw strings so that an unparsable version is a
/// protocol error rather than an extractor rejection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchQuery {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl FetchQuery {
    /// The requested configuration name. Absent and empty are both missing.
    pub fn name(&self) -> ProtocolResult<&str> {
        required_name(self.name.as_deref())
    }

    /// The requested version, or `None` for the latest. An empty
    /// `version=` is treated as absent; anything else must be a bare integer.
    pub fn version(&self) -> ProtocolResult<Option<i64>> {
        match self.version.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| ProtocolError::InvalidVersionFormat(raw.to_string())),
        }
    }
}

/// Query string carrying only a configuration name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

impl NameQuery {
    pub fn name(&self) -> ProtocolResult<&str> {
        required_name(self.name.as_deref())
    }
}

fn required_name(name: Option<&str>) -> ProtocolResult<&str> {
    name.filter(|n| !n.is_empty())
        .ok_or(ProtocolError::MissingName)
}

/// Response of `GET /configs`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigNamesResponse {
    pub names: Vec<String>,
}

/// JSON body of every error response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable machine-readable code, e.g. `"not_found"`.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
