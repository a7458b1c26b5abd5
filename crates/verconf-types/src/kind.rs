use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Category of a configuration.
///
/// The set is closed: anything that does not parse to one of these variants
/// is rejected at validation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigurationType {
    /// Database connection settings.
    Database,
    /// Credentials for an external API.
    ApiKey,
    /// Log levels, sinks and formats.
    Logging,
    /// Feature toggles.
    FeatureFlag,
    /// Network endpoints, ports and timeouts.
    NetworkSetting,
}

impl ConfigurationType {
    /// Every accepted configuration type, in declaration order.
    pub const ALL: [ConfigurationType; 5] = [
        Self::Database,
        Self::ApiKey,
        Self::Logging,
        Self::FeatureFlag,
        Self::NetworkSetting,
    ];

    /// Wire name, e.g. `"FEATURE_FLAG"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "DATABASE",
            Self::ApiKey => "API_KEY",
            Self::Logging => "LOGGING",
            Self::FeatureFlag => "FEATURE_FLAG",
            Self::NetworkSetting => "NETWORK_SETTING",
        }
    }
}

impl fmt::Display for ConfigurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigurationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidType(s.to_string()))
    }
}
