//! Structural validation of configuration submissions.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. name is non-empty
//! 2. type is non-empty
//! 3. type names a [`ConfigurationType`]
//! 4. `versions` is present
//! 5. `versions` has at least one entry
//!
//! The validator never looks at the store. Whether a name is free (create) or
//! already taken (update) is the store's call.

use crate::configuration::ConfigurationSubmission;
use crate::error::ValidationError;
use crate::kind::ConfigurationType;

/// Validate a create or update submission.
///
/// On success returns the parsed [`ConfigurationType`] so callers never parse
/// the type string twice.
///
/// # Examples
///
/// ```
/// use verconf_types::{validate, ConfigurationSubmission, ConfigurationType, ValidationError};
///
/// let ok = ConfigurationSubmission::single("db", "DATABASE", Default::default());
/// assert_eq!(validate(&ok), Ok(ConfigurationType::Database));
///
/// let unnamed = ConfigurationSubmission::single("", "DATABASE", Default::default());
/// assert_eq!(validate(&unnamed), Err(ValidationError::NameRequired));
/// ```
pub fn validate(candidate: &ConfigurationSubmission) -> Result<ConfigurationType, ValidationError> {
    if candidate.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }

    if candidate.config_type.is_empty() {
        return Err(ValidationError::TypeRequired);
    }

    let config_type: ConfigurationType = candidate.config_type.parse()?;

    match &candidate.versions {
        None => Err(ValidationError::VersionsMissing),
        Some(versions) if versions.is_empty() => Err(ValidationError::VersionsEmpty),
        Some(_) => Ok(config_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::VersionPayload;
    use crate::version::Properties;
    use proptest::prelude::*;
    use serde_json::json;

    fn db_props() -> Properties {
        json!({
            "host": "localhost",
            "port": 5432,
            "username": "admin",
            "password": "secret"
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    fn valid() -> ConfigurationSubmission {
        ConfigurationSubmission::single("Main Database Config", "DATABASE", db_props())
    }

    #[test]
    fn accepts_well_formed_submission() {
        assert_eq!(validate(&valid()), Ok(ConfigurationType::Database));
    }

    #[test]
    fn empty_name() {
        let mut s = valid();
        s.name.clear();
        assert_eq!(validate(&s), Err(ValidationError::NameRequired));
    }

    #[test]
    fn empty_type() {
        let s = ConfigurationSubmission {
            name: "Main Database Config".into(),
            ..Default::default()
        };
        assert_eq!(validate(&s), Err(ValidationError::TypeRequired));
    }

    #[test]
    fn unknown_type() {
        let s = ConfigurationSubmission {
            name: "Main Database Config".into(),
            config_type: "OTHERS".into(),
            versions: None,
        };
        let err = validate(&s).unwrap_err();
        assert_eq!(err, ValidationError::InvalidType("OTHERS".into()));
        assert_eq!(err.to_string(), "invalid config type");
    }

    #[test]
    fn missing_versions() {
        let mut s = valid();
        s.versions = None;
        assert_eq!(validate(&s), Err(ValidationError::VersionsMissing));
    }

    #[test]
    fn empty_versions() {
        let mut s = valid();
        s.versions = Some(Vec::new());
        assert_eq!(validate(&s), Err(ValidationError::VersionsEmpty));
    }

    #[test]
    fn first_failure_wins() {
        // Empty name and empty versions: the name check comes first.
        let s = ConfigurationSubmission {
            name: String::new(),
            config_type: "nope".into(),
            versions: Some(Vec::new()),
        };
        assert_eq!(validate(&s), Err(ValidationError::NameRequired));
    }

    #[test]
    fn caller_sequence_numbers_are_not_checked() {
        let mut s = valid();
        s.versions = Some(vec![VersionPayload {
            version: Some(-7),
            property: db_props(),
        }]);
        assert!(validate(&s).is_ok());
    }

    proptest! {
        #[test]
        fn any_named_typed_non_empty_submission_is_valid(
            name in "[a-zA-Z0-9 _-]{1,32}",
            kind in prop::sample::select(ConfigurationType::ALL.to_vec()),
            count in 1usize..5,
        ) {
            let s = ConfigurationSubmission {
                name,
                config_type: kind.as_str().to_string(),
                versions: Some(vec![VersionPayload::default(); count]),
            };
            prop_assert_eq!(validate(&s), Ok(kind));
        }

        #[test]
        fn lowercase_type_names_are_rejected(
            kind in prop::sample::select(ConfigurationType::ALL.to_vec()),
        ) {
            let s = ConfigurationSubmission::single("n", kind.as_str().to_lowercase(), Properties::new());
            let rejected = matches!(validate(&s), Err(ValidationError::InvalidType(_)));
            prop_assert!(rejected);
        }
    }
}
