use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use verconf_types::{validate, Configuration, ConfigurationSubmission, ValidationError, Version};

use crate::error::{StoreError, StoreResult};
use crate::traits::ConfigStore;

/// In-memory, HashMap-based version store.
///
/// A single `RwLock` guards the whole mapping. Mutations hold the write guard
/// from the moment they read the latest version until the new version is
/// appended, which is what keeps concurrent updates to one name from losing
/// each other. Reads clone out of the read guard.
pub struct InMemoryConfigStore {
    configs: RwLock<HashMap<String, Configuration>>,
}

impl InMemoryConfigStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            configs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of configurations currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read_guard()?.len())
    }

    /// Returns `true` if no configuration has been created yet.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read_guard(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, Configuration>>> {
        self.configs.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_guard(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, Configuration>>> {
        self.configs.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn create(&self, candidate: &ConfigurationSubmission) -> StoreResult<Configuration> {
        let config_type = validate(candidate)?;
        let payloads = candidate
            .versions
            .iter()
            .flatten()
            .map(|payload| payload.property.clone());
        let configuration = Configuration::new(candidate.name.clone(), config_type, payloads)?;

        let mut configs = self.write_guard()?;
        match configs.entry(candidate.name.clone()) {
            Entry::Occupied(_) => {
                tracing::warn!(name = %candidate.name, "create rejected: config already exists");
                Err(StoreError::AlreadyExists(candidate.name.clone()))
            }
            Entry::Vacant(slot) => {
                slot.insert(configuration.clone());
                tracing::info!(
                    name = %configuration.name(),
                    config_type = %config_type,
                    versions = configuration.version_count(),
                    "config created"
                );
                Ok(configuration)
            }
        }
    }

    fn update(&self, submission: &ConfigurationSubmission) -> StoreResult<Configuration> {
        validate(submission)?;
        let property = submission
            .versions
            .as_deref()
            .and_then(<[_]>::first)
            .map(|payload| payload.property.clone())
            .ok_or(ValidationError::VersionsEmpty)?;

        let mut configs = self.write_guard()?;
        let configuration = configs
            .get_mut(&submission.name)
            .ok_or_else(|| StoreError::NotFound(submission.name.clone()))?;

        let version = configuration.append_version(property).version();
        tracing::info!(name = %submission.name, version, "config updated");
        Ok(configuration.clone())
    }

    fn rollback(&self, name: &str, target: i64) -> StoreResult<Configuration> {
        let mut configs = self.write_guard()?;
        let configuration = configs
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let latest = configuration.latest().version();
        let invalid = || StoreError::InvalidVersion {
            name: name.to_string(),
            requested: target,
            latest,
        };
        let sequence = u64::try_from(target)
            .ok()
            .filter(|seq| *seq > 0 && *seq < latest)
            .ok_or_else(invalid)?;
        let property = configuration
            .get(sequence)
            .map(|v| v.property().clone())
            .ok_or_else(invalid)?;

        let version = configuration.append_version(property).version();
        tracing::info!(name = %name, from = sequence, version, "config rolled back");
        Ok(configuration.clone())
    }

    fn fetch(&self, name: &str, sequence: Option<i64>) -> StoreResult<Version> {
        let configs = self.read_guard()?;
        let configuration = configs
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let Some(requested) = sequence else {
            tracing::debug!(name = %name, version = configuration.latest().version(), "fetch latest");
            return Ok(configuration.latest().clone());
        };

        let version = u64::try_from(requested)
            .ok()
            .and_then(|seq| configuration.get(seq))
            .cloned()
            .ok_or_else(|| StoreError::VersionNotFound {
                name: name.to_string(),
                requested,
                available: configuration.version_count(),
            })?;
        tracing::debug!(name = %name, version = requested, "fetch version");
        Ok(version)
    }

    fn list_versions(&self, name: &str) -> StoreResult<Vec<Version>> {
        let configs = self.read_guard()?;
        configs
            .get(name)
            .map(|configuration| configuration.versions().to_vec())
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn list_names(&self) -> StoreResult<Vec<String>> {
        let configs = self.read_guard()?;
        let mut names: Vec<String> = configs.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

impl std::fmt::Debug for InMemoryConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct("InMemoryConfigStore");
        match self.len() {
            Ok(count) => out.field("config_count", &count),
            Err(_) => out.field("poisoned", &true),
        };
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;
    use serde_json::json;
    use verconf_types::{ConfigurationType, Properties, VersionPayload};

    use super::*;
    use crate::chain::verify_versions;

    fn props(value: serde_json::Value) -> Properties {
        value.as_object().cloned().unwrap()
    }

    fn submission(name: &str, property: serde_json::Value) -> ConfigurationSubmission {
        ConfigurationSubmission::single(name, "DATABASE", props(property))
    }

    fn seeded() -> InMemoryConfigStore {
        let store = InMemoryConfigStore::new();
        store
            .create(&submission("DB", json!({ "host": "localhost" })))
            .unwrap();
        store
    }

    // -----------------------------------------------------------------------
    // Create
    // -----------------------------------------------------------------------

    #[test]
    fn create_stores_first_version_as_one() {
        let store = InMemoryConfigStore::new();
        let mut s = submission("DB", json!({ "host": "localhost" }));
        s.versions.as_mut().unwrap()[0].version = Some(42);

        let created = store.create(&s).unwrap();
        assert_eq!(created.name(), "DB");
        assert_eq!(created.config_type(), ConfigurationType::Database);
        assert_eq!(created.version_count(), 1);
        assert_eq!(created.latest().version(), 1);
        assert_eq!(store.len(), Ok(1));
    }

    #[test]
    fn create_renumbers_multiple_payloads() {
        let store = InMemoryConfigStore::new();
        let s = ConfigurationSubmission {
            name: "flags".into(),
            config_type: "FEATURE_FLAG".into(),
            versions: Some(vec![
                VersionPayload { version: Some(9), property: props(json!({ "beta": false })) },
                VersionPayload { version: Some(3), property: props(json!({ "beta": true })) },
            ]),
        };
        let created = store.create(&s).unwrap();
        let seqs: Vec<u64> = created.versions().iter().map(Version::version).collect();
        assert_eq!(seqs, vec![1, 2]);
        assert_eq!(created.latest().property()["beta"], json!(true));
    }

    #[test]
    fn create_twice_is_rejected() {
        let store = seeded();
        let err = store
            .create(&submission("DB", json!({ "host": "other" })))
            .unwrap_err();
        assert_eq!(err, StoreError::AlreadyExists("DB".into()));
        assert_eq!(store.fetch("DB", None).unwrap().property()["host"], json!("localhost"));
    }

    #[test]
    fn create_validation_errors() {
        let store = InMemoryConfigStore::new();

        let err = store.create(&submission("", json!({}))).unwrap_err();
        assert_eq!(err, StoreError::Validation(ValidationError::NameRequired));

        let err = store
            .create(&ConfigurationSubmission::single("x", "OTHERS", Properties::new()))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(ValidationError::InvalidType(_))));

        let mut empty = submission("x", json!({}));
        empty.versions = Some(vec![]);
        let err = store.create(&empty).unwrap_err();
        assert_eq!(err, StoreError::Validation(ValidationError::VersionsEmpty));

        assert_eq!(store.is_empty(), Ok(true));
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    #[test]
    fn update_appends_next_version() {
        let store = seeded();
        let mut s = submission("DB", json!({ "host": "127.0.0.1" }));
        s.versions.as_mut().unwrap()[0].version = Some(17);

        let updated = store.update(&s).unwrap();
        assert_eq!(updated.version_count(), 2);
        assert_eq!(updated.latest().version(), 2);
        assert_eq!(updated.latest().property()["host"], json!("127.0.0.1"));
    }

    #[test]
    fn update_uses_first_payload_only() {
        let store = seeded();
        let s = ConfigurationSubmission {
            name: "DB".into(),
            config_type: "DATABASE".into(),
            versions: Some(vec![
                VersionPayload::new(props(json!({ "host": "first" }))),
                VersionPayload::new(props(json!({ "host": "second" }))),
            ]),
        };
        let updated = store.update(&s).unwrap();
        assert_eq!(updated.version_count(), 2);
        assert_eq!(updated.latest().property()["host"], json!("first"));
    }

    #[test]
    fn update_keeps_stored_type() {
        let store = seeded();
        let s = ConfigurationSubmission::single("DB", "LOGGING", props(json!({ "level": "info" })));
        let updated = store.update(&s).unwrap();
        assert_eq!(updated.config_type(), ConfigurationType::Database);
    }

    #[test]
    fn update_unknown_name() {
        let store = seeded();
        let err = store
            .update(&submission("missing", json!({ "a": 1 })))
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound("missing".into()));
    }

    #[test]
    fn update_validates_before_lookup() {
        let store = seeded();
        let mut s = submission("missing", json!({}));
        s.versions = None;
        let err = store.update(&s).unwrap_err();
        assert_eq!(err, StoreError::Validation(ValidationError::VersionsMissing));
        assert_eq!(store.list_versions("DB").unwrap().len(), 1);
    }

    // -----------------------------------------------------------------------
    // Rollback
    // -----------------------------------------------------------------------

    #[test]
    fn rollback_appends_historical_copy() {
        let store = seeded();
        store.update(&submission("DB", json!({ "host": "127.0.0.1" }))).unwrap();

        let rolled = store.rollback("DB", 1).unwrap();
        assert_eq!(rolled.version_count(), 3);
        assert_eq!(rolled.latest().version(), 3);
        assert_eq!(rolled.latest().property(), rolled.versions()[0].property());
    }

    #[test]
    fn rollback_rejects_current_future_and_non_positive() {
        let store = seeded();
        store.update(&submission("DB", json!({ "host": "127.0.0.1" }))).unwrap();

        for target in [0, -1, 2, 3, i64::MAX, i64::MIN] {
            let err = store.rollback("DB", target).unwrap_err();
            assert_eq!(
                err,
                StoreError::InvalidVersion { name: "DB".into(), requested: target, latest: 2 },
                "target {target}"
            );
        }
        assert_eq!(store.list_versions("DB").unwrap().len(), 2);
    }

    #[test]
    fn rollback_with_single_version_is_invalid() {
        let store = seeded();
        assert!(matches!(
            store.rollback("DB", 1),
            Err(StoreError::InvalidVersion { latest: 1, .. })
        ));
    }

    #[test]
    fn rollback_unknown_name() {
        let store = InMemoryConfigStore::new();
        assert_eq!(
            store.rollback("nope", 1).unwrap_err(),
            StoreError::NotFound("nope".into())
        );
    }

    // -----------------------------------------------------------------------
    // Fetch / list
    // -----------------------------------------------------------------------

    #[test]
    fn fetch_latest_matches_fetch_last_sequence() {
        let store = seeded();
        store.update(&submission("DB", json!({ "host": "a" }))).unwrap();
        store.update(&submission("DB", json!({ "host": "b" }))).unwrap();

        let latest = store.fetch("DB", None).unwrap();
        let by_number = store.fetch("DB", Some(3)).unwrap();
        assert_eq!(latest, by_number);
    }

    #[test]
    fn fetch_out_of_range() {
        let store = seeded();
        for requested in [0, -3, 2] {
            assert_eq!(
                store.fetch("DB", Some(requested)).unwrap_err(),
                StoreError::VersionNotFound { name: "DB".into(), requested, available: 1 }
            );
        }
        assert_eq!(
            store.fetch("other", None).unwrap_err(),
            StoreError::NotFound("other".into())
        );
    }

    #[test]
    fn list_versions_and_names() {
        let store = seeded();
        store
            .create(&ConfigurationSubmission::single("API", "API_KEY", props(json!({ "key": "k" }))))
            .unwrap();
        store.update(&submission("DB", json!({ "host": "b" }))).unwrap();

        assert_eq!(store.list_names().unwrap(), vec!["API".to_string(), "DB".to_string()]);
        let versions = store.list_versions("DB").unwrap();
        assert_eq!(versions.iter().map(Version::version).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(
            store.list_versions("missing").unwrap_err(),
            StoreError::NotFound("missing".into())
        );
    }

    #[test]
    fn database_scenario() {
        let store = InMemoryConfigStore::new();
        let created = store
            .create(&submission("DB", json!({ "host": "localhost" })))
            .unwrap();
        assert_eq!(created.latest().version(), 1);

        let updated = store.update(&submission("DB", json!({ "host": "127.0.0.1" }))).unwrap();
        assert_eq!(updated.latest().version(), 2);
        assert_eq!(updated.latest().property()["host"], json!("127.0.0.1"));

        let rolled = store.rollback("DB", 1).unwrap();
        assert_eq!(rolled.latest().version(), 3);
        assert_eq!(rolled.latest().property()["host"], json!("localhost"));

        let latest = store.fetch("DB", None).unwrap();
        assert_eq!(latest.version(), 3);
        let first = store.fetch("DB", Some(1)).unwrap();
        assert_eq!(first.version(), 1);
        assert_eq!(first.property(), &props(json!({ "host": "localhost" })));
    }

    // -----------------------------------------------------------------------
    // Concurrency
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_updates_never_share_a_version() {
        let store = Arc::new(seeded());
        let writers = 16;

        std::thread::scope(|scope| {
            for i in 0..writers {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    store.update(&submission("DB", json!({ "writer": i }))).unwrap();
                });
            }
        });

        let versions = store.list_versions("DB").unwrap();
        assert_eq!(versions.len(), writers + 1);
        assert!(verify_versions("DB", &versions).is_valid());

        let mut writers_seen: Vec<i64> = versions[1..]
            .iter()
            .map(|v| v.property()["writer"].as_i64().unwrap())
            .collect();
        writers_seen.sort_unstable();
        assert_eq!(writers_seen, (0..writers as i64).collect::<Vec<_>>());
    }

    #[test]
    fn poisoned_lock_is_reported_not_hidden() {
        let store = Arc::new(seeded());
        let writer = Arc::clone(&store);
        let result = std::thread::spawn(move || {
            let _guard = writer.configs.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(result.is_err());

        assert_eq!(store.len(), Err(StoreError::LockPoisoned));
        assert_eq!(store.is_empty(), Err(StoreError::LockPoisoned));
        assert_eq!(store.fetch("DB", None).unwrap_err(), StoreError::LockPoisoned);
        assert_eq!(
            store.update(&submission("DB", json!({ "host": "x" }))).unwrap_err(),
            StoreError::LockPoisoned
        );
        assert_eq!(format!("{store:?}"), "InMemoryConfigStore { poisoned: true }");
    }

    #[test]
    fn debug_shows_count() {
        let store = seeded();
        assert_eq!(format!("{store:?}"), "InMemoryConfigStore { config_count: 1 }");
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    #[derive(Clone, Debug)]
    enum Op {
        Update(u8),
        Rollback(i64),
        Fetch(Option<i64>),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::Update),
            (-2i64..12).prop_map(Op::Rollback),
            prop::option::of(-2i64..12).prop_map(Op::Fetch),
        ]
    }

    proptest! {
        #[test]
        fn history_stays_contiguous(ops in prop::collection::vec(op(), 0..40)) {
            let store = seeded();
            for op in ops {
                let before = store.list_versions("DB").unwrap();
                let latest = before.len() as i64;
                match op {
                    Op::Update(n) => {
                        let after = store.update(&submission("DB", json!({ "n": n }))).unwrap();
                        prop_assert_eq!(after.version_count(), before.len() + 1);
                        prop_assert_eq!(after.latest().version(), latest as u64 + 1);
                    }
                    Op::Rollback(target) => match store.rollback("DB", target) {
                        Ok(after) => {
                            prop_assert!(target > 0 && target < latest);
                            prop_assert_eq!(after.latest().version(), latest as u64 + 1);
                            prop_assert_eq!(
                                after.latest().property(),
                                before[(target - 1) as usize].property()
                            );
                        }
                        Err(err) => {
                            let invalid_version = matches!(err, StoreError::InvalidVersion { .. });
                            prop_assert!(invalid_version);
                            prop_assert_eq!(store.list_versions("DB").unwrap(), before);
                        }
                    },
                    Op::Fetch(seq) => match store.fetch("DB", seq) {
                        Ok(v) => match seq {
                            None => {
                                prop_assert_eq!(v.version(), latest as u64);
                            }
                            Some(s) => {
                                prop_assert_eq!(&v, &before[(s - 1) as usize]);
                            }
                        },
                        Err(_) => {
                            let s = seq.unwrap_or_default();
                            prop_assert!(s <= 0 || s > latest);
                        }
                    },
                }
            }
            let versions = store.list_versions("DB").unwrap();
            prop_assert!(verify_versions("DB", &versions).is_valid());
        }
    }
}
