// ── Session ──
//
// Owns the working copy of the credential record plus the store it came
// from. Every credential-affecting update is written through immediately.
//
// A session is single-writer: the registration and command flows mutate it
// step by step, so two overlapping operations must not share one. Callers
// hold one session per alarm controller.

use std::sync::Arc;

use tracing::debug;

use crate::error::CoreError;
use crate::model::UserConfiguration;
use crate::store::{ConfigurationStore, StoreError};

pub struct Session {
    config: UserConfiguration,
    store: Arc<dyn ConfigurationStore>,
}

impl Session {
    /// Start from an explicit record, persisting later updates to `store`.
    pub fn new(config: UserConfiguration, store: Arc<dyn ConfigurationStore>) -> Self {
        Self { config, store }
    }

    /// Load the record from `store`.
    pub fn load(store: Arc<dyn ConfigurationStore>) -> Result<Self, StoreError> {
        let config = store.load()?;
        debug!(
            registered = config.is_device_registered(),
            "loaded user configuration"
        );
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &UserConfiguration {
        &self.config
    }

    /// Fail unless the record has a site id and a password.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.config.is_valid() {
            Ok(())
        } else {
            Err(CoreError::InvalidConfiguration {
                message: "id_site and password are required".into(),
            })
        }
    }

    pub fn update_token(&mut self, token: &str) -> Result<(), StoreError> {
        self.update(|c| c.token = token.to_owned())
    }

    pub fn update_password_hash(&mut self, hash: &str) -> Result<(), StoreError> {
        self.update(|c| c.password = hash.to_owned())
    }

    pub fn update_pin_hash(&mut self, hash: &str) -> Result<(), StoreError> {
        self.update(|c| c.pin = hash.to_owned())
    }

    pub fn update_device_id(&mut self, id_device: &str) -> Result<(), StoreError> {
        self.update(|c| c.id_device = id_device.to_owned())
    }

    fn update(&mut self, apply: impl FnOnce(&mut UserConfiguration)) -> Result<(), StoreError> {
        apply(&mut self.config);
        self.store.replace(&self.config)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn updates_write_through() {
        let store = Arc::new(MemoryStore::default());
        let mut session = Session::new(UserConfiguration::default(), store.clone());

        session.update_token("tok").unwrap();
        session.update_device_id("dev").unwrap();

        assert_eq!(store.write_count(), 2);
        assert_eq!(store.snapshot().token, "tok");
        assert!(session.config().is_device_registered());
    }

    #[test]
    fn validate_rejects_missing_site() {
        let session = Session::new(
            UserConfiguration {
                password: "p".into(),
                ..UserConfiguration::default()
            },
            Arc::new(MemoryStore::default()),
        );
        let err = session.validate().unwrap_err();
        assert_eq!(err.code(), "INVALID_CONFIGURATION");
    }

    struct BrokenStore;

    impl ConfigurationStore for BrokenStore {
        fn load(&self) -> Result<UserConfiguration, StoreError> {
            Err(serde_json::from_str::<UserConfiguration>("{ not json").unwrap_err().into())
        }

        fn replace(&self, _config: &UserConfiguration) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only".into()))
        }
    }

    #[test]
    fn load_surfaces_malformed_record() {
        let err = Session::load(Arc::new(BrokenStore)).unwrap_err();
        assert!(matches!(err, StoreError::Format(_)), "got {err:?}");
    }

    #[test]
    fn failed_write_is_returned() {
        let mut session = Session::new(UserConfiguration::default(), Arc::new(BrokenStore));
        let err = session.update_token("tok").unwrap_err();
        assert_eq!(err.to_string(), "read-only");
    }

    #[test]
    fn load_reads_store() {
        let store = Arc::new(MemoryStore::new(UserConfiguration {
            id_site: "1".into(),
            ..UserConfiguration::default()
        }));
        let session = Session::load(store).unwrap();
        assert_eq!(session.config().id_site, "1");
    }
}
