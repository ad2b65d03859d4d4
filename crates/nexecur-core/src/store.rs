// ── Credential record persistence seam ──
//
// Core only reads and replaces the whole record; where it lives is up to
// the implementation (`nexecur_config::JsonFileStore` on disk,
// `MemoryStore` for embedding and tests).

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

use crate::model::UserConfiguration;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed credential record: {0}")]
    Format(#[from] serde_json::Error),

    #[error("{0}")]
    Unavailable(String),
}

/// Load and replace the persisted [`UserConfiguration`].
pub trait ConfigurationStore: Send + Sync {
    fn load(&self) -> Result<UserConfiguration, StoreError>;

    /// Overwrite the stored record with `config`.
    fn replace(&self, config: &UserConfiguration) -> Result<(), StoreError>;
}

/// In-memory store that counts writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<UserConfiguration>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new(initial: UserConfiguration) -> Self {
        Self {
            record: Mutex::new(initial),
            writes: AtomicUsize::new(0),
        }
    }

    /// The record as last written.
    pub fn snapshot(&self) -> UserConfiguration {
        self.record
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Number of `replace` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl ConfigurationStore for MemoryStore {
    fn load(&self) -> Result<UserConfiguration, StoreError> {
        Ok(self.snapshot())
    }

    fn replace(&self, config: &UserConfiguration) -> Result<(), StoreError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))?;
        *guard = config.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl<S: ConfigurationStore + ?Sized> ConfigurationStore for std::sync::Arc<S> {
    fn load(&self) -> Result<UserConfiguration, StoreError> {
        (**self).load()
    }

    fn replace(&self, config: &UserConfiguration) -> Result<(), StoreError> {
        (**self).replace(config)
    }
}
