// JSON file backing for the credential record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use nexecur_core::{ConfigurationStore, StoreError, UserConfiguration};

/// Reads and rewrites the whole record as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ConfigurationStore for JsonFileStore {
    /// A missing file yields an empty record.
    fn load(&self) -> Result<UserConfiguration, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no credential record yet");
                Ok(UserConfiguration::default())
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn replace(&self, config: &UserConfiguration) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), "credential record written");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_is_empty_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("credentials.json"));

        let record = store.load().unwrap();
        assert_eq!(record, UserConfiguration::default());
        assert!(!record.is_valid());
    }

    #[test]
    fn reads_legacy_camel_case_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(
            &path,
            r#"{"token":"","idSite":"1234","password":"pw","idDevice":"","pin":"","deviceName":"Hall"}"#,
        )
        .unwrap();

        let record = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(record.id_site, "1234");
        assert_eq!(record.device_name, "Hall");
    }

    #[test]
    fn replace_creates_parent_and_writes_snake_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/credentials.json");
        let store = JsonFileStore::new(&path);
        let record = UserConfiguration {
            id_site: "42".into(),
            id_device: "dev".into(),
            ..UserConfiguration::default()
        };

        store.replace(&record).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"id_device\": \"dev\""));
        assert!(raw.contains("\"deviceName\""));
        assert_eq!(store.load().unwrap(), record);
    }

    #[test]
    fn malformed_file_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Format(_)));
    }
}
