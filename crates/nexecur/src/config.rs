//! CLI-side settings resolution.
//!
//! Layers `GlobalOpts` flags over `nexecur_config::Settings` and opens the
//! credential record. Everything else lives in `nexecur-config`.

use std::sync::Arc;

use nexecur_config::{JsonFileStore, Settings};
use nexecur_core::{Controller, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load settings and apply flag overrides.
pub fn resolve_settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let mut settings = Settings::load()?;

    if let Some(ref path) = global.credentials {
        settings.credentials_file = Some(path.clone());
    }
    if let Some(timeout) = global.timeout {
        settings.timeout = timeout;
    }
    if let Some(operation_timeout) = global.operation_timeout {
        settings.operation_timeout = operation_timeout;
    }
    if global.insecure {
        settings.insecure = true;
    }
    Ok(settings)
}

/// The credential store the resolved settings point at.
pub fn credential_store(settings: &Settings) -> JsonFileStore {
    JsonFileStore::new(settings.credentials_path())
}

/// Open the credential record and build a controller over it.
pub fn build_controller(global: &GlobalOpts) -> Result<Controller, CliError> {
    let settings = resolve_settings(global)?;
    let client_config = settings.to_client_config()?;
    let store = credential_store(&settings);
    tracing::debug!(path = %store.path().display(), "using credential record");

    let session = Session::load(Arc::new(store)).map_err(nexecur_core::CoreError::from)?;
    Ok(Controller::connect(client_config, session)?)
}
