//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use nexecur_config::ConfigError;
use nexecur_core::CoreError;

/// Process exit statuses.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONFIG: i32 = 4;
    pub const REJECTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Registration ─────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(nexecur::registration),
        help(
            "Check id_site and password in the credential record ({code}).\n\
             A failed registration leaves the password hashed; re-enter it with: nexecur config init"
        )
    )]
    Registration { code: &'static str, message: String },

    // ── Commands ─────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(nexecur::order_rejected))]
    OrderRejected { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(nexecur::still_pending),
        help(
            "The panel accepted the order but had not applied it yet.\n\
             Check with: nexecur status, or raise --operation-timeout."
        )
    )]
    StillPending { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(nexecur::cancelled),
        help("The order may still be applied by the panel. Check with: nexecur status")
    )]
    Cancelled { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(nexecur::api_error))]
    Api { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(nexecur::invalid_configuration),
        help("Create the credential record with: nexecur config init")
    )]
    InvalidConfiguration { message: String },

    #[error("Could not read or write the credential record: {message}")]
    #[diagnostic(code(nexecur::store))]
    Store { message: String },

    #[error(transparent)]
    #[diagnostic(code(nexecur::config))]
    Config(#[from] ConfigError),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(nexecur::validation))]
    Validation { field: String, reason: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(nexecur::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(nexecur::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to render TOML: {0}")]
    #[diagnostic(code(nexecur::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Registration { .. } => exit_code::AUTH,
            Self::OrderRejected { .. } => exit_code::REJECTED,
            Self::StillPending { .. } => exit_code::TIMEOUT,
            Self::Cancelled { .. } => exit_code::INTERRUPTED,
            Self::Api { .. } => exit_code::CONNECTION,
            Self::InvalidConfiguration { .. } | Self::Store { .. } | Self::Config(_) => {
                exit_code::CONFIG
            }
            Self::Validation { .. } => exit_code::USAGE,
            Self::Io(_) | Self::Json(_) | Self::Yaml(_) | Self::Toml(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            CoreError::SaltGeneration { .. }
            | CoreError::TokenGeneration { .. }
            | CoreError::RegisteringDevice { .. } => CliError::Registration { code, message },
            CoreError::OrderAlarm { .. } => CliError::OrderRejected { message },
            CoreError::StillPending { .. } => CliError::StillPending { message },
            CoreError::Cancelled { .. } => CliError::Cancelled { message },
            CoreError::UndefinedApi { .. } => CliError::Api { message },
            CoreError::InvalidConfiguration { .. } => CliError::InvalidConfiguration { message },
            CoreError::Store(source) => CliError::Store {
                message: source.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let pending: CliError = CoreError::StillPending {
            attempts: 3,
            timeout: std::time::Duration::from_secs(60),
        }
        .into();
        assert_eq!(pending.exit_code(), exit_code::TIMEOUT);

        let salt: CliError = CoreError::SaltGeneration {
            message: "no salt".into(),
        }
        .into();
        assert_eq!(salt.exit_code(), exit_code::AUTH);
        assert_eq!(salt.to_string(), "no salt");

        let invalid: CliError = CoreError::InvalidConfiguration {
            message: "id_site and password are required".into(),
        }
        .into();
        assert_eq!(invalid.exit_code(), exit_code::CONFIG);
        assert_eq!(
            invalid.to_string(),
            "Invalid configuration: id_site and password are required"
        );
    }
}
