// ── Core error types ──
//
// Every failure a caller can see. Transport errors from `nexecur_api`
// never escape raw: each component wraps them into the variant matching
// the step that failed, so there is no `From<nexecur_api::Error>`.

use std::time::Duration;

use thiserror::Error;

use crate::store::StoreError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Registration ─────────────────────────────────────────────────
    #[error("{message}")]
    SaltGeneration { message: String },

    #[error("{message}")]
    TokenGeneration { message: String },

    #[error("{message}")]
    RegisteringDevice { message: String },

    // ── Commands ─────────────────────────────────────────────────────
    #[error("{message}")]
    OrderAlarm { message: String },

    #[error(
        "The alarm operation did not complete within {} seconds after {attempts} attempts.",
        .timeout.as_secs_f64()
    )]
    StillPending { attempts: u32, timeout: Duration },

    #[error("Cancelled while {action} alarm system")]
    Cancelled { action: String },

    // ── Reads ────────────────────────────────────────────────────────
    #[error("{message}")]
    UndefinedApi { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Configuration store error: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Stable identifier for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SaltGeneration { .. } => "SALT_GENERATION_ERROR",
            Self::TokenGeneration { .. } => "TOKEN_GENERATION_ERROR",
            Self::RegisteringDevice { .. } => "DEVICE_REGISTRATION_ERROR",
            Self::OrderAlarm { .. } => "ALARM_ORDER_ERROR",
            Self::StillPending { .. } => "OPERATION_PENDING_ERROR",
            Self::Cancelled { .. } => "OPERATION_CANCELLED",
            Self::UndefinedApi { .. } => "UNDEFINED_API_ERROR",
            Self::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            Self::Store(_) => "CONFIGURATION_STORE_ERROR",
        }
    }

    /// `true` for the three errors raised by the registration flow itself.
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            Self::SaltGeneration { .. } | Self::TokenGeneration { .. } | Self::RegisteringDevice { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let err = CoreError::StillPending {
            attempts: 4,
            timeout: Duration::from_secs(60),
        };
        assert_eq!(err.code(), "OPERATION_PENDING_ERROR");
        assert_eq!(
            err.to_string(),
            "The alarm operation did not complete within 60 seconds after 4 attempts."
        );
        assert_eq!(
            CoreError::UndefinedApi {
                message: "boom".into()
            }
            .code(),
            "UNDEFINED_API_ERROR"
        );
    }

    #[test]
    fn pending_message_keeps_fractional_seconds() {
        let err = CoreError::StillPending {
            attempts: 1,
            timeout: Duration::from_millis(1500),
        };
        assert_eq!(
            err.to_string(),
            "The alarm operation did not complete within 1.5 seconds after 1 attempts."
        );
    }

    #[test]
    fn registration_errors_are_grouped() {
        assert!(CoreError::TokenGeneration { message: String::new() }.is_registration_error());
        assert!(!CoreError::OrderAlarm { message: String::new() }.is_registration_error());
    }
}
