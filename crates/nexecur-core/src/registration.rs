// ── Device registration ──
//
// Bootstraps the device identity the vendor requires before any panel
// call: salt → derived credentials → site token → device id. Each step's
// result is written through the session as soon as it is known.
//
// Derived hashes are persisted before the site call has validated them.
// If authentication or registration then fails, the stored record keeps
// hashed-but-unverified credentials and a stale or empty token, and the
// next attempt will hash the hash. Callers recovering from a failed
// registration must restore the plaintext password first.

use tracing::{debug, info};

use nexecur_api::{ApiResponse, NexecurClient, RegisterRequest, SiteRequest, SiteResponse};
use nexecur_api::transport::TransportClient;

use crate::credentials;
use crate::error::CoreError;
use crate::session::Session;

/// Where the registration flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Unregistered,
    SaltRequested,
    CredentialsDerived,
    Authenticated,
    Registered,
}

pub struct RegistrationCoordinator<'a, T> {
    client: &'a NexecurClient<T>,
    default_device_name: &'a str,
}

impl<'a, T: TransportClient> RegistrationCoordinator<'a, T> {
    pub fn new(client: &'a NexecurClient<T>, default_device_name: &'a str) -> Self {
        Self {
            client,
            default_device_name,
        }
    }

    /// Register the device unless the session already holds a token and
    /// device id, in which case no request is made.
    pub async fn ensure_registered(&self, session: &mut Session) -> Result<(), CoreError> {
        if session.config().is_device_registered() {
            return Ok(());
        }

        self.register(session).await.map_err(|err| {
            if err.is_registration_error() {
                err
            } else {
                registration_failed(err)
            }
        })
    }

    /// POST the session credentials to the site endpoint.
    ///
    /// A token in the response replaces the session token whatever the
    /// response's status; judging success is left to the caller.
    pub async fn authenticate(&self, session: &mut Session) -> Result<SiteResponse, CoreError> {
        let token = session.config().token.clone();
        let response = {
            let config = session.config();
            let request = SiteRequest::new(
                &config.id_site,
                &config.password,
                &config.id_device,
                &config.pin,
            );
            self.client.site(&token, &request).await.map_err(|e| {
                CoreError::UndefinedApi {
                    message: e.to_string(),
                }
            })?
        };

        if let Some(new_token) = response.token.as_deref().filter(|t| !t.is_empty()) {
            session.update_token(new_token)?;
        }

        Ok(response)
    }

    async fn register(&self, session: &mut Session) -> Result<(), CoreError> {
        let mut state = RegistrationState::Unregistered;
        info!(?state, "registering new device");

        // Salt
        let salt = {
            let config = session.config();
            let request = SiteRequest::new(
                &config.id_site,
                &config.password,
                &config.id_device,
                &config.pin,
            );
            self.client.salt(&request).await.map_err(registration_failed)?
        };
        if !salt.is_ok() {
            return Err(CoreError::SaltGeneration {
                message: "Failed to retrieve salt for device registration".into(),
            });
        }
        state = RegistrationState::SaltRequested;
        debug!(?state, "salt received");

        // Credentials
        let keys = credentials::derive(&session.config().password, &salt.salt);
        session.update_password_hash(&keys.password_hash)?;
        session.update_pin_hash(&keys.pin_hash)?;
        state = RegistrationState::CredentialsDerived;
        debug!(?state, "credentials derived and stored");

        // Token
        let site = self.authenticate(session).await.map_err(|e| match e {
            CoreError::UndefinedApi { message } => registration_failed(message),
            other => other,
        })?;
        if !site.is_ok() {
            return Err(CoreError::TokenGeneration {
                message: "Failed to obtain authentication token".into(),
            });
        }
        state = RegistrationState::Authenticated;
        debug!(?state, "site token obtained");

        // Device id
        let registration = {
            let config = session.config();
            let device_name = if config.device_name.is_empty() {
                self.default_device_name
            } else {
                config.device_name.as_str()
            };
            let request = RegisterRequest::new(&config.id_device, device_name);
            self.client
                .register(&config.token, &request)
                .await
                .map_err(registration_failed)?
        };
        // Registration succeeds on an empty message, unlike every other endpoint.
        if registration.message() != Some("") || registration.status() != Some(0) {
            return Err(CoreError::RegisteringDevice {
                message: "Failed to register device with the service".into(),
            });
        }

        let id_device = registration
            .id_device
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CoreError::RegisteringDevice {
                message: "Registration response carried no device id".into(),
            })?;
        session.update_device_id(&id_device)?;
        state = RegistrationState::Registered;
        info!(?state, "device registered");

        Ok(())
    }
}

/// Wrap anything that is not one of the three registration errors.
fn registration_failed(cause: impl std::fmt::Display) -> CoreError {
    CoreError::RegisteringDevice {
        message: format!("Device registration failed: {cause}"),
    }
}
