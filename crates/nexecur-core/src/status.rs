// ── Panel status reads ──
//
// Current alarm state, event history and camera stream lookups. Every
// read ensures registration first, then surfaces failures as
// `UndefinedApi`.

use tracing::debug;

use nexecur_api::transport::TransportClient;
use nexecur_api::{ApiResponse, ConfigurationResponse, NexecurClient, SiteResponse, StreamResponse};

use crate::error::CoreError;
use crate::model::{AlarmStatus, Event};
use crate::registration::RegistrationCoordinator;
use crate::session::Session;

pub struct StatusReader<'a, T> {
    client: &'a NexecurClient<T>,
    registration: RegistrationCoordinator<'a, T>,
}

impl<'a, T: TransportClient> StatusReader<'a, T> {
    pub fn new(client: &'a NexecurClient<T>, registration: RegistrationCoordinator<'a, T>) -> Self {
        Self {
            client,
            registration,
        }
    }

    /// Current panel state.
    pub async fn alarm_status(&self, session: &mut Session) -> Result<AlarmStatus, CoreError> {
        let site = self
            .authenticated_site(session, "Failed to retrieve alarm status from API", "get alarm status")
            .await?;

        let raw = site.panel_status.ok_or_else(|| CoreError::UndefinedApi {
            message: "Failed to retrieve alarm status from API".into(),
        })?;
        let status = AlarmStatus::try_from(raw).map_err(|value| CoreError::UndefinedApi {
            message: format!("Unknown alarm status value {value}"),
        })?;
        debug!(%status, "alarm status read");
        Ok(status)
    }

    /// Events the panel reported with the site snapshot; empty when absent.
    pub async fn event_history(&self, session: &mut Session) -> Result<Vec<Event>, CoreError> {
        let site = self
            .authenticated_site(
                session,
                "Failed to retrieve event history from API",
                "get event history",
            )
            .await?;

        let events: Vec<Event> = site
            .evenements
            .unwrap_or_default()
            .into_iter()
            .map(Event::from)
            .collect();
        debug!(count = events.len(), "event history read");
        Ok(events)
    }

    /// Streaming URI for the device with `serial`.
    ///
    /// Accepted unless both `message` and `status` indicate failure.
    pub async fn stream(&self, session: &mut Session, serial: &str) -> Result<StreamResponse, CoreError> {
        session.validate()?;
        self.registration.ensure_registered(session).await?;

        let response = self
            .client
            .stream(&session.config().token, serial)
            .await
            .map_err(|e| read_failed("get stream data", e))?;
        if response.message() != Some("OK") && response.status() != Some(0) {
            return Err(CoreError::UndefinedApi {
                message: "Failed to retrieve stream data from API".into(),
            });
        }
        Ok(response)
    }

    /// Vendor-side application configuration. Needs no credentials.
    pub async fn vendor_configuration(&self) -> Result<ConfigurationResponse, CoreError> {
        let response = self
            .client
            .configuration()
            .await
            .map_err(|e| read_failed("get vendor configuration", e))?;
        if !response.is_ok() {
            return Err(CoreError::UndefinedApi {
                message: "Failed to retrieve vendor configuration from API".into(),
            });
        }
        Ok(response)
    }

    async fn authenticated_site(
        &self,
        session: &mut Session,
        failure: &str,
        what: &str,
    ) -> Result<SiteResponse, CoreError> {
        session.validate()?;
        self.registration.ensure_registered(session).await?;

        let site = self
            .registration
            .authenticate(session)
            .await
            .map_err(|e| match e {
                CoreError::UndefinedApi { message } => read_failed(what, message),
                CoreError::Store(source) => read_failed(what, source),
                other => other,
            })?;
        if !site.is_ok() {
            return Err(CoreError::UndefinedApi {
                message: failure.to_owned(),
            });
        }
        Ok(site)
    }
}

fn read_failed(what: &str, cause: impl std::fmt::Display) -> CoreError {
    CoreError::UndefinedApi {
        message: format!("Failed to {what}: {cause}"),
    }
}
