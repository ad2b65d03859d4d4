// ── Controller facade ──
//
// One controller per alarm site. Owns the endpoint client and the session,
// and serializes every operation on that session behind a lock so the
// registration and command flows never interleave.

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use nexecur_api::transport::TransportClient;
use nexecur_api::{ConfigurationResponse, HttpTransport, NexecurClient, StreamResponse};

use crate::commander::{AlarmCommander, PollPolicy};
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{AlarmCommand, AlarmStatus, Event, UserConfiguration};
use crate::registration::RegistrationCoordinator;
use crate::session::Session;
use crate::status::StatusReader;

/// The main entry point for consumers.
pub struct Controller<T = HttpTransport> {
    client: NexecurClient<T>,
    config: ClientConfig,
    session: Mutex<Session>,
}

impl Controller<HttpTransport> {
    /// Build an HTTPS transport from `config` and wrap `session`.
    pub fn connect(config: ClientConfig, session: Session) -> Result<Self, CoreError> {
        let transport =
            HttpTransport::new(&config.transport()).map_err(|e| CoreError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        debug!(base_url = %config.base_url, "controller ready");
        Ok(Self::with_transport(transport, config, session))
    }
}

impl<T: TransportClient> Controller<T> {
    /// Use an explicit transport (tests, custom HTTP stacks).
    pub fn with_transport(transport: T, config: ClientConfig, session: Session) -> Self {
        let client = NexecurClient::new(transport, config.base_url.clone());
        Self {
            client,
            config,
            session: Mutex::new(session),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Snapshot of the current credential record.
    pub async fn user_configuration(&self) -> UserConfiguration {
        self.session.lock().await.config().clone()
    }

    // ── Registration ─────────────────────────────────────────────

    /// Register this device with the vendor unless already registered.
    pub async fn ensure_registered(&self) -> Result<(), CoreError> {
        let mut session = self.session.lock().await;
        session.validate()?;
        self.registration().ensure_registered(&mut session).await
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Send `command` and wait for the panel to apply it, bounded by
    /// `operation_timeout`.
    pub async fn control_alarm_system(&self, command: AlarmCommand) -> Result<(), CoreError> {
        self.control_alarm_system_with_cancel(command, &CancellationToken::new())
            .await
    }

    /// As [`control_alarm_system`](Self::control_alarm_system), abandoning
    /// the wait when `cancel` fires.
    pub async fn control_alarm_system_with_cancel(
        &self,
        command: AlarmCommand,
        cancel: &CancellationToken,
    ) -> Result<(), CoreError> {
        let mut session = self.session.lock().await;
        let commander = AlarmCommander::new(
            &self.client,
            self.registration(),
            PollPolicy::with_timeout(self.config.operation_timeout),
        );
        commander
            .control_alarm_system(&mut session, command, cancel)
            .await
    }

    pub async fn enable_partial_alarm(&self) -> Result<(), CoreError> {
        self.control_alarm_system(AlarmCommand::PartialArm).await
    }

    pub async fn enable_total_alarm(&self) -> Result<(), CoreError> {
        self.control_alarm_system(AlarmCommand::TotalArm).await
    }

    pub async fn disable_alarm(&self) -> Result<(), CoreError> {
        self.control_alarm_system(AlarmCommand::Disarm).await
    }

    /// Arms partition SP1.
    #[deprecated(note = "use `enable_partial_alarm` or `enable_total_alarm`")]
    pub async fn enable_alarm(&self) -> Result<(), CoreError> {
        self.enable_partial_alarm().await
    }

    // ── Reads ────────────────────────────────────────────────────

    pub async fn alarm_status(&self) -> Result<AlarmStatus, CoreError> {
        let mut session = self.session.lock().await;
        self.status_reader().alarm_status(&mut session).await
    }

    pub async fn event_history(&self) -> Result<Vec<Event>, CoreError> {
        let mut session = self.session.lock().await;
        self.status_reader().event_history(&mut session).await
    }

    pub async fn stream(&self, serial: &str) -> Result<StreamResponse, CoreError> {
        let mut session = self.session.lock().await;
        self.status_reader().stream(&mut session, serial).await
    }

    pub async fn vendor_configuration(&self) -> Result<ConfigurationResponse, CoreError> {
        self.status_reader().vendor_configuration().await
    }

    fn registration(&self) -> RegistrationCoordinator<'_, T> {
        RegistrationCoordinator::new(&self.client, &self.config.default_device_name)
    }

    fn status_reader(&self) -> StatusReader<'_, T> {
        StatusReader::new(&self.client, self.registration())
    }
}
