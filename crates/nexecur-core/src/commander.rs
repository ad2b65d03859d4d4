// ── Alarm commands ──
//
// Sends an arm/disarm order and, when the panel reports it pending, polls
// until the panel has applied it or the wall-clock budget runs out.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use nexecur_api::transport::TransportClient;
use nexecur_api::{ApiResponse, NexecurClient};

use crate::config::DEFAULT_OPERATION_TIMEOUT;
use crate::error::CoreError;
use crate::model::AlarmCommand;
use crate::registration::RegistrationCoordinator;
use crate::session::Session;

/// Delay schedule and budget for completion polling.
///
/// The delay after poll `n` is `base_delay + step * max(0, n - flat_attempts)`:
/// flat for the first `flat_attempts` polls, then growing linearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Wall-clock budget measured from when the order is sent.
    pub timeout: Duration,
    pub base_delay: Duration,
    pub step: Duration,
    pub flat_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_OPERATION_TIMEOUT)
    }
}

impl PollPolicy {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            base_delay: Duration::from_secs(2),
            step: Duration::from_secs(1),
            flat_attempts: 5,
        }
    }

    /// Sleep before the next poll, given how many polls have been made.
    pub fn delay_after(&self, attempts: u32) -> Duration {
        self.base_delay + self.step * attempts.saturating_sub(self.flat_attempts)
    }
}

pub struct AlarmCommander<'a, T> {
    client: &'a NexecurClient<T>,
    registration: RegistrationCoordinator<'a, T>,
    policy: PollPolicy,
}

impl<'a, T: TransportClient> AlarmCommander<'a, T> {
    pub fn new(
        client: &'a NexecurClient<T>,
        registration: RegistrationCoordinator<'a, T>,
        policy: PollPolicy,
    ) -> Self {
        Self {
            client,
            registration,
            policy,
        }
    }

    /// Order the panel into the state `command` names and wait until it
    /// reports the order applied.
    ///
    /// `cancel` aborts the completion-polling phase; an order already
    /// acknowledged by the panel is not rolled back.
    pub async fn control_alarm_system(
        &self,
        session: &mut Session,
        command: AlarmCommand,
        cancel: &CancellationToken,
    ) -> Result<(), CoreError> {
        session.validate()?;
        self.registration.ensure_registered(session).await?;

        let action = command.action();
        let token = session.config().token.clone();
        let started = Instant::now();

        info!(%command, "sending alarm order");
        let response = self
            .client
            .panel_status(&token, Some(command.wire_value()))
            .await
            .map_err(|e| order_failed(action, e))?;
        if !response.is_ok() {
            return Err(CoreError::OrderAlarm {
                message: format!("Error while {action} alarm system"),
            });
        }
        if response.pending == Some(0) {
            info!(%command, "panel applied order immediately");
            return Ok(());
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                warn!(%command, "polling cancelled");
                Err(CoreError::Cancelled { action: action.to_owned() })
            }
            result = self.wait_for_completion(&token, action, started) => result,
        }
    }

    async fn wait_for_completion(
        &self,
        token: &str,
        action: &'static str,
        started: Instant,
    ) -> Result<(), CoreError> {
        let mut attempts: u32 = 0;

        while started.elapsed() < self.policy.timeout {
            attempts += 1;
            let check = self
                .client
                .check_panel_status(token)
                .await
                .map_err(|e| order_failed(action, e))?;
            if check.still_pending == Some(0) {
                info!(attempts, "panel applied order");
                return Ok(());
            }

            let remaining = self.policy.timeout.saturating_sub(started.elapsed());
            let delay = self.policy.delay_after(attempts).min(remaining);
            debug!(attempts, delay_ms = delay.as_millis(), "order still pending");
            tokio::time::sleep(delay).await;
        }

        warn!(attempts, "order still pending at deadline");
        Err(CoreError::StillPending {
            attempts,
            timeout: self.policy.timeout,
        })
    }
}

fn order_failed(action: &str, cause: impl std::fmt::Display) -> CoreError {
    CoreError::OrderAlarm {
        message: format!("Failed {action} alarm: {cause}"),
    }
}
