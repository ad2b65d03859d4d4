// nexecur-core: Device registration, alarm orders and status reads on top of nexecur-api.

pub mod commander;
pub mod config;
pub mod controller;
pub mod convert;
pub mod credentials;
pub mod error;
pub mod model;
pub mod registration;
pub mod session;
pub mod status;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use commander::{AlarmCommander, PollPolicy};
pub use config::{ClientConfig, DEFAULT_DEVICE_NAME, DEFAULT_OPERATION_TIMEOUT, TlsVerification};
pub use controller::Controller;
pub use credentials::{CredentialKeys, derive};
pub use error::CoreError;
pub use model::{AlarmCommand, AlarmStatus, Event, UserConfiguration};
pub use registration::{RegistrationCoordinator, RegistrationState};
pub use session::Session;
pub use status::StatusReader;
pub use store::{ConfigurationStore, MemoryStore, StoreError};
