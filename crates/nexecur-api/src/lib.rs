// nexecur-api: Async Rust client for the Nexecur alarm web services

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod transport;

pub use client::NexecurClient;
pub use error::Error;
pub use models::{
    ApiResponse, Badge, ConfigurationResponse, Evenement, PanelCheckResponse,
    PanelStatusResponse, RegisterRequest, RegisterResponse, SaltResponse, SiteDevice,
    SiteRequest, SiteResponse, StreamResponse,
};
pub use transport::{HttpTransport, RequestHeaders, TlsMode, TransportClient, TransportConfig};
