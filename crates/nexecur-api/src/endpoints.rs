// Vendor web-service endpoints
//
// Every call is a POST against a fixed production host. Paths are joined
// onto the client's base URL so tests can point at a mock server.

/// Production host of the vendor web services.
pub const BASE_URL: &str = "https://monnexecur-prd.nexecur.fr";

pub const CONFIGURATION: &str = "/webservices/configuration";
pub const SALT: &str = "/webservices/salt";
pub const SITE: &str = "/webservices/site";
pub const REGISTER: &str = "/webservices/register";
pub const PANEL_STATUS: &str = "/webservices/panel-status";
pub const CHECK_PANEL_STATUS: &str = "/webservices/check-panel-status";
pub const STREAM: &str = "/webservices/stream";

/// Header carrying the session token (empty string when unauthenticated).
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// The vendor expects this content type even though bodies are JSON.
pub const CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
