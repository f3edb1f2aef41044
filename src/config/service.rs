//! Remote computation service configuration
//!
//! Base URL, client timeout and per-action endpoint paths. Endpoint names
//! are configurable because deployed backends disagree on casing
//! (`generate_hash` vs `generate-hash`).

use serde::Deserialize;

/// Default service root
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Default client timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Endpoint paths, relative to the base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub totp: String,
    pub hash: String,
    pub encode: String,
    pub decode: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            totp: "generate_totp".to_string(),
            hash: "generate_hash".to_string(),
            encode: "encode_base64".to_string(),
            decode: "decode_base64".to_string(),
        }
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Root URL all endpoints are joined onto
    pub base_url: String,
    /// Per-request timeout; a hung server surfaces as a transport error
    pub timeout_secs: u64,
    pub endpoints: Endpoints,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            endpoints: Endpoints::default(),
        }
    }
}

/// Endpoint overrides as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileEndpoints {
    pub totp: Option<String>,
    pub hash: Option<String>,
    pub encode: Option<String>,
    pub decode: Option<String>,
}

/// Service settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileService {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub endpoints: Option<FileEndpoints>,
}

impl ServiceConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileService>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();
        let endpoints = file.endpoints.unwrap_or_default();

        Self {
            base_url: file.base_url.unwrap_or(defaults.base_url),
            // Zero would disable the guard entirely
            timeout_secs: file
                .timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.timeout_secs),
            endpoints: Endpoints {
                totp: endpoints.totp.unwrap_or(defaults.endpoints.totp),
                hash: endpoints.hash.unwrap_or(defaults.endpoints.hash),
                encode: endpoints.encode.unwrap_or(defaults.endpoints.encode),
                decode: endpoints.decode.unwrap_or(defaults.endpoints.decode),
            },
        }
    }
}
