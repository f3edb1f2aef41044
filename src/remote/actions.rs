//! The four remote widget actions
//!
//! | Action | Request | Success field |
//! |---|---|---|
//! | [`GenerateTotp`] | `{ secret }` | `totp` |
//! | [`GenerateHash`] | `{ text, algorithm }` | `hash` |
//! | [`EncodeBase64`] | `{ text }` | `encoded` |
//! | [`DecodeBase64`] | `{ text }` | `decoded` |

use super::RemoteAction;
use crate::config::Endpoints;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Hash algorithm selector
// ─────────────────────────────────────────────────────────────────────────────

/// Algorithm selector sent with hash requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha1,
    Sha256,
    Sha512,
    #[serde(rename = "sha3_256")]
    Sha3_256,
    #[serde(rename = "sha3_512")]
    Sha3_512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 6] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha256,
        Self::Sha512,
        Self::Sha3_256,
        Self::Sha3_512,
    ];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Sha3_256 => "sha3_256",
            Self::Sha3_512 => "sha3_512",
        }
    }

    /// Display label for selectors
    pub fn label(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha512 => "SHA-512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_512 => "SHA3-512",
        }
    }

    /// Next algorithm in selector order (wraps)
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|a| *a == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], "");
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().replace('_', "") == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown algorithm '{}' (expected one of: md5, sha1, sha256, sha512, sha3_256, sha3_512)",
                    s
                )
            })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SecretRequest {
    pub secret: String,
}

#[derive(Debug, Serialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct HashRequest {
    pub text: String,
    pub algorithm: HashAlgorithm,
}

#[derive(Debug, Deserialize)]
pub struct TotpResponse {
    pub totp: String,
}

#[derive(Debug, Deserialize)]
pub struct HashResponse {
    pub hash: String,
}

#[derive(Debug, Deserialize)]
pub struct EncodedResponse {
    pub encoded: String,
}

#[derive(Debug, Deserialize)]
pub struct DecodedResponse {
    pub decoded: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────────────────────────────────────

/// Generate a one-time code from a shared secret
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateTotp;

impl RemoteAction for GenerateTotp {
    type Request = SecretRequest;
    type Response = TotpResponse;

    fn verb(&self) -> &'static str {
        "generate a code"
    }

    fn fallback_error(&self) -> &'static str {
        "An error occurred"
    }

    fn endpoint<'a>(&self, endpoints: &'a Endpoints) -> &'a str {
        &endpoints.totp
    }

    fn request(&self, text: &str) -> SecretRequest {
        SecretRequest {
            secret: text.to_string(),
        }
    }

    fn extract(response: TotpResponse) -> String {
        response.totp
    }
}

/// Hash text with a selected algorithm
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateHash {
    pub algorithm: HashAlgorithm,
}

impl GenerateHash {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }
}

impl RemoteAction for GenerateHash {
    type Request = HashRequest;
    type Response = HashResponse;

    fn verb(&self) -> &'static str {
        "hash"
    }

    fn fallback_error(&self) -> &'static str {
        "Error generating hash"
    }

    fn endpoint<'a>(&self, endpoints: &'a Endpoints) -> &'a str {
        &endpoints.hash
    }

    fn request(&self, text: &str) -> HashRequest {
        HashRequest {
            text: text.to_string(),
            algorithm: self.algorithm,
        }
    }

    fn extract(response: HashResponse) -> String {
        response.hash
    }
}

/// Base64-encode text
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeBase64;

impl RemoteAction for EncodeBase64 {
    type Request = TextRequest;
    type Response = EncodedResponse;

    fn verb(&self) -> &'static str {
        "encode"
    }

    fn fallback_error(&self) -> &'static str {
        "Error encoding text"
    }

    fn endpoint<'a>(&self, endpoints: &'a Endpoints) -> &'a str {
        &endpoints.encode
    }

    fn request(&self, text: &str) -> TextRequest {
        TextRequest {
            text: text.to_string(),
        }
    }

    fn extract(response: EncodedResponse) -> String {
        response.encoded
    }
}

/// Base64-decode text
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeBase64;

impl RemoteAction for DecodeBase64 {
    type Request = TextRequest;
    type Response = DecodedResponse;

    fn verb(&self) -> &'static str {
        "decode"
    }

    fn fallback_error(&self) -> &'static str {
        "Error decoding text"
    }

    fn endpoint<'a>(&self, endpoints: &'a Endpoints) -> &'a str {
        &endpoints.decode
    }

    fn request(&self, text: &str) -> TextRequest {
        TextRequest {
            text: text.to_string(),
        }
    }

    fn extract(response: DecodedResponse) -> String {
        response.decoded
    }
}
