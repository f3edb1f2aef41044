//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;
use std::path::Path;

/// Quote a string as a TOML basic string
fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

impl Config {
    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        let resources_path = self
            .resources
            .path
            .as_ref()
            .map(|p| format!("path = {}\n", quoted(&p.display().to_string())))
            .unwrap_or_else(|| "# path = \"~/broker-resources.json\"\n".to_string());

        format!(
            r#"# tradekit configuration

# Theme: dark, light (toggle in the dashboard with Ctrl-T)
theme = {theme}

# Use theme's background color (true) or terminal's default (false)
use_theme_background = {use_bg}

# ─────────────────────────────────────────────────────────────────────────────
# COMPUTATION SERVICE
# ─────────────────────────────────────────────────────────────────────────────
# TOTP, hashing and Base64 are computed by a remote HTTP service.
# Env overrides: TRADEKIT_API_URL, TRADEKIT_TIMEOUT_SECS
[service]
base_url = {base_url}
timeout_secs = {timeout}

[service.endpoints]
totp = {ep_totp}
hash = {ep_hash}
encode = {ep_encode}
decode = {ep_decode}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to the TUI log panel or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = {log_file_rotation}  # hourly, daily, never
file_prefix = {log_file_prefix}

# QR code defaults
[qr]
error_correction = {qr_ecc}  # L, M, Q, H
size = {qr_size}

# Barcode defaults
[barcode]
default_symbology = {bc_symbology}  # code128, ean13, ean8, upca
height = {bc_height}

# Broker resource library (JSON file with a "resources" array)
[resources]
{resources_path}"#,
            theme = quoted(&self.theme),
            use_bg = self.use_theme_background,
            base_url = quoted(&self.service.base_url),
            timeout = self.service.timeout_secs,
            ep_totp = quoted(&self.service.endpoints.totp),
            ep_hash = quoted(&self.service.endpoints.hash),
            ep_encode = quoted(&self.service.endpoints.encode),
            ep_decode = quoted(&self.service.endpoints.decode),
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = quoted(self.logging.file_rotation.as_str()),
            log_file_prefix = quoted(&self.logging.file_prefix),
            qr_ecc = quoted(self.qr.error_correction.as_str()),
            qr_size = self.qr.size,
            bc_symbology = quoted(self.barcode.default_symbology.as_str()),
            bc_height = self.barcode.height,
            resources_path = resources_path,
        )
    }

    /// Save current configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml())
    }
}
