//! Rendering and content configuration: QR, barcode, resource library

use crate::render::{QrErrorCorrection, Symbology};
use serde::Deserialize;
use std::path::PathBuf;

/// QR rendering defaults
#[derive(Debug, Clone)]
pub struct QrConfig {
    pub error_correction: QrErrorCorrection,
    /// Exported SVG edge length in pixels
    pub size: u32,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            error_correction: QrErrorCorrection::H,
            size: 256,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileQr {
    pub error_correction: Option<String>,
    pub size: Option<u32>,
}

impl QrConfig {
    pub fn from_file(file: Option<FileQr>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            error_correction: file
                .error_correction
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.error_correction),
            size: file.size.filter(|s| *s > 0).unwrap_or(defaults.size),
        }
    }
}

/// Barcode rendering defaults
#[derive(Debug, Clone)]
pub struct BarcodeConfig {
    pub default_symbology: Symbology,
    /// Bar height of exported SVG in pixels
    pub height: u32,
}

impl Default for BarcodeConfig {
    fn default() -> Self {
        Self {
            default_symbology: Symbology::Code128,
            height: 100,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileBarcode {
    pub default_symbology: Option<String>,
    pub height: Option<u32>,
}

impl BarcodeConfig {
    pub fn from_file(file: Option<FileBarcode>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            default_symbology: file
                .default_symbology
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.default_symbology),
            height: file.height.filter(|h| *h > 0).unwrap_or(defaults.height),
        }
    }
}

/// Broker resource library location
#[derive(Debug, Clone, Default)]
pub struct ResourcesConfig {
    /// JSON file with `{ "resources": [...] }`; None shows an empty library
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FileResources {
    pub path: Option<String>,
}

impl ResourcesConfig {
    pub fn from_file(file: Option<FileResources>) -> Self {
        Self {
            path: file.and_then(|f| f.path).map(PathBuf::from),
        }
    }
}
