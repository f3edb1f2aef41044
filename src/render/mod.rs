//! Local symbol rendering: QR codes and 1D barcodes
//!
//! Both encoders produce a [`Symbol`]: text rows for the terminal preview and
//! a standalone SVG document for export. Encoder failures never leak the
//! underlying crate's error text; they map to a fixed [`RenderError`].

mod barcode;
mod qr;

pub use barcode::{encode_barcode, Symbology};
pub use qr::{encode_qr, QrErrorCorrection};

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;

/// Rendering failure shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Nothing to encode
    Empty,
    /// Content exceeds QR capacity at the chosen error correction level
    QrTooLong,
    /// QR encoder rejected the content
    QrInvalid,
    /// Content is not valid for the selected barcode symbology
    Barcode { symbology: Symbology, reason: String },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Nothing to encode"),
            Self::QrTooLong => f.write_str("Content too long for a QR code"),
            Self::QrInvalid => f.write_str("Invalid QR code data"),
            Self::Barcode { .. } => f.write_str("Invalid barcode data for selected format"),
        }
    }
}

impl std::error::Error for RenderError {}

/// An encoded symbol ready to draw or export
#[derive(Debug, Clone)]
pub struct Symbol {
    /// Content as shown under the symbol (barcodes include the check digit)
    pub caption: String,
    /// Terminal rows, dark modules drawn with block characters
    pub lines: Vec<String>,
    /// Standalone SVG document
    pub svg: String,
}

impl Symbol {
    /// Widest terminal row, in cells
    pub fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Write the SVG document to `path`
    pub fn save_svg(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, &self.svg)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Saved {}", path.display());
        Ok(())
    }
}

/// Escape text for inclusion in SVG/XML content
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_errors_use_fixed_messages() {
        let err = RenderError::Barcode {
            symbology: Symbology::Ean13,
            reason: "character 'x' is not a digit".into(),
        };
        assert_eq!(err.to_string(), "Invalid barcode data for selected format");
        assert!(!RenderError::QrTooLong.to_string().contains("DataTooLong"));
    }

    #[test]
    fn save_svg_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("qrcode.svg");
        let symbol = encode_qr("hello", QrErrorCorrection::M, 128).unwrap();

        symbol.save_svg(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
    }

    #[test]
    fn xml_escape_handles_markup() {
        assert_eq!(xml_escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
