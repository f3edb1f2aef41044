//! QR code encoding via the `qrcode` crate

use super::{RenderError, Symbol};
use qrcode::render::{svg, unicode};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use std::fmt;
use std::str::FromStr;

/// QR error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrErrorCorrection {
    /// ~7% recovery
    L,
    /// ~15% recovery
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    #[default]
    H,
}

impl QrErrorCorrection {
    pub const ALL: [QrErrorCorrection; 4] = [Self::L, Self::M, Self::Q, Self::H];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn level(self) -> EcLevel {
        match self {
            Self::L => EcLevel::L,
            Self::M => EcLevel::M,
            Self::Q => EcLevel::Q,
            Self::H => EcLevel::H,
        }
    }
}

impl fmt::Display for QrErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QrErrorCorrection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            _ => Err(format!("unknown error correction level '{}' (expected L, M, Q or H)", s)),
        }
    }
}

/// Encode `content` as a QR symbol
///
/// `size` is the minimum edge of the exported SVG in pixels.
pub fn encode_qr(content: &str, ecc: QrErrorCorrection, size: u32) -> Result<Symbol, RenderError> {
    if content.trim().is_empty() {
        return Err(RenderError::Empty);
    }

    let code = QrCode::with_error_correction_level(content.as_bytes(), ecc.level()).map_err(|e| {
        tracing::debug!("QR encoding failed: {:?}", e);
        match e {
            QrError::DataTooLong => RenderError::QrTooLong,
            _ => RenderError::QrInvalid,
        }
    })?;

    // Two modules per cell vertically keeps the preview roughly square
    let preview = code
        .render::<unicode::Dense1x2>()
        .quiet_zone(true)
        .build();

    let svg = code
        .render::<svg::Color>()
        .min_dimensions(size, size)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();

    Ok(Symbol {
        caption: content.to_string(),
        lines: preview.lines().map(str::to_string).collect(),
        svg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_is_refused() {
        assert_eq!(
            encode_qr("   ", QrErrorCorrection::H, 256).unwrap_err(),
            RenderError::Empty
        );
    }

    #[test]
    fn preview_is_roughly_square() {
        let symbol = encode_qr("https://example.com", QrErrorCorrection::H, 256).unwrap();
        let width = symbol.width();
        let height = symbol.lines.len();
        assert!(width > 20);
        // Dense1x2 packs two rows per line
        assert!(height * 2 >= width && height * 2 <= width + 2);
    }

    #[test]
    fn svg_respects_minimum_size() {
        let symbol = encode_qr("hello", QrErrorCorrection::L, 300).unwrap();
        assert!(symbol.svg.contains("<svg"));
        assert!(symbol.svg.contains("#000000"));
    }

    #[test]
    fn oversized_content_reports_too_long() {
        let content = "x".repeat(4000);
        assert_eq!(
            encode_qr(&content, QrErrorCorrection::H, 256).unwrap_err(),
            RenderError::QrTooLong
        );
    }

    #[test]
    fn higher_correction_never_shrinks_symbol() {
        let low = encode_qr("market data feed", QrErrorCorrection::L, 256).unwrap();
        let high = encode_qr("market data feed", QrErrorCorrection::H, 256).unwrap();
        assert!(high.width() >= low.width());
    }

    #[test]
    fn parses_levels_case_insensitively() {
        assert_eq!("q".parse::<QrErrorCorrection>(), Ok(QrErrorCorrection::Q));
        assert!("Z".parse::<QrErrorCorrection>().is_err());
        assert_eq!(QrErrorCorrection::H.next(), QrErrorCorrection::L);
    }
}
