//! 1D barcode encoding via `barcoders`
//!
//! `barcoders` produces the module pattern; validation of the payload, the
//! check digit, the terminal preview and the SVG document are done here.
//! UPC-A is encoded as EAN-13 with a leading zero, which yields the same
//! bar pattern.

use super::{xml_escape, RenderError, Symbol};
use barcoders::sym::code128::Code128;
use barcoders::sym::ean13::EAN13;
use barcoders::sym::ean8::EAN8;
use std::fmt;
use std::str::FromStr;

/// Rows in the terminal preview
const PREVIEW_ROWS: usize = 4;
/// Blank modules on each side of the preview
const PREVIEW_QUIET: usize = 4;
/// Pixels per module in the SVG
const SVG_MODULE: u32 = 2;
/// Blank modules on each side of the SVG
const SVG_QUIET: u32 = 10;
/// Caption band under the bars in the SVG
const SVG_CAPTION: u32 = 20;

/// Supported barcode formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Symbology {
    #[default]
    Code128,
    Ean13,
    Ean8,
    Upca,
}

impl Symbology {
    pub const ALL: [Symbology; 4] = [Self::Code128, Self::Ean13, Self::Ean8, Self::Upca];

    /// Config/CLI value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code128 => "code128",
            Self::Ean13 => "ean13",
            Self::Ean8 => "ean8",
            Self::Upca => "upca",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Code128 => "CODE128",
            Self::Ean13 => "EAN-13",
            Self::Ean8 => "EAN-8",
            Self::Upca => "UPC-A",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Payload length without the check digit, for numeric symbologies
    fn payload_len(&self) -> Option<usize> {
        match self {
            Self::Code128 => None,
            Self::Ean13 => Some(12),
            Self::Ean8 => Some(7),
            Self::Upca => Some(11),
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Symbology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], "");
        match normalized.as_str() {
            "code128" => Ok(Self::Code128),
            "ean13" => Ok(Self::Ean13),
            "ean8" => Ok(Self::Ean8),
            "upca" | "upc" => Ok(Self::Upca),
            _ => Err(format!(
                "unknown symbology '{}' (expected one of: code128, ean13, ean8, upca)",
                s
            )),
        }
    }
}

/// GS1 mod-10 check digit over `payload` (digits only)
///
/// Weights alternate 3, 1 starting from the rightmost payload digit.
pub fn check_digit(payload: &[u8]) -> u8 {
    let sum: u32 = payload
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| u32::from(*d) * if i % 2 == 0 { 3 } else { 1 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

fn invalid(symbology: Symbology, reason: impl Into<String>) -> RenderError {
    RenderError::Barcode {
        symbology,
        reason: reason.into(),
    }
}

/// Validate a numeric payload and return it with the check digit appended
fn numeric_with_check(content: &str, symbology: Symbology, payload_len: usize) -> Result<Vec<u8>, RenderError> {
    let mut digits = Vec::with_capacity(payload_len + 1);
    for c in content.chars() {
        let Some(d) = c.to_digit(10) else {
            return Err(invalid(symbology, format!("'{}' is not a digit", c)));
        };
        digits.push(d as u8);
    }

    if digits.len() == payload_len {
        let check = check_digit(&digits);
        digits.push(check);
        Ok(digits)
    } else if digits.len() == payload_len + 1 {
        let expected = check_digit(&digits[..payload_len]);
        if digits[payload_len] != expected {
            return Err(invalid(
                symbology,
                format!("check digit {} should be {}", digits[payload_len], expected),
            ));
        }
        Ok(digits)
    } else {
        Err(invalid(
            symbology,
            format!(
                "expected {} or {} digits, got {}",
                payload_len,
                payload_len + 1,
                digits.len()
            ),
        ))
    }
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Encode `content` in `symbology`
///
/// `height` is the bar height of the exported SVG in pixels.
pub fn encode_barcode(content: &str, symbology: Symbology, height: u32) -> Result<Symbol, RenderError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(RenderError::Empty);
    }

    let (modules, caption) = match symbology.payload_len() {
        None => {
            if let Some(c) = content.chars().find(|c| !(' '..='~').contains(c)) {
                return Err(invalid(symbology, format!("'{}' is outside printable ASCII", c)));
            }
            // 'Ɓ' selects character set B
            let code = Code128::new(format!("Ɓ{}", content))
                .map_err(|e| invalid(symbology, e.to_string()))?;
            (code.encode(), content.to_string())
        }
        Some(len) => {
            let digits = numeric_with_check(content, symbology, len)?;
            let caption = digits_to_string(&digits);
            let payload = &digits[..digits.len() - 1];
            let modules = match symbology {
                Symbology::Ean8 => EAN8::new(digits_to_string(payload))
                    .map_err(|e| invalid(symbology, e.to_string()))?
                    .encode(),
                Symbology::Upca => EAN13::new(format!("0{}", digits_to_string(payload)))
                    .map_err(|e| invalid(symbology, e.to_string()))?
                    .encode(),
                _ => EAN13::new(digits_to_string(payload))
                    .map_err(|e| invalid(symbology, e.to_string()))?
                    .encode(),
            };
            (modules, caption)
        }
    };

    tracing::debug!("{} encoded into {} modules", symbology.label(), modules.len());

    Ok(Symbol {
        lines: preview_lines(&modules),
        svg: svg_document(&modules, &caption, height),
        caption,
    })
}

fn preview_lines(modules: &[u8]) -> Vec<String> {
    let quiet = " ".repeat(PREVIEW_QUIET);
    let bars: String = modules
        .iter()
        .map(|m| if *m == 1 { '█' } else { ' ' })
        .collect();
    let row = format!("{quiet}{bars}{quiet}");
    vec![row; PREVIEW_ROWS]
}

fn svg_document(modules: &[u8], caption: &str, height: u32) -> String {
    let width = (modules.len() as u32 + 2 * SVG_QUIET) * SVG_MODULE;
    let total_height = height + SVG_CAPTION;

    let mut rects = String::new();
    let mut i = 0;
    while i < modules.len() {
        if modules[i] == 1 {
            let start = i;
            while i < modules.len() && modules[i] == 1 {
                i += 1;
            }
            let x = (start as u32 + SVG_QUIET) * SVG_MODULE;
            let w = (i - start) as u32 * SVG_MODULE;
            rects.push_str(&format!(
                r##"<rect x="{x}" y="0" width="{w}" height="{height}" fill="#000000"/>"##
            ));
        } else {
            i += 1;
        }
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r##"<rect width="100%" height="100%" fill="#ffffff"/>"##,
            "{rects}",
            r#"<text x="{cx}" y="{ty}" font-family="monospace" font-size="14" text-anchor="middle">{caption}</text>"#,
            "</svg>"
        ),
        w = width,
        h = total_height,
        rects = rects,
        cx = width / 2,
        ty = height + SVG_CAPTION - 4,
        caption = xml_escape(caption),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(s: &str) -> Vec<u8> {
        s.bytes().map(|b| b - b'0').collect()
    }

    #[test]
    fn gs1_check_digits() {
        assert_eq!(check_digit(&digits("400638133393")), 1);
        assert_eq!(check_digit(&digits("03600029145")), 2);
        assert_eq!(check_digit(&digits("9638507")), 4);
    }

    #[test]
    fn empty_content_is_refused_before_encoding() {
        for sym in Symbology::ALL {
            assert_eq!(encode_barcode("  ", sym, 100).unwrap_err(), RenderError::Empty);
        }
    }

    #[test]
    fn ean13_with_and_without_check_digit_match() {
        let bare = encode_barcode("400638133393", Symbology::Ean13, 100).unwrap();
        let full = encode_barcode("4006381333931", Symbology::Ean13, 100).unwrap();
        assert_eq!(bare.caption, "4006381333931");
        assert_eq!(bare.lines, full.lines);
        // 95 modules plus quiet zones
        assert_eq!(bare.width(), 95 + 2 * PREVIEW_QUIET);
    }

    #[test]
    fn wrong_check_digit_is_rejected() {
        let err = encode_barcode("4006381333932", Symbology::Ean13, 100).unwrap_err();
        assert_eq!(err.to_string(), "Invalid barcode data for selected format");
    }

    #[test]
    fn upca_matches_zero_prefixed_ean13() {
        let upc = encode_barcode("036000291452", Symbology::Upca, 100).unwrap();
        let ean = encode_barcode("0036000291452", Symbology::Ean13, 100).unwrap();
        assert_eq!(upc.caption, "036000291452");
        assert_eq!(upc.lines, ean.lines);
    }

    #[test]
    fn ean8_encodes_67_modules() {
        let symbol = encode_barcode("9638507", Symbology::Ean8, 100).unwrap();
        assert_eq!(symbol.caption, "96385074");
        assert_eq!(symbol.width(), 67 + 2 * PREVIEW_QUIET);
    }

    #[test]
    fn numeric_symbologies_reject_letters_and_bad_lengths() {
        assert!(encode_barcode("ABC", Symbology::Ean13, 100).is_err());
        assert!(encode_barcode("12345", Symbology::Ean8, 100).is_err());
        assert!(encode_barcode("1234567890123456", Symbology::Upca, 100).is_err());
    }

    #[test]
    fn code128_accepts_printable_ascii_only() {
        let symbol = encode_barcode("NIFTY 50", Symbology::Code128, 80).unwrap();
        assert_eq!(symbol.caption, "NIFTY 50");
        assert_eq!(symbol.lines.len(), PREVIEW_ROWS);
        assert!(symbol.svg.contains(r#"height="80""#));

        assert!(encode_barcode("₹100", Symbology::Code128, 80).is_err());
    }

    #[test]
    fn svg_caption_is_escaped() {
        let symbol = encode_barcode("A&B<C>", Symbology::Code128, 100).unwrap();
        assert!(symbol.svg.contains("A&amp;B&lt;C&gt;"));
    }

    #[test]
    fn symbology_parsing_and_cycle() {
        assert_eq!("EAN-13".parse::<Symbology>(), Ok(Symbology::Ean13));
        assert_eq!("upc".parse::<Symbology>(), Ok(Symbology::Upca));
        assert!("qr".parse::<Symbology>().is_err());
        assert_eq!(Symbology::Upca.next(), Symbology::Code128);
        assert_eq!(Symbology::Code128.prev(), Symbology::Upca);
    }
}
