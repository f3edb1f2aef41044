//! Core component trait

use crate::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Identifier for each widget tab, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentId {
    #[default]
    Totp,
    Codec,
    Qr,
    Barcode,
    Counter,
    Links,
    Resources,
}

impl ComponentId {
    pub const ALL: [ComponentId; 7] = [
        Self::Totp,
        Self::Codec,
        Self::Qr,
        Self::Barcode,
        Self::Counter,
        Self::Links,
        Self::Resources,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Totp => "TOTP",
            Self::Codec => "Hash/Base64",
            Self::Qr => "QR Code",
            Self::Barcode => "Barcode",
            Self::Counter => "Word Count",
            Self::Links => "Scripmaster",
            Self::Resources => "Resources",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|id| *id == self).unwrap_or(0)
    }

    /// Tab behavior
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Shift+Tab behavior
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// F1..F7
    pub fn from_function_key(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }
}

/// Immutable context passed to components during rendering
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,

    /// Animation frame counter (for spinners)
    pub animation_frame: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, animation_frame: usize) -> Self {
        Self {
            theme,
            animation_frame,
        }
    }

    /// Spinner character for the current animation frame
    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }
}

/// Base trait for all widgets
///
/// Rendering takes `&self`: components draw from their own state and the
/// context, never from the App.
pub trait Component {
    fn id(&self) -> ComponentId;

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
