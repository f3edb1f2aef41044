// Theme support for the dashboard
//
// Two palettes, dark and light. The active one is a process-wide preference
// stored in the config file; toggling writes through immediately.

use crate::config::Config;
use ratatui::style::Color;
use ratatui::widgets::BorderType;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which palette is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(format!("unknown theme '{}' (expected dark or light)", other)),
        }
    }
}

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub kind: ThemeKind,

    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // ─── UI Element Colors ───────────────────────────────────
    pub title: Color,
    pub border: Color,
    pub highlight: Color, // focused border, active tab
    pub status_bar: Color,
    pub panel_logs: Color,

    // ─── Feedback ────────────────────────────────────────────
    pub success: Color,
    pub error: Color,
    pub result: Color,

    // ─── Selection ───────────────────────────────────────────
    pub selection: Color,
    pub selection_fg: Color,

    pub border_type: BorderType,
}

impl Theme {
    /// Palette for `kind`; `use_background` false leaves the terminal background alone
    pub fn for_kind(kind: ThemeKind, use_background: bool) -> Self {
        let theme = match kind {
            ThemeKind::Dark => Self::dark(),
            ThemeKind::Light => Self::light(),
        };
        if use_background {
            theme
        } else {
            Self {
                background: Color::Reset,
                ..theme
            }
        }
    }

    /// One Half Dark
    fn dark() -> Self {
        Self {
            kind: ThemeKind::Dark,
            background: Color::Rgb(40, 44, 52),
            foreground: Color::Rgb(220, 223, 228),
            muted: Color::Rgb(92, 99, 112),
            title: Color::Rgb(97, 175, 239),
            border: Color::Rgb(92, 99, 112),
            highlight: Color::Rgb(97, 175, 239),
            status_bar: Color::Rgb(220, 223, 228),
            panel_logs: Color::Rgb(152, 195, 121),
            success: Color::Rgb(152, 195, 121),
            error: Color::Rgb(224, 108, 117),
            result: Color::Rgb(229, 192, 123),
            selection: Color::Rgb(71, 78, 93),
            selection_fg: Color::Rgb(220, 223, 228),
            border_type: BorderType::Rounded,
        }
    }

    /// One Half Light
    fn light() -> Self {
        Self {
            kind: ThemeKind::Light,
            background: Color::Rgb(250, 250, 250),
            foreground: Color::Rgb(56, 58, 66),
            muted: Color::Rgb(160, 161, 167),
            title: Color::Rgb(1, 132, 188),
            border: Color::Rgb(160, 161, 167),
            highlight: Color::Rgb(1, 132, 188),
            status_bar: Color::Rgb(56, 58, 66),
            panel_logs: Color::Rgb(80, 161, 79),
            success: Color::Rgb(80, 161, 79),
            error: Color::Rgb(228, 86, 73),
            result: Color::Rgb(152, 104, 1),
            selection: Color::Rgb(191, 206, 255),
            selection_fg: Color::Rgb(56, 58, 66),
            border_type: BorderType::Rounded,
        }
    }

    /// Border color for a panel based on focus state
    pub fn panel_border(&self, focused: bool) -> Color {
        if focused {
            self.highlight
        } else {
            self.border
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_kind(ThemeKind::Dark, true)
    }
}

/// Process-wide theme preference with write-through persistence
pub struct ThemePreference {
    kind: ThemeKind,
    use_background: bool,
    /// Where toggles are persisted; None keeps the preference in memory only
    persist_to: Option<PathBuf>,
}

impl ThemePreference {
    /// Read the stored preference, defaulting to dark
    pub fn init(config: &Config, persist_to: Option<PathBuf>) -> Self {
        let kind = config.theme.parse().unwrap_or_else(|e: String| {
            tracing::warn!("{}, using dark", e);
            ThemeKind::Dark
        });
        Self {
            kind,
            use_background: config.use_theme_background,
            persist_to,
        }
    }

    #[cfg(test)]
    pub fn kind(&self) -> ThemeKind {
        self.kind
    }

    pub fn theme(&self) -> Theme {
        Theme::for_kind(self.kind, self.use_background)
    }

    /// Flip dark/light and persist
    ///
    /// The in-memory preference always changes; a persistence failure is
    /// returned for the caller to surface.
    pub fn toggle(&mut self, config: &mut Config) -> Result<ThemeKind, std::io::Error> {
        self.kind = self.kind.toggled();
        config.theme = self.kind.as_str().to_string();
        tracing::info!("Theme switched to {}", self.kind);

        if let Some(path) = &self.persist_to {
            if let Err(e) = config.save_to(path) {
                tracing::warn!("Failed to persist theme to {}: {}", path.display(), e);
                return Err(e);
            }
        }
        Ok(self.kind)
    }
}
