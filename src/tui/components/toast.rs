//! Toast overlay for copy, save and theme feedback
//!
//! Drawn bottom-right over everything else and dropped by the App tick once
//! expired.

use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const TOAST_DURATION: Duration = Duration::from_secs(2);

pub struct Toast {
    pub message: String,
    created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self::at(message, Instant::now())
    }

    pub fn at(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            created_at: now,
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= TOAST_DURATION
    }

    fn is_failure(&self) -> bool {
        self.message.starts_with('✗')
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // Two cells of padding plus the border on each side
        let width = (self.message.width() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;
        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height);

        let accent = if self.is_failure() {
            theme.error
        } else {
            theme.highlight
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.foreground))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_two_seconds() {
        let start = Instant::now();
        let toast = Toast::at("✓ Copied", start);
        assert!(!toast.is_expired_at(start + Duration::from_millis(1999)));
        assert!(toast.is_expired_at(start + Duration::from_secs(2)));
    }

    #[test]
    fn failures_are_recognised_by_prefix() {
        assert!(Toast::new("✗ failed to copy to clipboard").is_failure());
        assert!(!Toast::new("✓ Saved qrcode.svg").is_failure());
    }
}
