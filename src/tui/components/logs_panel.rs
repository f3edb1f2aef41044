//! Logs panel
//!
//! Tails the in-memory log buffer; always follows the newest entries.

use crate::logging::{LogBuffer, LogEntry, LogLevel};
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, buffer: &LogBuffer, theme: &Theme) {
    let height = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = buffer
        .recent(height)
        .iter()
        .map(|entry| ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level, theme)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.panel_logs))
            .title(" System Logs "),
    );

    f.render_widget(list, area);
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.short_target(),
        entry.message
    )
}

fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.result),
        LogLevel::Info => Style::default().fg(theme.foreground),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn entries_show_time_level_and_module() {
        let entry = LogEntry {
            timestamp: chrono::Utc.with_ymd_and_hms(2024, 12, 8, 9, 15, 0).unwrap(),
            level: LogLevel::Warn,
            target: "tradekit::remote".to_string(),
            message: "Service timed out".to_string(),
        };
        assert_eq!(
            format_log_entry(&entry),
            "[09:15:00] WARN  remote: Service timed out"
        );
    }
}
