//! Shared rendering for input boxes, triggers and action results

use crate::controller::ActionSlot;
use crate::theme::Theme;
use crate::tui::text_input::TextInput;
use crate::tui::traits::RenderContext;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn panel_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.panel_border(focused)))
}

/// Draw an input box and, when focused, place the terminal cursor in it
pub fn render_input(
    f: &mut Frame,
    area: Rect,
    input: &TextInput,
    title: &str,
    placeholder: &str,
    focused: bool,
    ctx: &RenderContext,
) {
    let theme = ctx.theme;
    let block = panel_block(title, focused, theme);
    let inner = block.inner(area);

    let body = if input.text().is_empty() {
        Paragraph::new(Span::styled(
            placeholder.to_string(),
            Style::default().fg(theme.muted),
        ))
    } else {
        Paragraph::new(input.text().to_string()).style(Style::default().fg(theme.foreground))
    };
    f.render_widget(body.block(block), area);

    if focused && inner.width > 0 && inner.height > 0 {
        let (col, row) = input.cursor_position();
        let x = inner.x + col.min(inner.width.saturating_sub(1));
        let y = inner.y + row.min(inner.height.saturating_sub(1));
        f.set_cursor_position(Position::new(x, y));
    }
}

/// A `[ Label ]` trigger, dimmed when disabled and highlighted when selected
pub fn trigger<'a>(label: &str, enabled: bool, selected: bool, theme: &Theme) -> Span<'a> {
    let text = format!("[ {} ]", label);
    let style = if !enabled {
        Style::default().fg(theme.muted)
    } else if selected {
        Style::default()
            .fg(theme.selection_fg)
            .bg(theme.selection)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.highlight)
    };
    Span::styled(text, style)
}

/// Trigger label, swapped for a spinner while the slot is loading
pub fn slot_trigger<'a>(
    label: &str,
    busy_label: &str,
    slot: &ActionSlot,
    input: &str,
    selected: bool,
    ctx: &RenderContext,
) -> Span<'a> {
    if slot.is_loading() {
        return Span::styled(
            format!("[ {} {} ]", ctx.spinner_char(), busy_label),
            Style::default().fg(ctx.theme.muted),
        );
    }
    trigger(label, slot.can_submit(input), selected, ctx.theme)
}

/// Result, error and copy feedback lines for one slot
pub fn slot_lines<'a>(label: &str, slot: &ActionSlot, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    if let Some(result) = slot.result() {
        let mut spans = vec![
            Span::styled(format!("{}: ", label), Style::default().fg(theme.muted)),
            Span::styled(
                result.to_string(),
                Style::default()
                    .fg(theme.result)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if slot.copy.is_copied() {
            spans.push(Span::styled("  ✓ Copied", Style::default().fg(theme.success)));
        }
        lines.push(Line::from(spans));
    }

    if let Some(error) = slot.error() {
        lines.push(Line::from(Span::styled(
            format!("✗ {}", error),
            Style::default().fg(theme.error),
        )));
    }

    if let Some(error) = slot.copy.error() {
        lines.push(Line::from(Span::styled(
            format!("✗ {}", error),
            Style::default().fg(theme.error),
        )));
    }

    lines
}

/// Boxed paragraph of result lines
pub fn render_lines(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>, theme: &Theme) {
    let block = panel_block(title, false, theme);
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn idle_slot_has_no_lines() {
        assert!(slot_lines("Code", &ActionSlot::new(), &Theme::default()).is_empty());
    }

    #[test]
    fn result_and_copied_marker() {
        let mut slot = ActionSlot::new();
        let t = slot.begin("generate a code", "SECRET").unwrap();
        slot.finish(t.generation, Ok("123456".into()));
        slot.copy.mark_copied_at(std::time::Instant::now());

        let lines = slot_lines("Code", &slot, &Theme::default());
        assert_eq!(text(&lines), vec!["Code: 123456  ✓ Copied"]);
    }

    #[test]
    fn error_line_is_prefixed() {
        let mut slot = ActionSlot::new();
        let _ = slot.begin("hash", " ");
        let lines = slot_lines("Hash", &slot, &Theme::default());
        assert_eq!(text(&lines), vec!["✗ please enter text to hash"]);
    }
}
