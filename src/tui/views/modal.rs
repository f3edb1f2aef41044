// Modal rendering - help overlay

use crate::tui::app::App;
use crate::tui::modal::Modal;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_help(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let key_style = Style::default().fg(theme.result);
    let desc_style = Style::default().fg(theme.foreground);
    let header_style = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD);

    // "    key             description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<16}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Widgets", header_style)),
        kb("F1..F7", "Jump to widget"),
        kb("Tab/Shift+Tab", "Next / previous widget"),
        Line::raw(""),
        Line::from(Span::styled("  In a widget", header_style)),
        kb("Enter", "Run focused action"),
        kb("↑/↓", "Focus, format, level or category"),
        kb("Ctrl+U / Ctrl+W", "Clear input / delete word"),
        kb("PgUp/PgDn", "Scroll resources"),
        Line::raw(""),
        Line::from(Span::styled("  Results", header_style)),
        kb("Ctrl+Y", "Copy focused result"),
        kb("Ctrl+S", "Save QR/barcode SVG"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("Ctrl+T", "Toggle dark/light theme"),
        kb("Ctrl+L", "Toggle logs panel"),
        kb("?, F12", "Toggle this help"),
        kb("Esc, Ctrl+C", "Quit"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(theme.kind.as_str(), key_style),
        ]),
    ]);

    let area = centered_rect(56, 27, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.highlight))
                .border_type(theme.border_type)
                .title(" Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        );
    f.render_widget(paragraph, area);
}
