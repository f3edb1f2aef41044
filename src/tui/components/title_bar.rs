// Title bar component
//
// App name, a spinner while any request is in flight, and the tab strip.

use crate::tui::traits::{ComponentId, RenderContext};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, active: ComponentId, loading: bool, ctx: &RenderContext) {
    let theme = ctx.theme;

    let mut spans = vec![Span::styled(
        " 📈 tradekit",
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    )];
    if loading {
        spans.push(Span::styled(
            format!(" {} working", ctx.spinner_char()),
            Style::default().fg(theme.muted),
        ));
    }
    spans.push(Span::raw("  "));

    for (i, id) in ComponentId::ALL.iter().enumerate() {
        let label = format!(" F{} {} ", i + 1, id.title());
        let style = if *id == active {
            Style::default()
                .fg(theme.selection_fg)
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(label, style));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.title))
            .title_top(Line::from(" ? ").right_aligned()),
    );

    f.render_widget(title, area);
}
