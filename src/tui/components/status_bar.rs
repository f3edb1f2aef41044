// Status bar component
//
// Key hints for the active widget plus the global chords. Narrow terminals
// get the widget hints only.

use crate::tui::layout::Breakpoint;
use crate::tui::traits::RenderContext;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const GLOBAL_HINTS: &str = "Tab:widget  Ctrl-Y:copy  Ctrl-T:theme  Ctrl-L:logs  ?:help  Esc:quit";

pub fn render(f: &mut Frame, area: Rect, widget_hint: &str, ctx: &RenderContext) {
    let bp = Breakpoint::from_width(area.width);

    let text = if bp.at_least(Breakpoint::Wide) {
        format!(" {} │ {} │ {}", widget_hint, GLOBAL_HINTS, ctx.theme.kind)
    } else if bp.at_least(Breakpoint::Normal) {
        format!(" {} │ ?:help  Esc:quit", widget_hint)
    } else {
        format!(" {}", widget_hint)
    };

    let status = Paragraph::new(text)
        .style(Style::default().fg(ctx.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
