//! Terminal preview of an encoded symbol

use crate::render::Symbol;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Draw the symbol dark-on-white so it scans under either theme
pub fn render_symbol(f: &mut Frame, area: Rect, symbol: &Symbol) {
    let width = symbol.width() as u16;
    let height = symbol.lines.len() as u16 + 1;

    let x = area.x + area.width.saturating_sub(width) / 2;
    let target = Rect::new(x, area.y, width.min(area.width), height.min(area.height));

    let mut lines: Vec<Line> = symbol
        .lines
        .iter()
        .map(|l| Line::from(l.clone()))
        .collect();
    lines.push(Line::from(symbol.caption.clone()).alignment(Alignment::Center));

    f.render_widget(
        Paragraph::new(lines).style(Style::default().fg(Color::Black).bg(Color::White)),
        target,
    );
}

/// Whether the whole symbol fits; a clipped symbol would not scan
pub fn fits(area: Rect, symbol: &Symbol) -> bool {
    symbol.width() <= area.width as usize && symbol.lines.len() < area.height as usize
}
