//! Scripmaster directory widget
//!
//! Search filters brokers by name or category. `↑`/`↓` select a file link
//! and `Ctrl-Y` copies its URL.

use super::action_view::{panel_block, render_input};
use crate::controller::CopyState;
use crate::tools::{search_brokers, Broker, ScripLink};
use crate::tui::text_input::{InputAction, TextInput};
use crate::tui::traits::{
    Component, ComponentId, CopyTarget, Copyable, Handled, Interactive, KeyContext, RenderContext,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Default)]
pub struct LinksPanel {
    search: TextInput,
    /// Index into the flattened link list of matching brokers
    selected: usize,
    copy: CopyState,
}

impl LinksPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn brokers(&self) -> Vec<&'static Broker> {
        search_brokers(self.search.text())
    }

    fn links(&self) -> Vec<&'static ScripLink> {
        self.brokers().into_iter().flat_map(|b| b.links.iter()).collect()
    }

    pub fn selected_link(&self) -> Option<&'static ScripLink> {
        self.links().get(self.selected).copied()
    }

    fn move_selection(&mut self, down: bool) {
        let count = self.links().len();
        if count == 0 {
            self.selected = 0;
        } else if down {
            self.selected = (self.selected + 1).min(count - 1);
        } else {
            self.selected = self.selected.saturating_sub(1);
        }
    }
}

impl Component for LinksPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Links
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);

        render_input(f, search_area, &self.search, "Search", "Broker name or category", true, ctx);

        let brokers = self.brokers();
        let mut lines = Vec::new();
        let mut selected_line = 0;
        let mut index = 0;

        if brokers.is_empty() {
            lines.push(Line::from(Span::styled(
                "No brokers match",
                Style::default().fg(theme.muted),
            )));
        }

        for broker in brokers {
            lines.push(Line::from(vec![
                Span::styled(
                    broker.name,
                    Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", broker.category), Style::default().fg(theme.muted)),
            ]));
            for link in broker.links {
                let style = if index == self.selected {
                    selected_line = lines.len();
                    Style::default().fg(theme.selection_fg).bg(theme.selection)
                } else {
                    Style::default().fg(theme.foreground)
                };
                let mut spans = vec![
                    Span::styled(format!("  {:<26}", link.title), style),
                    Span::styled(format!(" {:<4}", link.format), Style::default().fg(theme.result)),
                    Span::styled(
                        format!(" updated {}  {}", link.last_updated, link.url),
                        Style::default().fg(theme.muted),
                    ),
                ];
                if index == self.selected && self.copy.is_copied() {
                    spans.push(Span::styled("  ✓ Copied", Style::default().fg(theme.success)));
                }
                lines.push(Line::from(spans));
                index += 1;
            }
            lines.push(Line::default());
        }

        if let Some(error) = self.copy.error() {
            lines.insert(
                0,
                Line::from(Span::styled(format!("✗ {}", error), Style::default().fg(theme.error))),
            );
            selected_line += 1;
        }

        let block = panel_block("Scripmaster downloads", false, theme);
        let visible = block.inner(list_area).height as usize;
        let scroll = (selected_line + 1).saturating_sub(visible) as u16;
        f.render_widget(Paragraph::new(lines).scroll((scroll, 0)).block(block), list_area);
    }
}

impl Interactive for LinksPanel {
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut KeyContext<'_>) -> Handled {
        match key.code {
            KeyCode::Up => {
                self.move_selection(false);
                return Handled::Yes;
            }
            KeyCode::Down => {
                self.move_selection(true);
                return Handled::Yes;
            }
            _ => {}
        }

        match self.search.handle_key(key) {
            InputAction::Changed => {
                self.selected = 0;
                Handled::Yes
            }
            InputAction::Submit => Handled::Yes,
            InputAction::Ignored => Handled::No,
        }
    }

    fn handle_paste(&mut self, text: &str) -> Handled {
        self.search.insert_str(text);
        self.selected = 0;
        Handled::Yes
    }

    fn is_editing(&self) -> bool {
        !self.search.text().is_empty()
    }

    fn tick(&mut self, now: std::time::Instant) {
        self.copy.tick(now);
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓:select  Ctrl-Y:copy URL"
    }
}

impl Copyable for LinksPanel {
    fn copy_target(&mut self) -> Option<CopyTarget<'_>> {
        let link = self.selected_link()?;
        Some(CopyTarget {
            text: link.url.to_string(),
            state: &mut self.copy,
        })
    }
}
