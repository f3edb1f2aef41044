//! Broker resources widget
//!
//! `↑`/`↓` cycle the category filter, `PgUp`/`PgDn` scroll the list.

use super::action_view::{panel_block, render_input};
use crate::tools::{ResourceLibrary, ALL_CATEGORIES};
use crate::tui::text_input::{InputAction, TextInput};
use crate::tui::traits::{
    Component, ComponentId, CopyTarget, Copyable, Handled, Interactive, KeyContext, RenderContext,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const PAGE: u16 = 5;

pub struct ResourcesPanel {
    library: ResourceLibrary,
    search: TextInput,
    category: usize,
    scroll: u16,
}

impl ResourcesPanel {
    pub fn new(library: ResourceLibrary) -> Self {
        Self {
            library,
            search: TextInput::single_line(),
            category: 0,
            scroll: 0,
        }
    }

    pub fn category(&self) -> &str {
        self.library
            .categories()
            .get(self.category)
            .copied()
            .unwrap_or(ALL_CATEGORIES)
    }

    fn cycle_category(&mut self, forward: bool) {
        let n = self.library.categories().len();
        self.category = if forward {
            (self.category + 1) % n
        } else {
            (self.category + n - 1) % n
        };
        self.scroll = 0;
    }

    #[cfg(test)]
    pub fn visible_titles(&self) -> Vec<&str> {
        self.library
            .filter(self.search.text(), self.category())
            .into_iter()
            .map(|r| r.title.as_str())
            .collect()
    }
}

impl Component for ResourcesPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Resources
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let [search_area, category_area, list_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .areas(area);

        render_input(f, search_area, &self.search, "Search", "Title, description or category", true, ctx);

        let active = self.category();
        let mut tabs = vec![Span::styled(" Category ", Style::default().fg(theme.muted))];
        for category in self.library.categories() {
            let style = if category == active {
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            tabs.push(Span::styled(format!(" {} ", category), style));
        }
        f.render_widget(Paragraph::new(Line::from(tabs)), category_area);

        let matches = self.library.filter(self.search.text(), active);
        let mut lines = Vec::new();
        if self.library.is_empty() {
            lines.push(Line::from(Span::styled(
                "No resource library loaded (set [resources].path in the config file)",
                Style::default().fg(theme.muted),
            )));
        } else if matches.is_empty() {
            lines.push(Line::from(Span::styled(
                "No resources match",
                Style::default().fg(theme.muted),
            )));
        }

        for resource in matches {
            lines.push(Line::from(vec![
                Span::styled(
                    resource.title.clone(),
                    Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", resource.display_date()),
                    Style::default().fg(theme.muted),
                ),
            ]));
            if !resource.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    resource.description.clone(),
                    Style::default().fg(theme.foreground),
                )));
            }
            lines.push(Line::from(vec![
                Span::styled(resource.categories.join(" · "), Style::default().fg(theme.result)),
                Span::styled(format!("  {}", resource.url), Style::default().fg(theme.muted)),
            ]));
            lines.push(Line::default());
        }

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0))
                .block(panel_block("Broker resources", false, theme)),
            list_area,
        );
    }
}

impl Interactive for ResourcesPanel {
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut KeyContext<'_>) -> Handled {
        match key.code {
            KeyCode::Up => self.cycle_category(false),
            KeyCode::Down => self.cycle_category(true),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(PAGE),
            _ => {
                return match self.search.handle_key(key) {
                    InputAction::Changed => {
                        self.scroll = 0;
                        Handled::Yes
                    }
                    InputAction::Submit => Handled::Yes,
                    InputAction::Ignored => Handled::No,
                };
            }
        }
        Handled::Yes
    }

    fn handle_paste(&mut self, text: &str) -> Handled {
        self.search.insert_str(text);
        self.scroll = 0;
        Handled::Yes
    }

    fn is_editing(&self) -> bool {
        !self.search.text().is_empty()
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓:category  PgUp/PgDn:scroll"
    }
}

impl Copyable for ResourcesPanel {
    fn copy_target(&mut self) -> Option<CopyTarget<'_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = r#"{
        "resources": [
            { "title": "Kite API", "description": "Order APIs", "url": "https://kite.trade",
              "categories": ["API"], "date": "2024-12-08" },
            { "title": "Greeks primer", "description": "Options basics", "url": "https://example.com",
              "categories": ["Education"], "date": "2024-11-20" }
        ]
    }"#;

    fn panel() -> ResourcesPanel {
        ResourcesPanel::new(ResourceLibrary::from_json(LIBRARY).unwrap())
    }

    #[test]
    fn category_cycle_filters_list() {
        let mut panel = panel();
        assert_eq!(panel.category(), "All");
        assert_eq!(panel.visible_titles().len(), 2);

        panel.cycle_category(true);
        assert_eq!(panel.category(), "API");
        assert_eq!(panel.visible_titles(), vec!["Kite API"]);

        panel.cycle_category(false);
        panel.cycle_category(false);
        assert_eq!(panel.category(), "Education");
    }

    #[test]
    fn search_combines_with_category() {
        let mut panel = panel();
        panel.handle_paste("options");
        assert_eq!(panel.visible_titles(), vec!["Greeks primer"]);

        panel.cycle_category(true);
        assert!(panel.visible_titles().is_empty());
    }

    #[test]
    fn empty_library_has_only_all() {
        let mut panel = ResourcesPanel::new(ResourceLibrary::default());
        panel.cycle_category(true);
        assert_eq!(panel.category(), "All");
    }
}
