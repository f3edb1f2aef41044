//! Word counter widget; counts update on every edit

use super::action_view::render_input;
use crate::tools::TextStats;
use crate::tui::text_input::{InputAction, TextInput};
use crate::tui::traits::{
    Component, ComponentId, CopyTarget, Copyable, Handled, Interactive, KeyContext, RenderContext,
};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct CounterPanel {
    input: TextInput,
    stats: TextStats,
}

impl Default for CounterPanel {
    fn default() -> Self {
        Self {
            input: TextInput::multi_line(),
            stats: TextStats::of(""),
        }
    }
}

impl CounterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn stats(&self) -> TextStats {
        self.stats
    }

    fn recount(&mut self) {
        self.stats = TextStats::of(self.input.text());
    }
}

impl Component for CounterPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Counter
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let [stats_area, input_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);

        let value = Style::default().fg(theme.result).add_modifier(Modifier::BOLD);
        let label = Style::default().fg(theme.muted);
        let stats = Line::from(vec![
            Span::styled(" Words: ", label),
            Span::styled(self.stats.words.to_string(), value),
            Span::styled("   Characters: ", label),
            Span::styled(self.stats.characters.to_string(), value),
        ]);
        f.render_widget(Paragraph::new(stats), stats_area);

        render_input(f, input_area, &self.input, "Text", "Type or paste text to count", true, ctx);
    }
}

impl Interactive for CounterPanel {
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut KeyContext<'_>) -> Handled {
        match self.input.handle_key(key) {
            InputAction::Changed | InputAction::Submit => {
                self.recount();
                Handled::Yes
            }
            InputAction::Ignored => Handled::No,
        }
    }

    fn handle_paste(&mut self, text: &str) -> Handled {
        self.input.insert_str(text);
        self.recount();
        Handled::Yes
    }

    fn is_editing(&self) -> bool {
        !self.input.text().is_empty()
    }

    fn focus_hint(&self) -> &'static str {
        "Enter:new line"
    }
}

impl Copyable for CounterPanel {
    fn copy_target(&mut self) -> Option<CopyTarget<'_>> {
        None
    }
}
