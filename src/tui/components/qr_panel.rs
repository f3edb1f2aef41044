//! QR code widget
//!
//! The preview re-renders on every edit. `↑`/`↓` change the error correction
//! level; `Ctrl-S` saves `qrcode.svg`.

use super::action_view::{panel_block, render_input, trigger};
use super::symbol_view::{fits, render_symbol};
use crate::config::QrConfig;
use crate::render::{encode_qr, QrErrorCorrection, RenderError, Symbol};
use crate::tui::text_input::{InputAction, TextInput};
use crate::tui::traits::{
    Component, ComponentId, CopyTarget, Copyable, Export, Handled, Interactive, KeyContext,
    RenderContext,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct QrPanel {
    input: TextInput,
    ecc: QrErrorCorrection,
    size: u32,
    symbol: Option<Symbol>,
    error: Option<String>,
}

impl QrPanel {
    pub fn new(config: &QrConfig) -> Self {
        Self {
            input: TextInput::single_line(),
            ecc: config.error_correction,
            size: config.size,
            symbol: None,
            error: None,
        }
    }

    #[cfg(test)]
    pub fn ecc(&self) -> QrErrorCorrection {
        self.ecc
    }

    #[cfg(test)]
    pub fn symbol(&self) -> Option<&Symbol> {
        self.symbol.as_ref()
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn refresh(&mut self) {
        match encode_qr(self.input.text(), self.ecc, self.size) {
            Ok(symbol) => {
                self.symbol = Some(symbol);
                self.error = None;
            }
            // An empty box is just an empty preview
            Err(RenderError::Empty) => {
                self.symbol = None;
                self.error = None;
            }
            Err(e) => {
                self.symbol = None;
                self.error = Some(e.to_string());
            }
        }
    }

    fn cycle_ecc(&mut self, forward: bool) {
        self.ecc = if forward { self.ecc.next() } else { self.ecc.prev() };
        self.refresh();
    }
}

impl Component for QrPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Qr
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let [input_area, controls_area, preview_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .areas(area);

        render_input(f, input_area, &self.input, "Content", "Text or URL to encode", true, ctx);

        let controls = Line::from(vec![
            Span::styled(" Error correction ", Style::default().fg(theme.muted)),
            trigger(&format!("◂ {} ▸", self.ecc.as_str()), true, true, theme),
            Span::styled(format!("  SVG {}px", self.size), Style::default().fg(theme.muted)),
        ]);
        f.render_widget(Paragraph::new(controls), controls_area);

        let block = panel_block("Preview", false, theme);
        let inner = block.inner(preview_area);
        f.render_widget(block, preview_area);

        match (&self.symbol, &self.error) {
            (Some(symbol), _) if fits(inner, symbol) => render_symbol(f, inner, symbol),
            (Some(_), _) => f.render_widget(
                Paragraph::new("Enlarge the terminal to preview; Ctrl-S still saves the SVG")
                    .style(Style::default().fg(theme.muted)),
                inner,
            ),
            (None, Some(error)) => f.render_widget(
                Paragraph::new(format!("✗ {}", error)).style(Style::default().fg(theme.error)),
                inner,
            ),
            (None, None) => {}
        }
    }
}

impl Interactive for QrPanel {
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut KeyContext<'_>) -> Handled {
        match key.code {
            KeyCode::Up => {
                self.cycle_ecc(false);
                return Handled::Yes;
            }
            KeyCode::Down => {
                self.cycle_ecc(true);
                return Handled::Yes;
            }
            _ => {}
        }

        match self.input.handle_key(key) {
            InputAction::Submit | InputAction::Changed => {
                self.refresh();
                Handled::Yes
            }
            InputAction::Ignored => Handled::No,
        }
    }

    fn handle_paste(&mut self, text: &str) -> Handled {
        self.input.insert_str(text);
        self.refresh();
        Handled::Yes
    }

    fn is_editing(&self) -> bool {
        !self.input.text().is_empty()
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓:error correction  Ctrl-S:save SVG"
    }
}

impl Copyable for QrPanel {
    fn copy_target(&mut self) -> Option<CopyTarget<'_>> {
        None
    }

    fn export(&self) -> Option<Export<'_>> {
        self.symbol.as_ref().map(|symbol| Export {
            symbol,
            file_name: "qrcode.svg",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel_with(text: &str) -> QrPanel {
        let mut panel = QrPanel::new(&QrConfig::default());
        panel.handle_paste(text);
        panel
    }

    #[test]
    fn preview_follows_edits() {
        let mut panel = panel_with("https://example.com");
        assert!(panel.symbol().is_some());
        assert_eq!(panel.export().unwrap().file_name, "qrcode.svg");

        panel.input.clear();
        panel.refresh();
        assert!(panel.symbol().is_none());
        assert!(panel.error().is_none());
        assert!(panel.export().is_none());
    }

    #[test]
    fn ecc_cycles_from_config_default() {
        let mut panel = panel_with("x");
        assert_eq!(panel.ecc(), QrErrorCorrection::H);
        panel.cycle_ecc(true);
        assert_eq!(panel.ecc(), QrErrorCorrection::L);
        panel.cycle_ecc(false);
        assert_eq!(panel.ecc(), QrErrorCorrection::H);
    }

    #[test]
    fn oversized_content_shows_fixed_message() {
        let panel = panel_with(&"A".repeat(5000));
        assert!(panel.symbol().is_none());
        assert_eq!(panel.error(), Some("Content too long for a QR code"));
    }
}
