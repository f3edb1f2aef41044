//! Barcode widget
//!
//! Generation is explicit: `Enter` encodes the current content in the
//! selected symbology. Empty content keeps the trigger disabled and never
//! reaches the encoder.

use super::action_view::{panel_block, render_input, trigger};
use super::symbol_view::{fits, render_symbol};
use crate::config::BarcodeConfig;
use crate::render::{encode_barcode, Symbol, Symbology};
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

pub struct BarcodePanel {
    input: TextInput,
    symbology: Symbology,
    height: u32,
    symbol: Option<Symbol>,
    error: Option<String>,
}

impl BarcodePanel {
    pub fn new(config: &BarcodeConfig) -> Self {
        Self {
            input: TextInput::single_line(),
            symbology: config.default_symbology,
            height: config.height,
            symbol: None,
            error: None,
        }
    }

    #[cfg(test)]
    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    #[cfg(test)]
    pub fn symbol(&self) -> Option<&Symbol> {
        self.symbol.as_ref()
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_generate(&self) -> bool {
        !self.input.text().trim().is_empty()
    }

    /// Returns false when the trigger is disabled
    fn generate(&mut self) -> bool {
        if !self.can_generate() {
            return false;
        }
        match encode_barcode(self.input.text(), self.symbology, self.height) {
            Ok(symbol) => {
                self.symbol = Some(symbol);
                self.error = None;
            }
            Err(e) => {
                tracing::debug!("Barcode rejected: {:?}", e);
                self.symbol = None;
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// A symbol in another symbology would be misleading; start over
    fn select(&mut self, symbology: Symbology) {
        self.symbology = symbology;
        self.symbol = None;
        self.error = None;
    }
}

impl Component for BarcodePanel {
    fn id(&self) -> ComponentId {
        ComponentId::Barcode
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let [input_area, controls_area, preview_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .areas(area);

        let placeholder = match self.symbology {
            Symbology::Code128 => "Any printable ASCII text",
            Symbology::Ean13 => "12 digits (13 with check digit)",
            Symbology::Ean8 => "7 digits (8 with check digit)",
            Symbology::Upca => "11 digits (12 with check digit)",
        };
        render_input(f, input_area, &self.input, "Content", placeholder, true, ctx);

        let controls = Line::from(vec![
            Span::styled(" Format ", Style::default().fg(theme.muted)),
            trigger(&format!("◂ {} ▸", self.symbology.label()), true, false, theme),
            " ".into(),
            trigger("Generate", self.can_generate(), true, theme),
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

impl Interactive for BarcodePanel {
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut KeyContext<'_>) -> Handled {
        match key.code {
            KeyCode::Up => {
                self.select(self.symbology.prev());
                return Handled::Yes;
            }
            KeyCode::Down => {
                self.select(self.symbology.next());
                return Handled::Yes;
            }
            _ => {}
        }

        match self.input.handle_key(key) {
            InputAction::Submit => {
                self.generate();
                Handled::Yes
            }
            InputAction::Changed => Handled::Yes,
            InputAction::Ignored => Handled::No,
        }
    }

    fn handle_paste(&mut self, text: &str) -> Handled {
        self.input.insert_str(text);
        Handled::Yes
    }

    fn is_editing(&self) -> bool {
        !self.input.text().is_empty()
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓:format  Enter:generate  Ctrl-S:save SVG"
    }
}

impl Copyable for BarcodePanel {
    fn copy_target(&mut self) -> Option<CopyTarget<'_>> {
        None
    }

    fn export(&self) -> Option<Export<'_>> {
        self.symbol.as_ref().map(|symbol| Export {
            symbol,
            file_name: "barcode.svg",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(symbology: Symbology, text: &str) -> BarcodePanel {
        let mut panel = BarcodePanel::new(&BarcodeConfig {
            default_symbology: symbology,
            height: 80,
        });
        panel.handle_paste(text);
        panel
    }

    #[test]
    fn empty_content_disables_generate() {
        let mut panel = panel(Symbology::Code128, "   ");
        assert!(!panel.can_generate());
        assert!(!panel.generate());
        assert!(panel.symbol().is_none());
        assert!(panel.error().is_none());
    }

    #[test]
    fn ean13_generates_with_check_digit_caption() {
        let mut panel = panel(Symbology::Ean13, "400638133393");
        assert!(panel.generate());
        assert_eq!(panel.symbol().unwrap().caption, "4006381333931");
        assert_eq!(panel.export().unwrap().file_name, "barcode.svg");
    }

    #[test]
    fn invalid_content_shows_fixed_message() {
        let mut panel = panel(Symbology::Ean8, "12ab");
        panel.generate();
        assert!(panel.symbol().is_none());
        assert_eq!(panel.error(), Some("Invalid barcode data for selected format"));
    }

    #[test]
    fn switching_symbology_clears_previous_symbol() {
        let mut panel = panel(Symbology::Code128, "TRADE-42");
        panel.generate();
        assert!(panel.symbol().is_some());

        panel.select(Symbology::Ean8);
        assert_eq!(panel.symbology(), Symbology::Ean8);
        assert!(panel.symbol().is_none());
    }
}
