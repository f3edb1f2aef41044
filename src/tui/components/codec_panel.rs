//! Hash and Base64 widget
//!
//! One input feeds three independent actions, each with its own slot so a
//! slow hash never disables encode or decode. `↑`/`↓` move through the focus
//! ring; `Enter` runs the focused action (or cycles the algorithm).

use super::action_view::{panel_block, render_input, slot_lines, slot_trigger, trigger};
use crate::controller::{ActionSlot, Dispatcher, SlotId};
use crate::remote::{DecodeBase64, EncodeBase64, GenerateHash, HashAlgorithm};
use crate::tui::text_input::{InputAction, TextInput};
use crate::tui::traits::{
    Component, ComponentId, CopyTarget, Copyable, Handled, Interactive, KeyContext, RenderContext,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodecFocus {
    Algorithm,
    #[default]
    Hash,
    Encode,
    Decode,
}

impl CodecFocus {
    const RING: [CodecFocus; 4] = [Self::Algorithm, Self::Hash, Self::Encode, Self::Decode];

    fn step(self, forward: bool) -> Self {
        let i = Self::RING.iter().position(|f| *f == self).unwrap_or(0);
        let n = Self::RING.len();
        let j = if forward { (i + 1) % n } else { (i + n - 1) % n };
        Self::RING[j]
    }
}

#[derive(Default)]
pub struct CodecPanel {
    input: TextInput,
    algorithm: HashAlgorithm,
    focus: CodecFocus,
    hash: ActionSlot,
    encode: ActionSlot,
    decode: ActionSlot,
}

impl CodecPanel {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn focus(&self) -> CodecFocus {
        self.focus
    }

    #[cfg(test)]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    #[cfg(test)]
    pub fn slot(&self, id: SlotId) -> Option<&ActionSlot> {
        match id {
            SlotId::Hash => Some(&self.hash),
            SlotId::Encode => Some(&self.encode),
            SlotId::Decode => Some(&self.decode),
            SlotId::Totp => None,
        }
    }

    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut ActionSlot> {
        match id {
            SlotId::Hash => Some(&mut self.hash),
            SlotId::Encode => Some(&mut self.encode),
            SlotId::Decode => Some(&mut self.decode),
            SlotId::Totp => None,
        }
    }

    /// Slot the focus ring points at; the selector belongs to hashing
    fn focused_slot(&mut self) -> &mut ActionSlot {
        match self.focus {
            CodecFocus::Algorithm | CodecFocus::Hash => &mut self.hash,
            CodecFocus::Encode => &mut self.encode,
            CodecFocus::Decode => &mut self.decode,
        }
    }

    fn activate(&mut self, dispatcher: &Dispatcher) {
        let text = self.input.text();
        match self.focus {
            CodecFocus::Algorithm => {
                self.algorithm = self.algorithm.next();
            }
            CodecFocus::Hash => {
                dispatcher.submit(
                    SlotId::Hash,
                    &mut self.hash,
                    GenerateHash::new(self.algorithm),
                    text,
                );
            }
            CodecFocus::Encode => {
                dispatcher.submit(SlotId::Encode, &mut self.encode, EncodeBase64, text);
            }
            CodecFocus::Decode => {
                dispatcher.submit(SlotId::Decode, &mut self.decode, DecodeBase64, text);
            }
        }
    }
}

impl Component for CodecPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Codec
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let [input_area, controls_area, results_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(4),
        ])
        .areas(area);

        render_input(f, input_area, &self.input, "Text", "Text to hash, encode or decode", true, ctx);

        let text = self.input.text();
        let algorithm = trigger(
            &format!("◂ {} ▸", self.algorithm.label()),
            true,
            self.focus == CodecFocus::Algorithm,
            theme,
        );
        let controls = vec![
            Line::from(vec![
                Span::styled(" Algorithm ", Style::default().fg(theme.muted)),
                algorithm,
            ]),
            Line::from(vec![
                " ".into(),
                slot_trigger("Hash", "Hashing…", &self.hash, text, self.focus == CodecFocus::Hash, ctx),
                " ".into(),
                slot_trigger("Encode", "Encoding…", &self.encode, text, self.focus == CodecFocus::Encode, ctx),
                " ".into(),
                slot_trigger("Decode", "Decoding…", &self.decode, text, self.focus == CodecFocus::Decode, ctx),
            ]),
        ];
        f.render_widget(Paragraph::new(controls), controls_area);

        let mut lines = slot_lines("Hash", &self.hash, theme);
        lines.extend(slot_lines("Encoded", &self.encode, theme));
        lines.extend(slot_lines("Decoded", &self.decode, theme));
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(panel_block("Results", false, theme)),
            results_area,
        );
    }
}

impl Interactive for CodecPanel {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut KeyContext<'_>) -> Handled {
        match key.code {
            KeyCode::Up => {
                self.focus = self.focus.step(false);
                return Handled::Yes;
            }
            KeyCode::Down => {
                self.focus = self.focus.step(true);
                return Handled::Yes;
            }
            _ => {}
        }

        match self.input.handle_key(key) {
            InputAction::Submit => {
                self.activate(ctx.dispatcher);
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

    fn is_loading(&self) -> bool {
        self.hash.is_loading() || self.encode.is_loading() || self.decode.is_loading()
    }

    fn tick(&mut self, now: std::time::Instant) {
        for slot in [&mut self.hash, &mut self.encode, &mut self.decode] {
            slot.copy.tick(now);
        }
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓:focus  Enter:run/cycle algorithm"
    }
}

impl Copyable for CodecPanel {
    fn copy_target(&mut self) -> Option<CopyTarget<'_>> {
        let slot = self.focused_slot();
        let text = slot.result()?.to_string();
        Some(CopyTarget {
            text,
            state: &mut slot.copy,
        })
    }
}
