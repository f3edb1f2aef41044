//! One-time code widget

use super::action_view::{render_input, render_lines, slot_lines, slot_trigger};
use crate::controller::{ActionSlot, SlotId};
use crate::remote::GenerateTotp;
use crate::tui::text_input::{InputAction, TextInput};
use crate::tui::traits::{
    Component, ComponentId, CopyTarget, Copyable, Handled, Interactive, KeyContext, RenderContext,
};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

#[derive(Default)]
pub struct TotpPanel {
    secret: TextInput,
    slot: ActionSlot,
}

impl TotpPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot_mut(&mut self) -> &mut ActionSlot {
        &mut self.slot
    }

    #[cfg(test)]
    pub fn slot(&self) -> &ActionSlot {
        &self.slot
    }

    fn submit(&mut self, dispatcher: &crate::controller::Dispatcher) -> bool {
        dispatcher.submit(SlotId::Totp, &mut self.slot, GenerateTotp, self.secret.text())
    }
}

impl Component for TotpPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Totp
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let [input_area, button_area, result_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .areas(area);

        render_input(
            f,
            input_area,
            &self.secret,
            "Secret key",
            "Base32 secret, e.g. JBSWY3DPEHPK3PXP",
            true,
            ctx,
        );

        let button = slot_trigger(
            "Generate",
            "Generating…",
            &self.slot,
            self.secret.text(),
            true,
            ctx,
        );
        f.render_widget(Paragraph::new(Line::from(vec![" ".into(), button])), button_area);

        render_lines(
            f,
            result_area,
            "Code",
            slot_lines("Code", &self.slot, ctx.theme),
            ctx.theme,
        );
    }
}

impl Interactive for TotpPanel {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut KeyContext<'_>) -> Handled {
        match self.secret.handle_key(key) {
            InputAction::Submit => {
                self.submit(ctx.dispatcher);
                Handled::Yes
            }
            InputAction::Changed => Handled::Yes,
            InputAction::Ignored => Handled::No,
        }
    }

    fn handle_paste(&mut self, text: &str) -> Handled {
        self.secret.insert_str(text);
        Handled::Yes
    }

    fn is_editing(&self) -> bool {
        !self.secret.text().is_empty()
    }

    fn is_loading(&self) -> bool {
        self.slot.is_loading()
    }

    fn tick(&mut self, now: std::time::Instant) {
        self.slot.copy.tick(now);
    }
}

impl Copyable for TotpPanel {
    fn copy_target(&mut self) -> Option<CopyTarget<'_>> {
        let text = self.slot.result()?.to_string();
        Some(CopyTarget {
            text,
            state: &mut self.slot.copy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Endpoints, ServiceConfig};
    use crate::controller::{ActionState, Dispatcher, Outcome};
    use crate::remote::{test_server, ServiceClient};
    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::sync::mpsc;

    fn dispatcher(base_url: &str) -> (Dispatcher, mpsc::UnboundedReceiver<Outcome>) {
        let client = ServiceClient::new(&ServiceConfig {
            base_url: base_url.to_string(),
            timeout_secs: 2,
            endpoints: Endpoints::default(),
        })
        .unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        (Dispatcher::new(client, tx), rx)
    }

    fn press(panel: &mut TotpPanel, dispatcher: &Dispatcher, code: KeyCode) -> Handled {
        let mut ctx = KeyContext { dispatcher };
        panel.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &mut ctx)
    }

    #[tokio::test]
    async fn enter_generates_code() {
        let server = test_server::spawn().await;
        let (dispatcher, mut rx) = dispatcher(&format!("{}/api", server.base_url));
        let mut panel = TotpPanel::new();
        panel.handle_paste("JBSWY3DPEHPK3PXP");

        assert_eq!(press(&mut panel, &dispatcher, KeyCode::Enter), Handled::Yes);
        assert!(panel.is_loading());

        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.slot, SlotId::Totp);
        panel.slot_mut().finish(outcome.generation, outcome.result);
        assert_eq!(panel.slot().result(), Some("123456"));
        assert!(!panel.is_loading());
    }

    #[tokio::test]
    async fn empty_secret_fails_without_request() {
        let server = test_server::spawn().await;
        let (dispatcher, _rx) = dispatcher(&format!("{}/api", server.base_url));
        let mut panel = TotpPanel::new();
        panel.handle_paste("   ");

        press(&mut panel, &dispatcher, KeyCode::Enter);
        assert_eq!(panel.slot().error(), Some("please enter text to generate a code"));
        assert_eq!(server.hit_count(), 0);
    }

    fn edit_secret(panel: &mut TotpPanel, dispatcher: &Dispatcher) {
        press(panel, dispatcher, KeyCode::Char('Z'));
        press(panel, dispatcher, KeyCode::Backspace);
        press(panel, dispatcher, KeyCode::Backspace);
        panel.handle_paste("QQ");
    }

    #[tokio::test]
    async fn editing_keeps_the_shown_code() {
        let server = test_server::spawn().await;
        let (dispatcher, mut rx) = dispatcher(&format!("{}/api", server.base_url));
        let mut panel = TotpPanel::new();
        panel.handle_paste("JBSWY3DPEHPK3PXP");
        press(&mut panel, &dispatcher, KeyCode::Enter);
        let outcome = rx.recv().await.unwrap();
        panel.slot_mut().finish(outcome.generation, outcome.result);
        assert_eq!(server.hit_count(), 1);

        edit_secret(&mut panel, &dispatcher);

        assert_eq!(panel.secret.text(), "JBSWY3DPEHPK3PXQQ");
        assert_eq!(panel.slot().state(), ActionState::Succeeded);
        assert_eq!(panel.slot().result(), Some("123456"));
        assert_eq!(server.hit_count(), 1);
    }

    #[tokio::test]
    async fn editing_keeps_the_shown_error() {
        let server = test_server::spawn().await;
        let (dispatcher, mut rx) = dispatcher(&format!("{}/api", server.base_url));
        let mut panel = TotpPanel::new();
        panel.handle_paste("NOTASECRET");
        press(&mut panel, &dispatcher, KeyCode::Enter);
        let outcome = rx.recv().await.unwrap();
        panel.slot_mut().finish(outcome.generation, outcome.result);
        assert_eq!(panel.slot().error(), Some("Invalid secret key"));

        edit_secret(&mut panel, &dispatcher);

        assert_eq!(panel.slot().state(), ActionState::Failed);
        assert_eq!(panel.slot().error(), Some("Invalid secret key"));
        assert!(panel.slot().result().is_none());
        assert_eq!(server.hit_count(), 1);
    }

    #[test]
    fn nothing_to_copy_before_a_result() {
        let mut panel = TotpPanel::new();
        assert!(panel.copy_target().is_none());
    }
}
