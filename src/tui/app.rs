// App state and key routing for the dashboard
//
// App is the orchestrator: it owns the widget panels, the theme, the toast
// and modal overlays, and routes input. Remote outcomes come back through
// `apply_outcome`; the panels never see the channel.

use super::components::{
    BarcodePanel, CodecPanel, CounterPanel, LinksPanel, QrPanel, ResourcesPanel, Toast, TotpPanel,
};
use super::modal::{Modal, ModalAction};
use super::traits::{ComponentId, KeyContext, RenderContext, Widget};
use crate::clipboard::ClipboardBackend;
use crate::config::Config;
use crate::controller::{copy_result, Dispatcher, Outcome, SlotId};
use crate::logging::LogBuffer;
use crate::theme::{Theme, ThemePreference};
use crate::tools::ResourceLibrary;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;
use std::time::Instant;

/// Every widget, one per tab
pub struct Panels {
    pub totp: TotpPanel,
    pub codec: CodecPanel,
    pub qr: QrPanel,
    pub barcode: BarcodePanel,
    pub counter: CounterPanel,
    pub links: LinksPanel,
    pub resources: ResourcesPanel,
}

impl Panels {
    pub fn new(config: &Config) -> Self {
        Self {
            totp: TotpPanel::new(),
            codec: CodecPanel::new(),
            qr: QrPanel::new(&config.qr),
            barcode: BarcodePanel::new(&config.barcode),
            counter: CounterPanel::new(),
            links: LinksPanel::new(),
            resources: ResourcesPanel::new(ResourceLibrary::load_or_empty(
                config.resources.path.as_deref(),
            )),
        }
    }

    pub fn get(&self, id: ComponentId) -> &dyn Widget {
        match id {
            ComponentId::Totp => &self.totp,
            ComponentId::Codec => &self.codec,
            ComponentId::Qr => &self.qr,
            ComponentId::Barcode => &self.barcode,
            ComponentId::Counter => &self.counter,
            ComponentId::Links => &self.links,
            ComponentId::Resources => &self.resources,
        }
    }

    pub fn get_mut(&mut self, id: ComponentId) -> &mut dyn Widget {
        match id {
            ComponentId::Totp => &mut self.totp,
            ComponentId::Codec => &mut self.codec,
            ComponentId::Qr => &mut self.qr,
            ComponentId::Barcode => &mut self.barcode,
            ComponentId::Counter => &mut self.counter,
            ComponentId::Links => &mut self.links,
            ComponentId::Resources => &mut self.resources,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub active: ComponentId,
    pub panels: Panels,

    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub show_logs: bool,
    pub log_buffer: LogBuffer,

    pub theme: Theme,
    theme_pref: ThemePreference,
    config: Config,

    /// Spinner frame, advanced on every tick
    animation_frame: usize,

    dispatcher: Dispatcher,
    clipboard: Box<dyn ClipboardBackend>,
    /// Where Ctrl-S writes SVG files
    export_dir: PathBuf,
}

impl App {
    pub fn new(
        config: Config,
        log_buffer: LogBuffer,
        dispatcher: Dispatcher,
        clipboard: Box<dyn ClipboardBackend>,
        persist_to: Option<PathBuf>,
        export_dir: PathBuf,
    ) -> Self {
        let theme_pref = ThemePreference::init(&config, persist_to);
        Self {
            should_quit: false,
            active: ComponentId::default(),
            panels: Panels::new(&config),
            modal: None,
            toast: None,
            show_logs: false,
            log_buffer,
            theme: theme_pref.theme(),
            theme_pref,
            config,
            animation_frame: 0,
            dispatcher,
            clipboard,
            export_dir,
        }
    }

    pub fn render_context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.theme, self.animation_frame)
    }

    pub fn active_widget(&self) -> &dyn Widget {
        self.panels.get(self.active)
    }

    /// Whether any remote request is in flight (drives the title spinner)
    pub fn any_loading(&self) -> bool {
        ComponentId::ALL
            .iter()
            .any(|id| self.panels.get(*id).is_loading())
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Advance animations and expire time-based feedback
    pub fn tick(&mut self, now: Instant) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.toast.as_ref().is_some_and(|t| t.is_expired_at(now)) {
            self.toast = None;
        }
        for id in ComponentId::ALL {
            self.panels.get_mut(id).tick(now);
        }
    }

    /// Route a finished request to its slot; stale outcomes are dropped there
    pub fn apply_outcome(&mut self, outcome: Outcome) {
        let slot = match outcome.slot {
            SlotId::Totp => Some(self.panels.totp.slot_mut()),
            id => self.panels.codec.slot_mut(id),
        };
        if let Some(slot) = slot {
            slot.finish(outcome.generation, outcome.result);
        }
    }

    // ─── Actions ──────────────────────────────────────────────────────────

    pub fn switch_to(&mut self, id: ComponentId) {
        if self.active != id {
            tracing::debug!("Switched to {:?}", id);
            self.active = id;
        }
    }

    pub fn copy_focused(&mut self, now: Instant) {
        let message = match self.panels.get_mut(self.active).copy_target() {
            None => "Nothing to copy".to_string(),
            Some(target) => {
                match copy_result(self.clipboard.as_mut(), &target.text, target.state, now) {
                    Ok(()) => "✓ Copied to clipboard".to_string(),
                    Err(e) => format!("✗ {}", e),
                }
            }
        };
        self.show_toast(message);
    }

    pub fn toggle_theme(&mut self) {
        let message = match self.theme_pref.toggle(&mut self.config) {
            Ok(kind) => format!("Theme: {}", kind),
            Err(e) => format!("✗ Theme not saved: {}", e),
        };
        self.theme = self.theme_pref.theme();
        self.show_toast(message);
    }

    pub fn save_symbol(&mut self) {
        let message = match self.active_widget().export() {
            None => "Nothing to save".to_string(),
            Some(export) => {
                let path = self.export_dir.join(export.file_name);
                match export.symbol.save_svg(&path) {
                    Ok(()) => format!("✓ Saved {}", export.file_name),
                    Err(e) => {
                        tracing::warn!("{:#}", e);
                        format!("✗ Could not save {}", export.file_name)
                    }
                }
            }
        };
        self.show_toast(message);
    }

    // ─── Input ────────────────────────────────────────────────────────────

    /// Layered dispatch: Modal → Global → active widget
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Ctrl-C always quits, even over a modal
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if let Some(modal) = self.modal.as_mut() {
            if modal.handle_input(key.code) == ModalAction::Close {
                self.modal = None;
            }
            return;
        }

        if self.handle_global_key(&key) {
            return;
        }

        let mut ctx = KeyContext {
            dispatcher: &self.dispatcher,
        };
        let widget = self.panels.get_mut(self.active);
        if !widget.handle_key(key, &mut ctx).was_handled() {
            tracing::trace!("{} ignored key {:?}", widget.id().title(), key.code);
        }
    }

    fn handle_global_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.switch_to(self.active.next()),
            KeyCode::BackTab => self.switch_to(self.active.prev()),
            KeyCode::F(12) => self.modal = Some(Modal::help()),
            KeyCode::F(n) => match ComponentId::from_function_key(n) {
                Some(id) => self.switch_to(id),
                None => return false,
            },
            KeyCode::Char('?') if !self.active_widget().is_editing() => {
                self.modal = Some(Modal::help());
            }
            KeyCode::Char('y') if ctrl => self.copy_focused(Instant::now()),
            KeyCode::Char('t') if ctrl => self.toggle_theme(),
            KeyCode::Char('l') if ctrl => self.show_logs = !self.show_logs,
            KeyCode::Char('s') if ctrl => self.save_symbol(),
            _ => return false,
        }
        true
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.modal.is_none() {
            self.panels.get_mut(self.active).handle_paste(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::fake::RecordingClipboard;
    use crate::config::{Endpoints, ServiceConfig};
    use crate::remote::{test_server, ServiceClient};
    use crate::theme::ThemeKind;
    use tokio::sync::mpsc;

    struct Harness {
        app: App,
        rx: mpsc::UnboundedReceiver<Outcome>,
        clipboard: RecordingClipboard,
        dir: tempfile::TempDir,
    }

    fn harness(base_url: &str, clipboard: RecordingClipboard) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.service = ServiceConfig {
            base_url: base_url.to_string(),
            timeout_secs: 2,
            endpoints: Endpoints::default(),
        };
        let client = ServiceClient::new(&config.service).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(
            config,
            LogBuffer::new(),
            Dispatcher::new(client, tx),
            Box::new(clipboard.clone()),
            Some(dir.path().join("config.toml")),
            dir.path().to_path_buf(),
        );
        Harness {
            app,
            rx,
            clipboard,
            dir,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn each_panel_reports_its_own_id() {
        let mut panels = Panels::new(&Config::default());
        for id in ComponentId::ALL {
            assert_eq!(panels.get(id).id(), id);
            assert_eq!(panels.get_mut(id).id(), id);
        }
    }

    #[tokio::test]
    async fn tab_and_function_keys_switch_widgets() {
        let mut h = harness("http://127.0.0.1:9", RecordingClipboard::default());
        h.app.handle_key(key(KeyCode::Tab));
        assert_eq!(h.app.active, ComponentId::Codec);
        h.app.handle_key(key(KeyCode::BackTab));
        h.app.handle_key(key(KeyCode::BackTab));
        assert_eq!(h.app.active, ComponentId::Resources);
        h.app.handle_key(key(KeyCode::F(3)));
        assert_eq!(h.app.active, ComponentId::Qr);
    }

    #[tokio::test]
    async fn question_mark_types_while_editing() {
        let mut h = harness("http://127.0.0.1:9", RecordingClipboard::default());
        h.app.handle_key(key(KeyCode::Char('?')));
        assert_eq!(h.app.modal, Some(Modal::Help));
        h.app.handle_key(key(KeyCode::Esc));
        assert!(h.app.modal.is_none());
        assert!(!h.app.should_quit);

        h.app.handle_paste("abc");
        h.app.handle_key(key(KeyCode::Char('?')));
        assert!(h.app.modal.is_none());
        assert!(h.app.active_widget().is_editing());
    }

    #[tokio::test]
    async fn totp_round_trip_then_copy() {
        let server = test_server::spawn().await;
        let mut h = harness(&format!("{}/api", server.base_url), RecordingClipboard::default());

        h.app.handle_paste("JBSWY3DPEHPK3PXP");
        h.app.handle_key(key(KeyCode::Enter));
        assert!(h.app.any_loading());

        let outcome = h.rx.recv().await.unwrap();
        h.app.apply_outcome(outcome);
        assert!(!h.app.any_loading());
        assert_eq!(h.app.panels.totp.slot().result(), Some("123456"));

        h.app.handle_key(ctrl('y'));
        assert_eq!(h.clipboard.written(), vec!["123456"]);
        assert!(h.app.panels.totp.slot().copy.is_copied());
        assert_eq!(h.app.toast.as_ref().unwrap().message, "✓ Copied to clipboard");
    }

    #[tokio::test]
    async fn failed_copy_keeps_result() {
        let server = test_server::spawn().await;
        let mut h = harness(&format!("{}/api", server.base_url), RecordingClipboard::failing());

        h.app.handle_paste("JBSWY3DPEHPK3PXP");
        h.app.handle_key(key(KeyCode::Enter));
        let outcome = h.rx.recv().await.unwrap();
        h.app.apply_outcome(outcome);

        h.app.copy_focused(Instant::now());
        assert_eq!(
            h.app.toast.as_ref().unwrap().message,
            "✗ failed to copy to clipboard"
        );
        assert_eq!(h.app.panels.totp.slot().result(), Some("123456"));
        assert!(!h.app.panels.totp.slot().copy.is_copied());
    }

    #[tokio::test]
    async fn stale_outcome_does_not_land() {
        let server = test_server::spawn().await;
        let mut h = harness(&format!("{}/api", server.base_url), RecordingClipboard::default());

        h.app.handle_paste("JBSWY3DPEHPK3PXP");
        h.app.handle_key(key(KeyCode::Enter));
        let outcome = h.rx.recv().await.unwrap();
        let stale = Outcome {
            slot: outcome.slot,
            generation: outcome.generation + 7,
            result: Ok("999999".into()),
        };
        h.app.apply_outcome(stale);
        assert!(h.app.any_loading());
        h.app.apply_outcome(outcome);
        assert_eq!(h.app.panels.totp.slot().result(), Some("123456"));
    }

    #[tokio::test]
    async fn theme_toggle_persists_and_toasts() {
        let mut h = harness("http://127.0.0.1:9", RecordingClipboard::default());
        assert_eq!(h.app.theme.kind, ThemeKind::Dark);

        h.app.handle_key(ctrl('t'));
        assert_eq!(h.app.theme.kind, ThemeKind::Light);
        assert_eq!(h.app.toast.as_ref().unwrap().message, "Theme: light");

        let saved = Config::load_file_config(&h.dir.path().join("config.toml")).unwrap();
        assert_eq!(saved.theme.as_deref(), Some("light"));
    }

    #[tokio::test]
    async fn ctrl_s_saves_current_qr() {
        let mut h = harness("http://127.0.0.1:9", RecordingClipboard::default());
        h.app.handle_key(ctrl('s'));
        assert_eq!(h.app.toast.as_ref().unwrap().message, "Nothing to save");

        h.app.switch_to(ComponentId::Qr);
        h.app.handle_paste("https://example.com");
        h.app.handle_key(ctrl('s'));
        assert_eq!(h.app.toast.as_ref().unwrap().message, "✓ Saved qrcode.svg");

        let svg = std::fs::read_to_string(h.dir.path().join("qrcode.svg")).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[tokio::test]
    async fn toast_expires_on_tick() {
        let mut h = harness("http://127.0.0.1:9", RecordingClipboard::default());
        h.app.show_toast("hello");
        h.app.tick(Instant::now() + std::time::Duration::from_secs(3));
        assert!(h.app.toast.is_none());
    }

    #[tokio::test]
    async fn esc_quits_and_ctrl_l_toggles_logs() {
        let mut h = harness("http://127.0.0.1:9", RecordingClipboard::default());
        h.app.handle_key(ctrl('l'));
        assert!(h.app.show_logs);
        h.app.handle_key(key(KeyCode::Esc));
        assert!(h.app.should_quit);
    }
}
