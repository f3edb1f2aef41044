// Components module - widget panels and shell chrome
//
// Widget panels implement the trait system (Component, Interactive,
// Copyable) and own their state. Shell chrome (title, status, logs, toast)
// are plain render functions fed explicit data.

mod action_view;
mod barcode_panel;
mod codec_panel;
mod counter_panel;
mod links_panel;
mod logs_panel;
mod qr_panel;
mod resources_panel;
mod status_bar;
mod symbol_view;
mod title_bar;
mod toast;
mod totp_panel;

pub use barcode_panel::BarcodePanel;
pub use codec_panel::CodecPanel;
pub use counter_panel::CounterPanel;
pub use links_panel::LinksPanel;
pub use qr_panel::QrPanel;
pub use resources_panel::ResourcesPanel;
pub use toast::Toast;
pub use totp_panel::TotpPanel;

pub use logs_panel::render as render_logs_panel;
pub use status_bar::render as render_status;
pub use title_bar::render as render_title;
