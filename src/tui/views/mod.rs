// Views module - screen-level rendering
//
// Shell layout: title bar (with tab strip), active widget, optional logs
// panel, status bar. Modal and toast overlays render last.

mod modal;

use super::app::App;
use crate::tui::components;
use crate::tui::layout::Breakpoint;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let ctx = app.render_context();

    // Theme background over the whole frame (respects use_theme_background)
    f.render_widget(Block::default().style(Style::default().bg(app.theme.background)), f.area());

    let logs_height = if app.show_logs { logs_height(f.area()) } else { 0 };
    let [title_area, content_area, logs_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(logs_height),
        Constraint::Length(2),
    ])
    .areas(f.area());

    let widget = app.active_widget();
    components::render_title(f, title_area, app.active, app.any_loading(), &ctx);
    widget.render(f, content_area, &ctx);
    if app.show_logs {
        components::render_logs_panel(f, logs_area, &app.log_buffer, &app.theme);
    }
    components::render_status(f, status_area, widget.focus_hint(), &ctx);

    if let Some(modal_state) = &app.modal {
        modal::render(f, modal_state, app);
    }

    // Toast on top of the modal too
    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}

/// Logs take more room on tall-and-wide terminals
fn logs_height(area: Rect) -> u16 {
    if Breakpoint::from_width(area.width).at_least(Breakpoint::Wide) && area.height > 40 {
        12
    } else {
        8
    }
}
