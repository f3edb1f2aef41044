//! Interactive trait for components that handle keyboard input

use super::Component;
use crate::controller::Dispatcher;
use crossterm::event::KeyEvent;

/// Result of handling a key event
///
/// Tells the App whether the component consumed the event or if it should
/// bubble up for fallback handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// What a component may reach while handling a key
pub struct KeyContext<'a> {
    /// Sends remote actions; outcomes come back through the App
    pub dispatcher: &'a Dispatcher,
}

/// Trait for components that handle keyboard input
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// Modal (help)
///    │ if none open
///    ▼
/// App (Tab, F-keys, Ctrl chords, Esc)
///    │ if not handled
///    ▼
/// Active widget (via Interactive)
/// ```
pub trait Interactive: Component {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut KeyContext<'_>) -> Handled;

    /// Bracketed paste into the focused input
    fn handle_paste(&mut self, _text: &str) -> Handled {
        Handled::No
    }

    /// True while the focused input holds text, so `?` types instead of
    /// opening help
    fn is_editing(&self) -> bool {
        false
    }

    /// Whether any request of this widget is in flight
    fn is_loading(&self) -> bool {
        false
    }

    /// Expire time-based feedback
    fn tick(&mut self, _now: std::time::Instant) {}

    /// Keybind hints for the status bar
    fn focus_hint(&self) -> &'static str {
        "Enter:submit"
    }
}
