//! Copy-to-clipboard feedback
//!
//! After a successful copy a slot shows "copied" for a fixed window. The
//! window is a single deadline, so a second copy inside it simply moves the
//! deadline forward instead of stacking resets.

use crate::clipboard::{ClipboardBackend, ClipboardError};
use std::time::{Duration, Instant};

/// How long the "copied" indicator stays on
pub const COPY_FEEDBACK_WINDOW: Duration = Duration::from_millis(2000);

/// Transient copy feedback for one result slot
#[derive(Debug, Clone, Default)]
pub struct CopyState {
    copied_until: Option<Instant>,
    error: Option<String>,
}

impl CopyState {
    /// Start (or restart) the feedback window at `now`
    pub fn mark_copied_at(&mut self, now: Instant) {
        self.copied_until = Some(now + COPY_FEEDBACK_WINDOW);
        self.error = None;
    }

    pub fn mark_failed(&mut self, err: &ClipboardError) {
        self.copied_until = None;
        self.error = Some(err.to_string());
    }

    pub fn is_copied_at(&self, now: Instant) -> bool {
        self.copied_until.is_some_and(|until| now < until)
    }

    pub fn is_copied(&self) -> bool {
        self.is_copied_at(Instant::now())
    }

    /// Local clipboard error, if the last copy failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Drop an expired window; returns true when the indicator just turned off
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.copied_until {
            Some(until) if now >= until => {
                self.copied_until = None;
                true
            }
            _ => false,
        }
    }
}

/// Copy `text` and update the slot's feedback
///
/// The computation result itself is never touched, whatever the outcome.
pub fn copy_result(
    clipboard: &mut dyn ClipboardBackend,
    text: &str,
    state: &mut CopyState,
    now: Instant,
) -> Result<(), ClipboardError> {
    match clipboard.set_text(text) {
        Ok(()) => {
            state.mark_copied_at(now);
            Ok(())
        }
        Err(e) => {
            state.mark_failed(&e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::fake::RecordingClipboard;
    use crate::clipboard::ClipboardChain;

    #[test]
    fn copied_immediately_then_resets_after_window() {
        let mut clipboard = RecordingClipboard::default();
        let mut state = CopyState::default();
        let t0 = Instant::now();

        copy_result(&mut clipboard, "123456", &mut state, t0).unwrap();
        assert!(state.is_copied_at(t0));
        assert!(state.is_copied_at(t0 + Duration::from_millis(1999)));
        assert!(!state.is_copied_at(t0 + Duration::from_millis(2000)));
        assert_eq!(clipboard.written(), vec!["123456"]);
    }

    #[test]
    fn second_copy_restarts_window() {
        let mut clipboard = RecordingClipboard::default();
        let mut state = CopyState::default();
        let t0 = Instant::now();

        copy_result(&mut clipboard, "a", &mut state, t0).unwrap();
        let t1 = t0 + Duration::from_millis(1500);
        copy_result(&mut clipboard, "a", &mut state, t1).unwrap();

        // Past the first window, still inside the second
        assert!(state.is_copied_at(t0 + Duration::from_millis(2500)));
        assert!(!state.tick(t0 + Duration::from_millis(2500)));
        assert!(state.tick(t1 + COPY_FEEDBACK_WINDOW));
        assert!(!state.is_copied_at(t1 + COPY_FEEDBACK_WINDOW));
    }

    #[test]
    fn tick_reports_transition_once() {
        let mut state = CopyState::default();
        let t0 = Instant::now();
        state.mark_copied_at(t0);

        let later = t0 + COPY_FEEDBACK_WINDOW;
        assert!(state.tick(later));
        assert!(!state.tick(later));
    }

    #[test]
    fn failed_copy_sets_local_error_only() {
        let mut chain = ClipboardChain::new(
            Box::new(RecordingClipboard::failing()),
            Box::new(RecordingClipboard::failing()),
        );
        let mut state = CopyState::default();

        let err = copy_result(&mut chain, "x", &mut state, Instant::now()).unwrap_err();
        assert_eq!(err.to_string(), "failed to copy to clipboard");
        assert_eq!(state.error(), Some("failed to copy to clipboard"));
        assert!(!state.is_copied());
    }

    #[test]
    fn copy_failure_leaves_result_untouched() {
        let mut slot = crate::controller::ActionSlot::new();
        let t = slot.begin("encode", "hello").unwrap();
        slot.finish(t.generation, Ok("aGVsbG8=".into()));

        let mut failing = RecordingClipboard::failing();
        let text = slot.result().unwrap_or_default().to_string();
        let _ = copy_result(&mut failing, &text, &mut slot.copy, Instant::now());

        assert_eq!(slot.result(), Some("aGVsbG8="));
        assert!(slot.error().is_none());
        assert!(slot.copy.error().is_some());
    }

    #[test]
    fn success_clears_previous_copy_error() {
        let mut state = CopyState::default();
        let _ = copy_result(
            &mut RecordingClipboard::failing(),
            "x",
            &mut state,
            Instant::now(),
        );
        copy_result(&mut RecordingClipboard::default(), "x", &mut state, Instant::now()).unwrap();
        assert!(state.error().is_none());
    }
}
