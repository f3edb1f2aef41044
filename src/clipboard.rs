//! Clipboard access with a two-path fallback
//!
//! The primary path goes through `arboard` (X11/Wayland/macOS/Windows). When
//! that is unavailable, typically a headless session or a terminal over SSH
//! with no display connection, the text is piped into the first external
//! clipboard helper that accepts it. The helper process is always reaped,
//! whether the write succeeded or not.

use std::fmt;
use std::io::Write;
use std::process::{Child, Command, Stdio};

/// Both write paths failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardError {
    /// Underlying reasons, one per path tried
    pub causes: Vec<String>,
}

impl ClipboardError {
    pub const MESSAGE: &'static str = "failed to copy to clipboard";

    fn single(cause: impl Into<String>) -> Self {
        Self {
            causes: vec![cause.into()],
        }
    }
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::MESSAGE)
    }
}

impl std::error::Error for ClipboardError {}

/// Something that can accept clipboard text
pub trait ClipboardBackend {
    /// Short name for logs
    fn name(&self) -> &str;

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Primary path: arboard
// ─────────────────────────────────────────────────────────────────────────────

/// System clipboard through `arboard`
///
/// The handle is opened lazily and kept. On X11 the selection is owned by
/// the process holding the handle, so dropping it right after a write can
/// lose the contents.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &str {
        "system"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::single(format!("clipboard unavailable: {}", e)))?;
            self.inner = Some(clipboard);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(ClipboardError::single("clipboard unavailable"));
        };
        match clipboard.set_text(text.to_string()) {
            Ok(()) => Ok(()),
            Err(e) => {
                // Stale handle; reopen on the next attempt
                self.inner = None;
                Err(ClipboardError::single(format!(
                    "failed to set clipboard text: {}",
                    e
                )))
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fallback path: external helper
// ─────────────────────────────────────────────────────────────────────────────

/// Kills and reaps a helper process when dropped, unless it was already waited on
struct ChildGuard {
    child: Option<Child>,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self { child: Some(child) }
    }

    fn child_mut(&mut self) -> Option<&mut Child> {
        self.child.as_mut()
    }

    fn wait(mut self) -> std::io::Result<std::process::ExitStatus> {
        match self.child.take() {
            Some(mut child) => child.wait(),
            None => Err(std::io::Error::other("helper already reaped")),
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// One external clipboard helper invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl HelperCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn run(&self, text: &str) -> Result<(), String> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| format!("{}: {}", self.program, e))?;
        let mut guard = ChildGuard::new(child);

        {
            let Some(child) = guard.child_mut() else {
                return Err(format!("{}: process lost", self.program));
            };
            let Some(mut stdin) = child.stdin.take() else {
                return Err(format!("{}: no stdin", self.program));
            };
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| format!("{}: {}", self.program, e))?;
            // stdin dropped here so the helper sees EOF
        }

        let status = guard.wait().map_err(|e| format!("{}: {}", self.program, e))?;
        if status.success() {
            Ok(())
        } else {
            Err(format!("{}: exited with {}", self.program, status))
        }
    }
}

/// Pipes text into the first helper that succeeds
pub struct CommandClipboard {
    helpers: Vec<HelperCommand>,
}

impl CommandClipboard {
    pub fn new(helpers: Vec<HelperCommand>) -> Self {
        Self { helpers }
    }

    /// Helpers commonly present on the current platform
    pub fn platform_default() -> Self {
        let helpers = if cfg!(target_os = "macos") {
            vec![HelperCommand::new("pbcopy", &[])]
        } else if cfg!(windows) {
            vec![HelperCommand::new("clip.exe", &[])]
        } else {
            vec![
                HelperCommand::new("wl-copy", &[]),
                HelperCommand::new("xclip", &["-selection", "clipboard"]),
                HelperCommand::new("xsel", &["--clipboard", "--input"]),
                // WSL
                HelperCommand::new("clip.exe", &[]),
            ]
        };
        Self::new(helpers)
    }
}

impl ClipboardBackend for CommandClipboard {
    fn name(&self) -> &str {
        "command"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut causes = Vec::new();
        for helper in &self.helpers {
            match helper.run(text) {
                Ok(()) => {
                    tracing::debug!("Copied via {}", helper.program);
                    return Ok(());
                }
                Err(e) => causes.push(e),
            }
        }
        if causes.is_empty() {
            causes.push("no clipboard helper configured".to_string());
        }
        Err(ClipboardError { causes })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chain
// ─────────────────────────────────────────────────────────────────────────────

/// Primary backend with a fallback
pub struct ClipboardChain {
    primary: Box<dyn ClipboardBackend>,
    fallback: Box<dyn ClipboardBackend>,
}

impl ClipboardChain {
    pub fn new(primary: Box<dyn ClipboardBackend>, fallback: Box<dyn ClipboardBackend>) -> Self {
        Self { primary, fallback }
    }

    /// arboard first, then platform helpers
    pub fn system() -> Self {
        Self::new(
            Box::new(SystemClipboard::new()),
            Box::new(CommandClipboard::platform_default()),
        )
    }
}

impl ClipboardBackend for ClipboardChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let primary_err = match self.primary.set_text(text) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        tracing::debug!(
            "{} clipboard failed ({}), trying {}",
            self.primary.name(),
            primary_err.causes.join("; "),
            self.fallback.name()
        );

        match self.fallback.set_text(text) {
            Ok(()) => Ok(()),
            Err(fallback_err) => {
                let mut causes = primary_err.causes;
                causes.extend(fallback_err.causes);
                tracing::warn!("Clipboard write failed: {}", causes.join("; "));
                Err(ClipboardError { causes })
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory backends for tests

    use super::{ClipboardBackend, ClipboardError};
    use std::sync::{Arc, Mutex};

    /// Records writes; fails every write when `fail` is set
    #[derive(Clone, Default)]
    pub struct RecordingClipboard {
        pub writes: Arc<Mutex<Vec<String>>>,
        pub fail: bool,
    }

    impl RecordingClipboard {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn written(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl ClipboardBackend for RecordingClipboard {
        fn name(&self) -> &str {
            "recording"
        }

        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError {
                    causes: vec!["unavailable".to_string()],
                });
            }
            self.writes.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::RecordingClipboard;
    use super::*;

    #[test]
    fn primary_success_skips_fallback() {
        let primary = RecordingClipboard::default();
        let fallback = RecordingClipboard::default();
        let mut chain = ClipboardChain::new(Box::new(primary.clone()), Box::new(fallback.clone()));

        chain.set_text("123456").unwrap();
        assert_eq!(primary.written(), vec!["123456"]);
        assert!(fallback.written().is_empty());
    }

    #[test]
    fn fallback_used_when_primary_unavailable() {
        let fallback = RecordingClipboard::default();
        let mut chain = ClipboardChain::new(
            Box::new(RecordingClipboard::failing()),
            Box::new(fallback.clone()),
        );

        chain.set_text("aGVsbG8=").unwrap();
        assert_eq!(fallback.written(), vec!["aGVsbG8="]);
    }

    #[test]
    fn both_paths_failing_reports_fixed_message() {
        let mut chain = ClipboardChain::new(
            Box::new(RecordingClipboard::failing()),
            Box::new(RecordingClipboard::failing()),
        );

        let err = chain.set_text("x").unwrap_err();
        assert_eq!(err.to_string(), "failed to copy to clipboard");
        assert_eq!(err.causes.len(), 2);
    }

    #[test]
    fn missing_helper_binary_is_an_error() {
        let mut helpers = CommandClipboard::new(vec![HelperCommand::new(
            "definitely-not-a-clipboard-helper",
            &[],
        )]);
        let err = helpers.set_text("x").unwrap_err();
        assert!(err.causes[0].starts_with("definitely-not-a-clipboard-helper"));
    }

    #[test]
    fn empty_helper_list_is_an_error() {
        let mut helpers = CommandClipboard::new(Vec::new());
        assert!(helpers.set_text("x").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn helper_receives_text_and_is_reaped() {
        // `false` exits 1 without reading, so the chain moves on to `cat`
        let mut ok = CommandClipboard::new(vec![HelperCommand::new("cat", &[])]);
        assert!(ok.set_text("hello").is_ok());

        let mut first_fails = CommandClipboard::new(vec![
            HelperCommand::new("false", &[]),
            HelperCommand::new("cat", &[]),
        ]);
        assert!(first_fails.set_text("hello").is_ok());
    }
}
