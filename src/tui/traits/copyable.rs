//! Copyable trait for components that provide clipboard content

use super::Component;
use crate::controller::CopyState;
use crate::render::Symbol;

/// Text to copy and the feedback slot to update
pub struct CopyTarget<'a> {
    pub text: String,
    pub state: &'a mut CopyState,
}

/// A rendered symbol and the file name it saves to
pub struct Export<'a> {
    pub symbol: &'a Symbol,
    pub file_name: &'static str,
}

/// Trait for components that can put their result on the clipboard
///
/// On `Ctrl-Y` the active widget's copy target is written to the clipboard
/// and its `CopyState` shows the "copied" indicator.
pub trait Copyable: Component {
    /// Focused result, if there is one
    fn copy_target(&mut self) -> Option<CopyTarget<'_>>;

    /// Current symbol for `Ctrl-S`; only QR and barcode have one
    fn export(&self) -> Option<Export<'_>> {
        None
    }
}
