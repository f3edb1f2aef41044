//! Component trait system for the dashboard
//!
//! Each widget tab is a component that renders itself, handles its own keys
//! and knows what its copy target is. The App only routes events.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                         App                          │
//! │     (modal → global keys → active widget)            │
//! └──────────────────────────────────────────────────────┘
//!                            │
//!        ┌────────┬────────┬─┴──────┬─────────┬────────┐
//!        ▼        ▼        ▼        ▼         ▼        ▼
//!      TOTP     Codec      QR    Barcode   Counter   Links …
//! ```
//!
//! - [`Component`] - identity + render
//! - [`Interactive`] - key and paste handling
//! - [`Copyable`] - copy target and SVG export

mod component;
mod copyable;
mod interactive;

pub use component::{Component, ComponentId, RenderContext};
pub use copyable::{CopyTarget, Copyable, Export};
pub use interactive::{Handled, Interactive, KeyContext};

/// A widget tab: everything the App needs from the active panel
pub trait Widget: Interactive + Copyable {}

impl<T: Interactive + Copyable> Widget for T {}
