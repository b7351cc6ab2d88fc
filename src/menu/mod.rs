//! Menu Engine
//!
//! The widget layout and focus-navigation engine plus the screen stack
//! that drives it.
//!
//! - [`widget`]: a single rectangular element with toggleable visual
//!   layers (rect, border, texture, text, scroll, rotation, track
//!   preview) and its per-frame animations.
//! - [`manager`]: owns the live screen's widgets; percentage-based flow
//!   layout into lines, dominance-cone directional navigation, pointer
//!   navigation, and token-addressed mutators.
//! - [`stack`]: the screen stack with one-frame deferred transitions and
//!   per-screen focus memory.
//! - [`colors`]: the fixed palette with lighten/darken sibling lookup.
//!
//! Everything here is plain data plus synchronous per-frame calls; no
//! SDL resources are held, so the whole engine is testable headless.

pub mod colors;
pub mod manager;
pub mod stack;
pub mod widget;

pub use manager::{Anchor, WidgetManager, WidgetToken};
pub use stack::{Screen, ScreenFactory, ScreenId, ScreenRequest, ScreenStack, StackStatus};
pub use widget::{FontSize, RoundedCorners, ScrollPreset, TextureHandle, Widget};
