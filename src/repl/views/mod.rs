//! # Views Module
//!
//! The display-surface abstraction, the record renderer that drives it, and
//! the terminal implementation.

pub mod display_surface;
pub mod result_renderer;
pub mod screen_model;
pub mod terminal_renderer;

pub use display_surface::{CategoryRow, DisplaySurface, Focus, ProgressView, Tone};
pub use result_renderer::{ProgressSummary, ResultRenderer};
pub use screen_model::{LineStyle, ScreenLine, ScreenModel};
pub use terminal_renderer::{TerminalRenderer, ViewRenderer};
