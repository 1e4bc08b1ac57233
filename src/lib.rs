//! # hourline - Complementary Hours Lookup for the Terminal
//!
//! Type a student identifier (matrícula), press Enter, and see how many
//! complementary hours have been accumulated toward the graduation goal,
//! broken down by category.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  keys   ┌─────────────────┐  search  ┌──────────────────┐
//! │ EventStream  │────────▶│  AppController  │─────────▶│ LookupController │
//! └──────────────┘         │ - debounce      │          │ - validate       │
//!                          │ - event loop    │          │ - cache          │
//! ┌──────────────┐  paint  └─────────────────┘          │ - seq guard      │
//! │ RenderStream │◀─── TerminalRenderer ◀── ScreenModel ◀┘        │        │
//! └──────────────┘                                               ▼        │
//!                                             LookupService (reqwest) ────┘
//!                                               completions over mpsc
//! ```
//!
//! The lookup controller is generic over [`repl::views::DisplaySurface`], so
//! the same search flow drives the interactive screen, the `--once` mode and
//! the test suite.

pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;
