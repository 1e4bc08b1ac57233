//! # Lookup Widget
//!
//! The terminal widget, split the way the rest of the crate is:
//!
//! - **models**: identifiers, result records, the cache and the UI state machine
//! - **services**: the HTTP fetcher, error classification and session persistence
//! - **views**: the display surface, the record renderer and the terminal painter
//! - **controllers**: the search flow and the terminal event loop
//! - **io**: injectable terminal input and output streams

pub mod controllers;
pub mod io;
pub mod models;
pub mod services;
pub mod views;

// Re-export main types for easy access
pub use controllers::{run_once, AppController, LookupController, OneShotReport, SearchOutcome};
pub use io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream};
pub use models::{Identifier, IdentifierValidator, LookupCache, ResultRecord, UiState};
pub use services::{
    classify, IniSessionStore, LookupError, LookupService, MemorySessionStore, SessionStore,
};
pub use views::{DisplaySurface, ResultRenderer, ScreenModel};
