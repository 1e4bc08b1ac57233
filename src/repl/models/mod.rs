//! # Models Module
//!
//! Plain data and state: the identifier, the decoded lookup result, the
//! session cache and the UI state machine. Nothing here performs I/O.

pub mod identifier;
pub mod lookup_cache;
pub mod result_record;
pub mod ui_state;

// Re-export all models for easy access
pub use identifier::{sanitize_paste, Identifier, IdentifierValidator, ValidationError};
pub use lookup_cache::LookupCache;
pub use result_record::{format_hours, Category, PayloadError, ResultRecord};
pub use ui_state::{PanelLayout, UiState, UiStateMachine};
