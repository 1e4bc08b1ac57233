//! # Services Layer
//!
//! Components that reach outside the process: the hours API and the
//! persisted session. The error classifier lives here because it speaks
//! the services' failure vocabulary.

pub mod error_classifier;
pub mod lookup;
pub mod lookup_error;
pub mod session_store;

pub use error_classifier::classify;
pub use lookup::{FetchCompletion, LookupService};
pub use lookup_error::LookupError;
pub use session_store::{IniSessionStore, MemorySessionStore, SessionStore};
