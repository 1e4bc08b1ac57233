//! # Controllers Module
//!
//! The lookup controller owns the search flow; the application controller
//! wraps it in a terminal event loop, and one-shot mode runs it headless.

pub mod app_controller;
pub mod debounce;
pub mod lookup_controller;
pub mod one_shot;

// Re-export main types for convenience
pub use app_controller::AppController;
pub use debounce::Debouncer;
pub use lookup_controller::{LookupController, SearchOutcome};
pub use one_shot::{run_once, OneShotReport};
