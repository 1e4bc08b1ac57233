//! Step definitions for Cucumber tests
//!
//! Steps are organized by what they touch:
//! - `api` - responses of the mock hours API
//! - `input` - typing, pasting and triggering searches
//! - `screen` - assertions on the rendered widget

pub mod api;
pub mod input;
pub mod screen;
