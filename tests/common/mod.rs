//! Common test utilities and infrastructure
//!
//! This module provides the Cucumber world shared by every step module.

pub mod world;

// Re-export commonly used items
#[allow(unused_imports)]
pub use world::HourlineWorld;
