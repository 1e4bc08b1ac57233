//! # Display Surface
//!
//! The handful of operations the controller and the result renderer need
//! from whatever shows the widget. Every string passed in is plain text:
//! implementations must never interpret it as markup or control sequences.

use crate::repl::models::PanelLayout;

/// Emphasis of the total line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Success,
}

/// Which element holds focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Results,
}

/// Progress bar state, including its accessibility attributes
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    /// Fill width in percent, clamped to `[0, 100]`
    pub fill_percent: f64,
    /// Text drawn inside the bar, only when there is room for it
    pub label: Option<String>,
    /// Accessible value, clamped to `[0, value_max]`
    pub value_now: f64,
    pub value_max: f64,
    /// Accessible label carrying the unclamped rounded percentage
    pub accessible_label: String,
    pub complete: bool,
}

/// One row of the category list
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryRow {
    Entry { name: String, hours: f64 },
    /// Shown instead of entries when the list is empty
    Placeholder(String),
}

pub trait DisplaySurface {
    /// Show or hide panels and toggle the search control
    fn apply_layout(&mut self, layout: &PanelLayout);

    fn set_input(&mut self, text: &str);

    /// Identifier (and student name, when known) heading the results
    fn set_identifier(&mut self, identifier: &str, student_name: Option<&str>);

    fn set_total(&mut self, text: &str, tone: Tone);

    fn set_status(&mut self, text: &str);

    fn set_remaining(&mut self, text: &str);

    fn set_progress(&mut self, progress: &ProgressView);

    /// Replace the whole category list
    fn set_categories(&mut self, rows: &[CategoryRow]);

    fn set_error(&mut self, text: &str);

    fn focus(&mut self, target: Focus);
}
