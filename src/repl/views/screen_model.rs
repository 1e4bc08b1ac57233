//! # Screen Model
//!
//! In-memory [`DisplaySurface`]: holds everything the widget shows and lays
//! it out as styled text lines. The terminal renderer paints these lines;
//! one-shot mode prints them as they are.

use crate::repl::models::{format_hours, PanelLayout, UiState};
use crate::repl::views::display_surface::{
    CategoryRow, DisplaySurface, Focus, ProgressView, Tone,
};

pub const TITLE: &str = "Portal de Horas Complementares";
pub const INPUT_PROMPT: &str = "Matrícula: ";
pub const LOADING_MESSAGE: &str = "⏳ Buscando seus dados...";

/// Row of the input line
pub const INPUT_ROW: u16 = 2;

/// Width of the progress bar in cells
const PROGRESS_CELLS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Plain,
    Muted,
    Error,
    Success,
    Primary,
    Progress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLine {
    pub text: String,
    pub style: LineStyle,
}

impl ScreenLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    fn blank() -> Self {
        Self::new("", LineStyle::Plain)
    }
}

#[derive(Debug, Clone)]
pub struct ScreenModel {
    layout: PanelLayout,
    input: String,
    identifier: String,
    student_name: Option<String>,
    total: String,
    total_tone: Tone,
    status: String,
    remaining: String,
    progress: Option<ProgressView>,
    categories: Vec<CategoryRow>,
    error: String,
    focus: Focus,
    dirty: bool,
}

impl ScreenModel {
    pub fn new() -> Self {
        Self {
            layout: UiState::Idle.layout(),
            input: String::new(),
            identifier: String::new(),
            student_name: None,
            total: String::new(),
            total_tone: Tone::Primary,
            status: String::new(),
            remaining: String::new(),
            progress: None,
            categories: Vec::new(),
            error: String::new(),
            focus: Focus::Input,
            dirty: true,
        }
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn total_text(&self) -> &str {
        &self.total
    }

    pub fn total_tone(&self) -> Tone {
        self.total_tone
    }

    pub fn status_text(&self) -> &str {
        &self.status
    }

    pub fn remaining_text(&self) -> &str {
        &self.remaining
    }

    pub fn progress(&self) -> Option<&ProgressView> {
        self.progress.as_ref()
    }

    pub fn categories(&self) -> &[CategoryRow] {
        &self.categories
    }

    pub fn error_text(&self) -> &str {
        &self.error
    }

    pub fn focus_target(&self) -> Focus {
        self.focus
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Report whether anything changed since the last call
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Cursor position at the end of the input text as (column, row)
    pub fn input_cursor(&self) -> (u16, u16) {
        let column = INPUT_PROMPT.chars().count() + self.input.chars().count();
        (column.min(u16::MAX as usize) as u16, INPUT_ROW)
    }

    /// Lay out every visible panel, top to bottom
    pub fn lines(&self) -> Vec<ScreenLine> {
        let mut lines = vec![
            ScreenLine::new(TITLE, LineStyle::Title),
            ScreenLine::blank(),
            self.input_line(),
            ScreenLine::blank(),
        ];

        if self.layout.loading_visible {
            lines.push(ScreenLine::new(LOADING_MESSAGE, LineStyle::Muted));
        }

        if self.layout.error_visible {
            lines.push(ScreenLine::new(self.error.clone(), LineStyle::Error));
        }

        if self.layout.results_visible {
            self.push_results(&mut lines);
        }

        lines
    }

    /// Visible panels as plain text
    pub fn to_plain_text(&self) -> String {
        self.lines()
            .into_iter()
            .map(|line| line.text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn input_line(&self) -> ScreenLine {
        let button = if self.layout.search_enabled {
            format!("[ {} ]", self.layout.search_label)
        } else {
            format!("( {} )", self.layout.search_label)
        };
        ScreenLine::new(
            format!("{INPUT_PROMPT}{:<20}  {button}", self.input),
            LineStyle::Plain,
        )
    }

    fn push_results(&self, lines: &mut Vec<ScreenLine>) {
        let heading = match &self.student_name {
            Some(name) => format!("Matrícula {} · {}", self.identifier, name),
            None => format!("Matrícula {}", self.identifier),
        };
        lines.push(ScreenLine::new(heading, LineStyle::Muted));

        let total_style = match self.total_tone {
            Tone::Primary => LineStyle::Primary,
            Tone::Success => LineStyle::Success,
        };
        lines.push(ScreenLine::new(self.total.clone(), total_style));
        lines.push(ScreenLine::new(self.status.clone(), LineStyle::Plain));

        if let Some(progress) = &self.progress {
            lines.push(ScreenLine::new(progress_bar(progress), LineStyle::Progress));
        }
        lines.push(ScreenLine::new(self.remaining.clone(), LineStyle::Plain));

        lines.push(ScreenLine::blank());
        lines.push(ScreenLine::new("Horas por categoria", LineStyle::Title));
        for row in &self.categories {
            lines.push(match row {
                CategoryRow::Entry { name, hours } => ScreenLine::new(
                    format!("  • {name}: {} horas", format_hours(*hours)),
                    LineStyle::Plain,
                ),
                CategoryRow::Placeholder(message) => {
                    ScreenLine::new(format!("  {message}"), LineStyle::Muted)
                }
            });
        }
    }
}

impl Default for ScreenModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for ScreenModel {
    fn apply_layout(&mut self, layout: &PanelLayout) {
        self.layout = *layout;
        self.dirty = true;
    }

    fn set_input(&mut self, text: &str) {
        self.input = plain_text(text);
        self.dirty = true;
    }

    fn set_identifier(&mut self, identifier: &str, student_name: Option<&str>) {
        self.identifier = plain_text(identifier);
        self.student_name = student_name.map(plain_text);
        self.dirty = true;
    }

    fn set_total(&mut self, text: &str, tone: Tone) {
        self.total = plain_text(text);
        self.total_tone = tone;
        self.dirty = true;
    }

    fn set_status(&mut self, text: &str) {
        self.status = plain_text(text);
        self.dirty = true;
    }

    fn set_remaining(&mut self, text: &str) {
        self.remaining = plain_text(text);
        self.dirty = true;
    }

    fn set_progress(&mut self, progress: &ProgressView) {
        self.progress = Some(progress.clone());
        self.dirty = true;
    }

    fn set_categories(&mut self, rows: &[CategoryRow]) {
        self.categories = rows
            .iter()
            .map(|row| match row {
                CategoryRow::Entry { name, hours } => CategoryRow::Entry {
                    name: plain_text(name),
                    hours: *hours,
                },
                CategoryRow::Placeholder(message) => CategoryRow::Placeholder(plain_text(message)),
            })
            .collect();
        self.dirty = true;
    }

    fn set_error(&mut self, text: &str) {
        self.error = plain_text(text);
        self.dirty = true;
    }

    fn focus(&mut self, target: Focus) {
        self.focus = target;
        self.dirty = true;
    }
}

/// Drop control characters so untrusted text cannot drive the terminal
pub fn plain_text(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

fn progress_bar(progress: &ProgressView) -> String {
    let filled = ((progress.fill_percent / 100.0) * PROGRESS_CELLS as f64).round() as usize;
    let filled = filled.min(PROGRESS_CELLS);
    let bar = format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(PROGRESS_CELLS - filled)
    );
    match &progress.label {
        Some(label) => format!("{bar} {label}"),
        None => bar,
    }
}
