//! # Result Renderer
//!
//! Turns a [`ResultRecord`] into display-surface updates: total, status,
//! progress toward the goal, remaining hours and the category list.

use crate::repl::models::{format_hours, ResultRecord};
use crate::repl::views::display_surface::{CategoryRow, DisplaySurface, ProgressView, Tone};

/// Complementary hours required to graduate
pub const DEFAULT_GOAL_HOURS: f64 = 140.0;

/// Fill percentage above which the bar has room for its own label
const LABEL_MIN_FILL: f64 = 10.0;

pub const GOAL_REACHED_MESSAGE: &str = "🎉 Parabéns, você atingiu a meta!";
pub const EMPTY_CATEGORIES_MESSAGE: &str = "Nenhuma hora computada ainda.";

/// Progress arithmetic for one total
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSummary {
    /// Unclamped percentage of the goal
    pub percentage: f64,
    /// Percentage clamped to `[0, 100]`
    pub fill_percent: f64,
    pub rounded_percent: i64,
    pub reached: bool,
    /// Hours still missing; `0` once the goal is reached
    pub remaining: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ResultRenderer {
    goal_hours: f64,
}

impl ResultRenderer {
    pub fn new(goal_hours: f64) -> Self {
        Self { goal_hours }
    }

    pub fn summarize(&self, total: f64) -> ProgressSummary {
        let percentage = total * 100.0 / self.goal_hours;
        let reached = total >= self.goal_hours;

        ProgressSummary {
            percentage,
            fill_percent: percentage.clamp(0.0, 100.0),
            rounded_percent: percentage.round() as i64,
            reached,
            remaining: if reached {
                0.0
            } else {
                self.goal_hours - total
            },
        }
    }

    pub fn render<S: DisplaySurface + ?Sized>(&self, record: &ResultRecord, surface: &mut S) {
        let total = record.total_hours;
        let summary = self.summarize(total);

        let tone = if summary.reached {
            Tone::Success
        } else {
            Tone::Primary
        };
        surface.set_total(&format!("{} horas", format_hours(total)), tone);
        surface.set_status(&format!("Status: {}", record.status));

        surface.set_progress(&ProgressView {
            fill_percent: summary.fill_percent,
            label: (summary.fill_percent > LABEL_MIN_FILL)
                .then(|| format!("{}%", summary.rounded_percent)),
            value_now: total.clamp(0.0, self.goal_hours),
            value_max: self.goal_hours,
            accessible_label: format!("Progresso: {} por cento", summary.rounded_percent),
            complete: summary.reached,
        });

        if summary.reached {
            surface.set_remaining(GOAL_REACHED_MESSAGE);
        } else {
            surface.set_remaining(&format!(
                "Faltam {} horas para a meta de {}.",
                format_hours(summary.remaining),
                format_hours(self.goal_hours)
            ));
        }

        surface.set_categories(&category_rows(record));
    }
}

impl Default for ResultRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_GOAL_HOURS)
    }
}

fn category_rows(record: &ResultRecord) -> Vec<CategoryRow> {
    if record.categories.is_empty() {
        return vec![CategoryRow::Placeholder(EMPTY_CATEGORIES_MESSAGE.to_string())];
    }

    record
        .categories
        .iter()
        .map(|category| CategoryRow::Entry {
            name: category.name.clone(),
            hours: category.hours,
        })
        .collect()
}
