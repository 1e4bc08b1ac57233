//! Non-interactive lookup: run one search through the same controller the
//! terminal UI uses and report the resulting screen as plain text.

use crate::config::LookupSettings;
use crate::repl::controllers::lookup_controller::LookupController;
use crate::repl::models::UiState;
use crate::repl::services::SessionStore;
use crate::repl::views::ScreenModel;
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneShotReport {
    pub text: String,
    pub succeeded: bool,
}

pub async fn run_once(
    settings: &LookupSettings,
    session: Box<dyn SessionStore>,
    raw: &str,
) -> Result<OneShotReport> {
    let mut lookup = LookupController::new(settings, ScreenModel::new(), session)?;
    lookup.input_edited(raw);

    let outcome = lookup.search_and_wait(raw).await;
    tracing::debug!("One-shot lookup finished: {:?}", outcome);

    Ok(OneShotReport {
        text: lookup.surface().to_plain_text(),
        succeeded: lookup.state() == UiState::Success,
    })
}
