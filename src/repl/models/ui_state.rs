//! # UI State Machine
//!
//! Exactly one of four states is active. Each state maps to a
//! [`PanelLayout`] that the display surface applies as a whole, so leaving a
//! state always resets whatever the previous state revealed.
//!
//! ```text
//!          search            record
//!   Idle ─────────▶ Loading ───────▶ Success
//!    ▲                 │  failure
//!    │ edit / timer    ▼
//!    └──────────────  Error
//! ```
//!
//! A new search moves any state back to `Loading`; a cache hit or a local
//! validation failure moves any state straight to `Success` or `Error`.

use std::time::{Duration, Instant};

/// How long the error panel stays up before returning to idle
pub const DEFAULT_ERROR_AUTOHIDE: Duration = Duration::from_secs(5);

pub const SEARCH_LABEL: &str = "Buscar";
pub const SEARCH_BUSY_LABEL: &str = "Buscando...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Loading,
    Success,
    Error,
}

/// Visibility and interactivity of every panel for one state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub loading_visible: bool,
    /// Accessibility busy flag on the loading indicator
    pub busy: bool,
    pub error_visible: bool,
    pub results_visible: bool,
    pub search_enabled: bool,
    pub search_label: &'static str,
}

impl UiState {
    pub fn layout(self) -> PanelLayout {
        let idle = PanelLayout {
            loading_visible: false,
            busy: false,
            error_visible: false,
            results_visible: false,
            search_enabled: true,
            search_label: SEARCH_LABEL,
        };

        match self {
            UiState::Idle => idle,
            UiState::Loading => PanelLayout {
                loading_visible: true,
                busy: true,
                search_enabled: false,
                search_label: SEARCH_BUSY_LABEL,
                ..idle
            },
            UiState::Success => PanelLayout {
                results_visible: true,
                ..idle
            },
            UiState::Error => PanelLayout {
                error_visible: true,
                ..idle
            },
        }
    }
}

#[derive(Debug)]
pub struct UiStateMachine {
    state: UiState,
    error_since: Option<Instant>,
    error_autohide: Option<Duration>,
}

impl UiStateMachine {
    /// `error_autohide` of `None` keeps errors up until the next action
    pub fn new(error_autohide: Option<Duration>) -> Self {
        Self {
            state: UiState::Idle,
            error_since: None,
            error_autohide,
        }
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn layout(&self) -> PanelLayout {
        self.state.layout()
    }

    pub fn begin_loading(&mut self) -> PanelLayout {
        self.enter(UiState::Loading)
    }

    pub fn succeed(&mut self) -> PanelLayout {
        self.enter(UiState::Success)
    }

    pub fn fail(&mut self, now: Instant) -> PanelLayout {
        let layout = self.enter(UiState::Error);
        self.error_since = Some(now);
        layout
    }

    pub fn reset(&mut self) -> PanelLayout {
        self.enter(UiState::Idle)
    }

    /// Editing the input dismisses a visible error
    pub fn input_edited(&mut self) -> Option<PanelLayout> {
        (self.state == UiState::Error).then(|| self.reset())
    }

    /// Auto-hide an error that has been visible long enough
    pub fn tick(&mut self, now: Instant) -> Option<PanelLayout> {
        let (since, autohide) = match (self.state, self.error_since, self.error_autohide) {
            (UiState::Error, Some(since), Some(autohide)) => (since, autohide),
            _ => return None,
        };
        (now.saturating_duration_since(since) >= autohide).then(|| self.reset())
    }

    fn enter(&mut self, state: UiState) -> PanelLayout {
        if self.state != state {
            tracing::debug!("ui state {:?} -> {:?}", self.state, state);
        }
        self.state = state;
        self.error_since = None;
        state.layout()
    }
}

impl Default for UiStateMachine {
    fn default() -> Self {
        Self::new(Some(DEFAULT_ERROR_AUTOHIDE))
    }
}
