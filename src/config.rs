//! Configuration constants and profile loading for hourline
//!
//! Settings come from an INI profile file (one section per profile) with
//! command-line overrides on top. Everything resolves into a single
//! [`LookupSettings`] value handed to the controllers.

use crate::cmd_args::CommandLineArgs;
use crate::repl::controllers::debounce::DEFAULT_DEBOUNCE;
use crate::repl::models::identifier::{DEFAULT_MAX_DIGITS, DEFAULT_MIN_DIGITS};
use crate::repl::models::lookup_cache::DEFAULT_CACHE_TTL;
use crate::repl::models::ui_state::DEFAULT_ERROR_AUTOHIDE;
use crate::repl::services::lookup::DEFAULT_TIMEOUT;
use crate::repl::views::result_renderer::DEFAULT_GOAL_HOURS;
use anyhow::{anyhow, ensure, Context, Result};
use ini::{Ini, Properties};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Default profile file path for hourline
pub const DEFAULT_PROFILE_PATH: &str = "~/.hourline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "HOURLINE_PROFILE_PATH";

/// Default path of the persisted session state
pub const DEFAULT_STATE_PATH: &str = "~/.hourline/state";

/// Environment variable name for overriding the state path
pub const STATE_PATH_ENV_VAR: &str = "HOURLINE_STATE_PATH";

/// Environment variable holding the tracing filter directives
pub const LOG_FILTER_ENV_VAR: &str = "HOURLINE_LOG";

/// Environment variable naming the log file
pub const LOG_FILE_ENV_VAR: &str = "HOURLINE_LOG_FILE";

/// Hours API endpoint used when the profile does not name one
pub const DEFAULT_API_URL: &str = "https://script.google.com/macros/s/AKfycbxf2Ku_PGhVFUwCq5tSAP9GFIy8-FAiQ7azmhNugwJDUtERJ9D3pheGfEAvc1FZ5ilZMA/exec";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Get the session state path, checking environment variable first, then falling back to default
pub fn get_state_path() -> String {
    std::env::var_os(STATE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_STATE_PATH.to_string())
}

/// Expand a leading `~` to the home directory
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct LookupSettings {
    pub api_url: String,
    pub timeout: Duration,
    pub goal_hours: f64,
    pub cache_ttl: Duration,
    pub debounce: Duration,
    pub min_digits: usize,
    pub max_digits: usize,
    /// `None` keeps errors on screen until the next action
    pub error_autohide: Option<Duration>,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            goal_hours: DEFAULT_GOAL_HOURS,
            cache_ttl: DEFAULT_CACHE_TTL,
            debounce: DEFAULT_DEBOUNCE,
            min_digits: DEFAULT_MIN_DIGITS,
            max_digits: DEFAULT_MAX_DIGITS,
            error_autohide: Some(DEFAULT_ERROR_AUTOHIDE),
        }
    }
}

impl LookupSettings {
    /// Load one profile section from an INI file
    ///
    /// A missing file or section yields the defaults. Values that do not
    /// parse are an error.
    pub fn load(path: &Path, profile: &str) -> Result<Self> {
        tracing::debug!("Loading profile '{}' from '{}'", profile, path.display());

        if !path.exists() {
            tracing::debug!("Profile file not found, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)
            .with_context(|| format!("Failed to read profile file {}", path.display()))?;

        match ini.section(Some(profile)) {
            Some(section) => Self::from_section(section)
                .with_context(|| format!("Invalid profile '{profile}' in {}", path.display())),
            None => {
                tracing::debug!("Profile '{}' not found, using defaults", profile);
                Ok(Self::default())
            }
        }
    }

    fn from_section(section: &Properties) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(api_url) = section.get("api_url") {
            settings.api_url = api_url.trim().to_string();
        }
        if let Some(ms) = parse_value::<u64>(section, "timeout_ms")? {
            settings.timeout = Duration::from_millis(ms);
        }
        if let Some(goal) = parse_value::<f64>(section, "goal_hours")? {
            settings.goal_hours = goal;
        }
        if let Some(secs) = parse_value::<u64>(section, "cache_ttl_secs")? {
            settings.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_value::<u64>(section, "debounce_ms")? {
            settings.debounce = Duration::from_millis(ms);
        }
        if let Some(min) = parse_value::<usize>(section, "min_digits")? {
            settings.min_digits = min;
        }
        if let Some(max) = parse_value::<usize>(section, "max_digits")? {
            settings.max_digits = max;
        }
        if let Some(ms) = parse_value::<u64>(section, "error_autohide_ms")? {
            settings.error_autohide = (ms > 0).then(|| Duration::from_millis(ms));
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.api_url.is_empty(), "api_url must not be empty");
        ensure!(!self.timeout.is_zero(), "timeout_ms must be greater than 0");
        ensure!(
            self.goal_hours.is_finite() && self.goal_hours > 0.0,
            "goal_hours must be a positive number"
        );
        ensure!(self.min_digits >= 1, "min_digits must be at least 1");
        ensure!(
            self.min_digits <= self.max_digits,
            "min_digits ({}) must not exceed max_digits ({})",
            self.min_digits,
            self.max_digits
        );
        Ok(())
    }
}

fn parse_value<T>(section: &Properties, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    section
        .get(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| anyhow!("Invalid value '{raw}' for '{key}': {e}"))
        })
        .transpose()
}

/// Resolve settings from the profile file and command-line overrides
pub fn load_settings(cmd_args: &CommandLineArgs) -> Result<LookupSettings> {
    let profile_path = expand_path(&get_profile_path());
    let mut settings = LookupSettings::load(Path::new(&profile_path), cmd_args.profile())?;

    if let Some(api_url) = cmd_args.api_url() {
        settings.api_url = api_url.to_string();
    }
    settings.validate()?;

    tracing::info!(
        "Using profile '{}' against {}",
        cmd_args.profile(),
        settings.api_url
    );
    Ok(settings)
}
