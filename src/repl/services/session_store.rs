//! # Session Store
//!
//! Best-effort persistence of the most recently searched identifier.
//! Read and write failures are logged and swallowed; they never reach the UI.

use ini::Ini;
use std::path::{Path, PathBuf};

const SESSION_SECTION: &str = "session";
const LAST_IDENTIFIER_KEY: &str = "last_matricula";

pub trait SessionStore: Send {
    fn load_last_identifier(&self) -> Option<String>;

    fn save_last_identifier(&mut self, identifier: &str);
}

/// Stores the session in an INI file
#[derive(Debug, Clone)]
pub struct IniSessionStore {
    path: PathBuf,
}

impl IniSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, identifier: &str) -> anyhow::Result<()> {
        let mut ini = if self.path.exists() {
            Ini::load_from_file(&self.path)?
        } else {
            Ini::new()
        };
        ini.with_section(Some(SESSION_SECTION))
            .set(LAST_IDENTIFIER_KEY, identifier);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        ini.write_to_file(&self.path)?;
        Ok(())
    }
}

impl SessionStore for IniSessionStore {
    fn load_last_identifier(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }

        match Ini::load_from_file(&self.path) {
            Ok(ini) => ini
                .section(Some(SESSION_SECTION))
                .and_then(|section| section.get(LAST_IDENTIFIER_KEY))
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            Err(e) => {
                tracing::warn!("Failed to read session from {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save_last_identifier(&mut self, identifier: &str) {
        if let Err(e) = self.write(identifier) {
            tracing::warn!("Failed to save session to {}: {}", self.path.display(), e);
        }
    }
}

/// Keeps the session in memory only
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    last_identifier: Option<String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_last_identifier(identifier: impl Into<String>) -> Self {
        Self {
            last_identifier: Some(identifier.into()),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load_last_identifier(&self) -> Option<String> {
        self.last_identifier.clone()
    }

    fn save_last_identifier(&mut self, identifier: &str) {
        self.last_identifier = Some(identifier.to_string());
    }
}
