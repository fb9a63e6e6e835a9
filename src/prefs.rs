//! Timer preferences
//!
//! This module centralizes the persisted timer preferences using `confy`
//! for automatic serialization and OS-specific config directory management.

use crate::constant::{
    APP_NAME, DEFAULT_BREAK_MINUTES, DEFAULT_FORCE_FOCUS_SECS, DEFAULT_WORK_MINUTES,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("Preferences error: {0}")]
    Confy(#[from] confy::ConfyError),
}

/// The three persisted timer preferences.
///
/// Every field defaults individually, so a partially written preference
/// file still loads with the documented fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Length of a work session in minutes
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,

    /// Length of a break in minutes
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,

    /// How long the window keeps grabbing focus when a work session ends
    #[serde(default = "default_force_focus_secs")]
    pub force_window_focus_secs: u32,
}

fn default_work_minutes() -> u32 {
    DEFAULT_WORK_MINUTES
}

fn default_break_minutes() -> u32 {
    DEFAULT_BREAK_MINUTES
}

fn default_force_focus_secs() -> u32 {
    DEFAULT_FORCE_FOCUS_SECS
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            force_window_focus_secs: DEFAULT_FORCE_FOCUS_SECS,
        }
    }
}

/// Storage behind the settings form, injected so callers decide where
/// preferences actually live.
pub trait PrefStore {
    /// Current preferences, with documented defaults for anything unset.
    /// Absence is not an error; read failures fall back to defaults.
    fn load(&self) -> Preferences;

    /// Write all fields unconditionally. Best-effort: failures are logged
    /// and the previously stored values remain in place.
    fn save(&self, prefs: &Preferences);
}

/// Production store backed by `confy` in the OS config directory.
pub struct ConfyStore;

impl ConfyStore {
    /// Get the preference file path
    pub fn config_path() -> Result<PathBuf, PrefsError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }
}

impl PrefStore for ConfyStore {
    fn load(&self) -> Preferences {
        match confy::load(APP_NAME, None) {
            Ok(prefs) => {
                info!("Load preferences from {:?}", Self::config_path().ok());
                prefs
            }
            Err(e) => {
                error!("Failed to load preferences, using defaults: {}", e);
                Preferences::default()
            }
        }
    }

    fn save(&self, prefs: &Preferences) {
        if let Err(e) = confy::store(APP_NAME, None, prefs) {
            error!("Failed to save preferences: {}", e);
        } else {
            info!("Save preferences to {:?}", Self::config_path().ok());
        }
    }
}

/// In-memory store used by unit tests.
#[cfg(test)]
pub(crate) struct MemoryStore {
    stored: std::sync::Mutex<Option<Preferences>>,
}

#[cfg(test)]
impl MemoryStore {
    pub(crate) fn empty() -> Self {
        Self {
            stored: std::sync::Mutex::new(None),
        }
    }

    pub(crate) fn stored(&self) -> Option<Preferences> {
        *self.stored.lock().unwrap()
    }
}

#[cfg(test)]
impl PrefStore for MemoryStore {
    fn load(&self) -> Preferences {
        self.stored.lock().unwrap().unwrap_or_default()
    }

    fn save(&self, prefs: &Preferences) {
        *self.stored.lock().unwrap() = Some(*prefs);
    }
}
