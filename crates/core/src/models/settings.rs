use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::currency;

/// Provider name for the Gemini API key in [`Settings::api_keys`].
pub const GEMINI_KEY: &str = "gemini";

/// Environment variable consulted by [`Settings::apply_env`].
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default daily-series window in days.
pub const DEFAULT_CHART_WINDOW_DAYS: u32 = 60;

/// Longest accepted daily-series window (10 years).
pub const MAX_CHART_WINDOW_DAYS: u32 = 3650;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Which screen the presentation layer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Settings,
    Subscription,
}

/// User-configurable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Display currency code (must be in the currency table)
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub view: View,

    /// Length of the daily balance window when there are transactions
    #[serde(default = "default_window")]
    pub chart_window_days: u32,

    /// API keys by provider name (e.g. "gemini")
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_window() -> u32 {
    DEFAULT_CHART_WINDOW_DAYS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            theme: Theme::default(),
            view: View::default(),
            chart_window_days: DEFAULT_CHART_WINDOW_DAYS,
            api_keys: HashMap::new(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidConfig(format!("Failed to parse settings: {e}")))?;
        settings.normalize()?;
        Ok(settings)
    }

    /// Load settings from a JSON file (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, CoreError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading settings");
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        debug!(currency = %settings.currency, "Successfully loaded settings");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    /// Check the currency against the currency table and the window bounds.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !currency::is_supported(&self.currency) {
            return Err(CoreError::InvalidConfig(format!(
                "Unsupported currency '{}'",
                self.currency
            )));
        }
        if self.chart_window_days == 0 || self.chart_window_days > MAX_CHART_WINDOW_DAYS {
            return Err(CoreError::InvalidConfig(format!(
                "Chart window of {} days must be between 1 and {MAX_CHART_WINDOW_DAYS}",
                self.chart_window_days
            )));
        }
        Ok(())
    }

    /// Validate, then rewrite the currency to the table's canonical code
    /// (`" eur "` becomes `"EUR"`).
    pub fn normalize(&mut self) -> Result<(), CoreError> {
        self.validate()?;
        if let Some(info) = currency::find_currency(&self.currency) {
            self.currency = info.code.to_string();
        }
        Ok(())
    }

    /// Fill missing API keys from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Same as [`Settings::apply_env`] with an explicit variable lookup.
    /// Keys already present in the settings win over the environment.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.api_keys.contains_key(GEMINI_KEY) {
            return;
        }
        if let Some(key) = lookup(GEMINI_API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            debug!("Using Gemini API key from environment");
            self.api_keys.insert(GEMINI_KEY.to_string(), key);
        }
    }

    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.api_keys.get(provider).map(String::as_str)
    }
}
