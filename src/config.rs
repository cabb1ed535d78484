use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::Preferences;

/// Name of the optional config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "Portal.toml";
/// Prefix for environment overrides, e.g. `PORTAL_BASE_URL`.
pub const ENV_PREFIX: &str = "PORTAL_";

/// Client configuration, derived from defaults, `Portal.toml` and `PORTAL_*`
/// environment variables, in increasing order of precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    // required
    base_url: String,
    // optional
    request_timeout: u64,
    token: Option<String>,
    language: String,
    theme: String,
}

/// Everything except `base_url`, which has no sensible default.
#[derive(Serialize)]
struct Defaults {
    request_timeout: u64,
    token: Option<String>,
    language: String,
    theme: String,
}

impl Default for Defaults {
    fn default() -> Self {
        let preferences = Preferences::default();
        Self {
            request_timeout: 10,
            token: None,
            language: preferences.language,
            theme: preferences.theme,
        }
    }
}

impl Config {
    /// The layered configuration sources.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Defaults::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load from the standard sources.
    pub fn load() -> Result<Self> {
        Self::from_figment(&Self::figment())
    }

    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config = figment.extract::<Self>()?;
        info!("Loaded portal config for {}", config.base_url);
        Ok(config)
    }

    /// Root URL of the portal API. Always ends in a slash so that relative
    /// paths join beneath it.
    /// Configured via `PORTAL_BASE_URL`.
    pub fn base_url(&self) -> String {
        if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        }
    }

    /// Per-request timeout.
    /// Configured via `PORTAL_REQUEST_TIMEOUT` in seconds.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Bearer token to start the session with, if any.
    /// Configured via `PORTAL_TOKEN`.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Display preferences.
    /// Configured via `PORTAL_LANGUAGE` and `PORTAL_THEME`.
    pub fn preferences(&self) -> Preferences {
        Preferences {
            language: self.language.clone(),
            theme: self.theme.clone(),
        }
    }
}
