//! Session guard configuration.
//!
//! Holds the server location, the fixed navigation paths, and the token key.
//! Configuration is stored at `~/.config/session-guard/config.json`; a missing
//! file yields the defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "session-guard";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding `base_url`
pub const BASE_URL_ENV: &str = "SESSION_GUARD_BASE_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:8888";
const DEFAULT_API_PREFIX: &str = "/api/v1";
const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_LOGOUT_PATH: &str = "/logout";
const DEFAULT_TOKEN_KEY: &str = "access_token";

/// HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// How the page guard decides that the current page is the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginPageMatch {
    /// The path equals the login path or continues it with a `/` segment.
    #[default]
    Segment,
    /// Any path containing the login marker (the login path without its
    /// leading `/`), e.g. `/not-login/x` matches `login`.
    Substring,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    pub base_url: String,
    pub api_prefix: String,
    pub login_path: String,
    pub logout_path: String,
    pub token_key: String,
    pub login_page_match: LoginPageMatch,
    pub request_timeout_secs: u64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            logout_path: DEFAULT_LOGOUT_PATH.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            login_page_match: LoginPageMatch::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl GuardConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply `SESSION_GUARD_BASE_URL` if it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.base_url = base_url.trim().to_string();
            }
        }
        self
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for persisted client state such as the file token store.
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Resolve a request URL. Paths starting with `/` are joined onto `base_url`;
    /// anything else is used as given.
    pub fn resolve_url(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.base_url.trim_end_matches('/'), url)
        } else {
            url.to_string()
        }
    }

    /// Full URL of the token endpoint.
    pub fn login_endpoint(&self) -> String {
        self.resolve_url(&format!("{}/auth/login", self.api_prefix.trim_end_matches('/')))
    }

    fn login_marker(&self) -> &str {
        self.login_path.trim_start_matches('/')
    }

    /// Whether `path` is the login page and therefore exempt from the page guard.
    pub fn is_login_page(&self, path: &str) -> bool {
        match self.login_page_match {
            LoginPageMatch::Substring => path.contains(self.login_marker()),
            LoginPageMatch::Segment => match path.strip_prefix(self.login_path.as_str()) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            },
        }
    }
}
