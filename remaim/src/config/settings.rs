//! Connection settings for both ends of a migration.

use serde::Deserialize;

/// Environment variable consulted when `[redmine] api-key` is absent.
pub const REDMINE_API_KEY_ENV: &str = "REMAIM_REDMINE_API_KEY";

/// Environment variable consulted when `[phabricator] token` is absent.
pub const CONDUIT_TOKEN_ENV: &str = "REMAIM_CONDUIT_TOKEN";

/// The `[redmine]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RedmineSettings {
    /// Base URL of the Redmine instance.
    pub host: String,

    /// REST API key (optional, falls back to `REMAIM_REDMINE_API_KEY`).
    pub api_key: Option<String>,

    /// Basic auth user, used when no API key is available.
    pub user: Option<String>,

    /// Basic auth password.
    pub password: Option<String>,

    /// Scheme forced onto attachment download URLs (`http` or `https`).
    pub protocol: Option<String>,
}

impl RedmineSettings {
    /// Returns the API key from the file or the environment.
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(REDMINE_API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

/// The `[phabricator]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PhabricatorSettings {
    /// Base URL of the Phabricator instance.
    pub host: String,

    /// Conduit API token (optional, falls back to `REMAIM_CONDUIT_TOKEN`).
    pub token: Option<String>,
}

impl PhabricatorSettings {
    /// Returns the Conduit token from the file or the environment.
    #[must_use]
    pub fn resolved_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| std::env::var(CONDUIT_TOKEN_ENV).ok())
            .filter(|token| !token.trim().is_empty())
    }
}
