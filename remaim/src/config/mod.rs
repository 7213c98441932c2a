//! Configuration loading.
//!
//! The importer reads a single TOML file describing how to reach Redmine and
//! Phabricator, and the category tables used to translate priorities and
//! statuses between the two.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{
    PhabricatorSettings, RedmineSettings, CONDUIT_TOKEN_ENV, REDMINE_API_KEY_ENV,
};

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// Default handlebars template used to render journal entries as comments.
pub const DEFAULT_COMMENT_TEMPLATE: &str = "{{author}} wrote on {{date}}:\n\n{{notes}}";

/// Parsed contents of the configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Handlebars template for journal comments.
    #[serde(default = "default_comment_template")]
    pub comment_template: String,

    /// Source system connection.
    pub redmine: RedmineSettings,

    /// Target system connection.
    pub phabricator: PhabricatorSettings,

    /// Redmine priority name to Maniphest priority weight.
    #[serde(default)]
    pub priority_map: IndexMap<String, u32>,

    /// Redmine status name to Maniphest status key, applied over the
    /// statuses reported by Phabricator.
    #[serde(default)]
    pub status_map: IndexMap<String, String>,
}

fn default_comment_template() -> String {
    DEFAULT_COMMENT_TEMPLATE.to_string()
}

impl Config {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, is not valid TOML or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading configuration");

        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            source: e,
        })?;

        let config = Self::parse(&content, path)?;
        debug!(
            priorities = config.priority_map.len(),
            statuses = config.status_map.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parses and validates configuration text. `path` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse or validation failure.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Malformed {
            path: path.display().to_string(),
            source: e,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Validates hosts, the forced protocol and credentials.
    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let path = path.display().to_string();

        for (field, value) in [
            ("redmine.host", &self.redmine.host),
            ("phabricator.host", &self.phabricator.host),
        ] {
            if Url::parse(value).is_err() {
                return Err(ConfigError::InvalidHost {
                    path: path.clone(),
                    field,
                    value: value.clone(),
                });
            }
        }

        if let Some(protocol) = &self.redmine.protocol {
            if protocol != "http" && protocol != "https" {
                return Err(ConfigError::InvalidProtocol {
                    path,
                    protocol: protocol.clone(),
                });
            }
        }

        if self.phabricator.resolved_token().is_none() {
            return Err(ConfigError::MissingToken { path });
        }

        if let Some((label, _)) = self
            .status_map
            .iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(ConfigError::EmptyStatus {
                path,
                label: label.clone(),
            });
        }

        Ok(())
    }
}
