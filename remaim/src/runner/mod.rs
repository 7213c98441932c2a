//! Orchestrates a migration session.
//!
//! [`Runner`] wires the configured HTTP clients into [`run_session`], which
//! bootstraps the mapping tables and hands over to the interactive
//! [`Wizard`]. Tests drive [`run_session`] directly with in-memory clients.

mod choice;
mod config;
mod error;
mod migrator;
mod wizard;

pub use choice::{parse_project_choice, ProjectChoice};
pub use config::RunnerConfig;
pub use error::RunnerError;
pub use migrator::{create_or_update, Migrator};
pub use wizard::Wizard;

use crate::conduit::{Conduit, HttpConduit};
use crate::config::{Config, ConfigError};
use crate::mapping::{fetch_status_map, priority_map, CategoryMapper};
use crate::markup::TextileConverter;
use crate::prompt::Terminal;
use crate::redmine::{RedmineClient, SourceClient};
use crate::summary::RunSummary;
use crate::transactions::CommentRenderer;
use tracing::info;

/// Runs migration sessions against the configured Redmine and Phabricator.
pub struct Runner {
    config: RunnerConfig,
    settings: Config,
    conduit: HttpConduit,
    source: RedmineClient,
}

impl Runner {
    /// Loads the configuration file and builds the clients.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the configuration is missing or invalid.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let settings = Config::load(config.config_path())?;
        let token = settings.phabricator.resolved_token().ok_or_else(|| {
            ConfigError::MissingToken {
                path: config.config_path().display().to_string(),
            }
        })?;
        let conduit = HttpConduit::new(&settings.phabricator.host, token);
        let source = RedmineClient::new(&settings.redmine)?;
        Ok(Self {
            config,
            settings,
            conduit,
            source,
        })
    }

    /// Executes an interactive session on `terminal`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the session ends with an error.
    pub async fn run(&self, terminal: &mut dyn Terminal) -> Result<RunSummary, RunnerError> {
        info!(
            redmine = %self.settings.redmine.host,
            phabricator = %self.conduit.host(),
            skip_existing = self.config.skip_existing(),
            "Starting migration session"
        );
        run_session(
            &self.conduit,
            &self.source,
            &self.settings,
            self.config.skip_existing(),
            terminal,
        )
        .await
    }
}

/// Runs a full session with the given clients.
///
/// The status table is seeded from Phabricator before anything else; if
/// Phabricator cannot be reached at that point the session ends with
/// [`RunnerError::TargetUnreachable`].
///
/// # Errors
///
/// Returns [`RunnerError`] on any unrecovered failure.
pub async fn run_session(
    conduit: &dyn Conduit,
    source: &dyn SourceClient,
    settings: &Config,
    skip_existing: bool,
    terminal: &mut dyn Terminal,
) -> Result<RunSummary, RunnerError> {
    let status = fetch_status_map(conduit, &settings.status_map)
        .await
        .map_err(|error| {
            if error.is_connectivity() {
                RunnerError::TargetUnreachable {
                    host: settings.phabricator.host.clone(),
                    source: error,
                }
            } else {
                RunnerError::Conduit(error)
            }
        })?;
    source.check_connection().await?;

    let mapper = CategoryMapper::new(status, priority_map(&settings.priority_map));
    let comments = CommentRenderer::new(&settings.comment_template)?;
    let markup = TextileConverter;
    let migrator = Migrator::new(conduit, source, &markup, &comments, mapper, skip_existing);

    Wizard::new(conduit, source, migrator).run(terminal).await
}
