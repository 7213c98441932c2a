#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod attachments;
pub mod catalog;
pub mod conduit;
pub mod config;
pub mod identity;
pub mod mapping;
pub mod markup;
pub mod matching;
pub mod prompt;
pub mod redmine;
pub mod runner;
pub mod summary;
pub mod transactions;

pub use attachments::{AttachmentRelay, RelayError};
pub use catalog::{ProjectCatalog, ProjectPage, ProjectQuery, TargetProject};
pub use conduit::{Conduit, ConduitError, HttpConduit};
pub use config::{Config, ConfigError};
pub use identity::IdentityResolver;
pub use mapping::{
    fetch_status_map, priority_map, Category, CategoryMap, CategoryMapper, Resolution,
    ResolutionRequest,
};
pub use markup::{MarkupConverter, TextileConverter, Verbatim};
pub use matching::{
    fulltext_query, CandidateChoice, MatchDecision, MatchError, MatchOutcome, TargetTask,
    TaskMatcher,
};
pub use prompt::{PromptError, StdTerminal, Terminal};
pub use redmine::{RedmineClient, SourceClient, SourceError, SourceIssue, SourceProject};
pub use runner::{
    create_or_update, parse_project_choice, run_session, Migrator, ProjectChoice, Runner,
    RunnerConfig, RunnerError, Wizard,
};
pub use summary::{RunSummary, SubmissionResult};
pub use transactions::{
    AssemblyInput, CommentRenderer, MigrateError, Policies, TemplateError, Transaction,
    TransactionAssembler, TransactionKind, TransactionValue,
};
