//! Transactions and their assembly.
//!
//! A task is created or updated by submitting an ordered list of
//! `{type, value}` transactions. Downstream consumers render them in
//! submission order, so [`TransactionAssembler`] always emits them in the
//! same sequence and never submits an empty one.

mod assembler;
mod comments;
mod error;
mod policies;
mod transaction;

pub use assembler::{AssemblyInput, TransactionAssembler};
pub use comments::CommentRenderer;
pub use error::{MigrateError, TemplateError};
pub use policies::{Policies, USERS_POLICY};
pub use transaction::{Transaction, TransactionKind, TransactionValue};
