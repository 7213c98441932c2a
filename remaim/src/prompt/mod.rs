//! Operator interaction.
//!
//! The engine never reads stdin directly; everything goes through a
//! [`Terminal`], which keeps the decision logic testable with scripted input.

mod error;
mod selection;
mod terminal;

pub use error::PromptError;
pub use selection::{confirm, parse_index, select_index};
pub use terminal::{StdTerminal, Terminal};
