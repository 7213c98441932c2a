//! Menu helpers built on [`Terminal`].

use super::{PromptError, Terminal};

/// Parses `answer` as an index into a list of `count` entries.
#[must_use]
pub fn parse_index(answer: &str, count: usize) -> Option<usize> {
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|index| *index < count)
}

/// Asks until the operator picks an index in `0..count`.
///
/// # Errors
///
/// Returns [`PromptError`] if the terminal fails or input ends.
pub fn select_index(
    terminal: &mut dyn Terminal,
    message: &str,
    count: usize,
) -> Result<usize, PromptError> {
    loop {
        let answer = terminal.prompt(message)?;
        if let Some(index) = parse_index(&answer, count) {
            return Ok(index);
        }
        terminal.print(&format!(
            "You must select a value between 0 and {}\n",
            count.saturating_sub(1)
        ));
    }
}

/// Asks a `[y/N]` question; only `y` or `Y` counts as yes.
///
/// # Errors
///
/// Returns [`PromptError`] if the terminal fails or input ends.
pub fn confirm(terminal: &mut dyn Terminal, question: &str) -> Result<bool, PromptError> {
    let answer = terminal.prompt(question)?;
    Ok(answer.eq_ignore_ascii_case("y"))
}
