//! Line-based operator terminal.

use super::PromptError;
use std::io::{BufRead, Write};

/// Blocking, line-based conversation with the operator.
pub trait Terminal {
    /// Writes text as-is.
    fn print(&mut self, text: &str);

    /// Reads one line, without the trailing newline.
    ///
    /// Fails with [`PromptError::Closed`] at end of input.
    fn read_line(&mut self) -> Result<String, PromptError>;

    /// Shows `question` followed by a `> ` marker and returns the trimmed answer.
    fn prompt(&mut self, question: &str) -> Result<String, PromptError> {
        self.print(&format!("{question}:\n> "));
        Ok(self.read_line()?.trim().to_string())
    }
}

/// Terminal backed by the process' stdin and stdout.
#[derive(Debug, Default)]
pub struct StdTerminal;

impl Terminal for StdTerminal {
    fn print(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn read_line(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        let read = std::io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
