//! The decision core of category resolution.
//!
//! Resolution never talks to the operator itself. A miss produces a
//! [`ResolutionRequest`] describing what to ask; the caller shows it and
//! feeds the answer back through [`CategoryMapper::answer`](super::CategoryMapper::answer).

use crate::prompt::parse_index;
use std::fmt;

/// Which table a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Issue status.
    Status,
    /// Issue priority.
    Priority,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status => f.write_str("status"),
            Self::Priority => f.write_str("priority"),
        }
    }
}

/// Outcome of looking up a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The label is mapped.
    Resolved(String),
    /// The operator has to choose a value.
    NeedsInput(ResolutionRequest),
}

/// A question to put to the operator about an unmapped label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Table the label belongs to.
    pub category: Category,
    /// The unmapped source label.
    pub label: String,
    /// Known target values, indexed from 0.
    pub options: Vec<String>,
    /// Display hint per option (the labels already mapped to it).
    pub hints: Vec<String>,
}

impl ResolutionRequest {
    /// Menu listing the options.
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = format!(
            "No matching {} found for \"{}\"!\n",
            self.category, self.label
        );
        for (index, option) in self.options.iter().enumerate() {
            match self.hints.get(index).filter(|hint| !hint.is_empty()) {
                Some(hint) => text.push_str(&format!("[{index}] – {option} ({hint})\n")),
                None => text.push_str(&format!("[{index}] – {option}\n")),
            }
        }
        text
    }

    /// Question shown after the menu.
    #[must_use]
    pub fn question(&self) -> String {
        format!("Please indicate which {} to use for \"{}\"", self.category, self.label)
    }

    /// Interprets an answer. `None` means the question must be asked again.
    ///
    /// Statuses accept an index or one of the listed values. Priorities also
    /// accept any other literal weight, and an empty answer picks option 0.
    #[must_use]
    pub fn interpret(&self, answer: &str) -> Option<String> {
        let answer = answer.trim();
        if let Some(index) = parse_index(answer, self.options.len()) {
            return Some(self.options[index].clone());
        }
        if self.options.iter().any(|option| option == answer) {
            return Some(answer.to_string());
        }
        match self.category {
            Category::Status => None,
            Category::Priority if answer.is_empty() => self.options.first().cloned(),
            Category::Priority => Some(answer.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(category: Category) -> ResolutionRequest {
        ResolutionRequest {
            category,
            label: "Unknown".to_string(),
            options: vec!["open".to_string(), "resolved".to_string()],
            hints: Vec::new(),
        }
    }

    #[test]
    fn renders_the_menu() {
        assert_eq!(
            request(Category::Status).render(),
            "No matching status found for \"Unknown\"!\n[0] – open\n[1] – resolved\n"
        );
    }

    #[test]
    fn status_accepts_index_or_known_value() {
        let request = request(Category::Status);
        assert_eq!(request.interpret("1").as_deref(), Some("resolved"));
        assert_eq!(request.interpret("open").as_deref(), Some("open"));
        assert_eq!(request.interpret("2"), None);
        assert_eq!(request.interpret("wontfix"), None);
        assert_eq!(request.interpret(""), None);
    }

    #[test]
    fn priority_accepts_literals_and_defaults_blank() {
        let request = ResolutionRequest {
            options: vec!["100".to_string(), "50".to_string()],
            ..request(Category::Priority)
        };
        assert_eq!(request.interpret("1").as_deref(), Some("50"));
        assert_eq!(request.interpret("80").as_deref(), Some("80"));
        assert_eq!(request.interpret("").as_deref(), Some("100"));
    }
}
