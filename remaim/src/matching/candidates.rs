//! Choosing between several matching tasks.

use super::{MatchOutcome, TargetTask};
use crate::prompt::parse_index;
use crate::redmine::SourceIssue;

const EXCERPT_CHARS: usize = 80;

/// An ambiguous search result the operator has to settle.
///
/// Options are the candidates in search order followed by a skip option.
/// An empty answer creates a new task instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateChoice {
    /// Source issue being matched.
    pub issue_id: u64,
    /// Title of the source issue.
    pub issue_title: String,
    /// Shortened description of the source issue.
    pub issue_excerpt: String,
    /// Search hits, in the order they are offered.
    pub candidates: Vec<TargetTask>,
}

impl CandidateChoice {
    pub(crate) fn new(issue: &SourceIssue, candidates: Vec<TargetTask>) -> Self {
        Self {
            issue_id: issue.id,
            issue_title: issue.title.clone(),
            issue_excerpt: excerpt(issue.description_text()),
            candidates,
        }
    }

    /// Index of the skip option.
    #[must_use]
    pub fn skip_index(&self) -> usize {
        self.candidates.len()
    }

    /// Text shown before asking.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!(
            "More than one task matches issue #{} \"{}\":\n{}\n\n",
            self.issue_id, self.issue_title, self.issue_excerpt
        );
        for (index, task) in self.candidates.iter().enumerate() {
            out.push_str(&format!(
                "[{index}] =>\tT{} {}\n\t[Status]: {}\n\t[Description]: {}\n",
                task.id,
                task.title,
                task.status.as_deref().unwrap_or("unknown"),
                excerpt(task.description_text())
            ));
        }
        out.push_str(&format!(
            "[{}] =>\tSkip this issue\n\nPress enter to create a new task instead.\n",
            self.skip_index()
        ));
        out
    }

    /// The question to prompt with.
    #[must_use]
    pub fn question(&self) -> String {
        "Which task should be updated".to_string()
    }

    /// Explains an unusable answer before asking again.
    #[must_use]
    pub fn retry_message(&self) -> String {
        format!(
            "You must select a value between 0 and {}, or press enter to create a new task\n",
            self.skip_index()
        )
    }

    /// Maps an answer to an outcome, or `None` if it names no option.
    #[must_use]
    pub fn interpret(&self, answer: &str) -> Option<MatchOutcome> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Some(MatchOutcome::NotFound);
        }
        let index = parse_index(answer, self.skip_index() + 1)?;
        Some(match self.candidates.get(index) {
            Some(task) => MatchOutcome::Found(task.clone()),
            None => MatchOutcome::Skip,
        })
    }
}

/// Shortens `text` to a single line of at most [`EXCERPT_CHARS`] characters.
pub(crate) fn excerpt(text: &str) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= EXCERPT_CHARS {
        return line;
    }
    let mut short: String = line.chars().take(EXCERPT_CHARS).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> TargetTask {
        TargetTask {
            id: id.to_string(),
            phid: format!("PHID-TASK-{id}"),
            title: format!("Task {id}"),
            description: Some("Same words".to_string()),
            status: Some("Open".to_string()),
            owner: None,
            projects: Vec::new(),
            priority: None,
        }
    }

    fn choice() -> CandidateChoice {
        let issue = SourceIssue::new(7, "Same words", "New");
        CandidateChoice::new(&issue, vec![task("1"), task("2")])
    }

    #[test]
    fn two_candidates_offer_three_options() {
        let choice = choice();
        assert_eq!(choice.skip_index(), 2);
        let text = choice.render();
        assert!(text.contains("[0] =>\tT1"));
        assert!(text.contains("[1] =>\tT2"));
        assert!(text.contains("[2] =>\tSkip this issue"));
    }

    #[test]
    fn answers_map_to_outcomes() {
        let choice = choice();
        assert_eq!(choice.interpret("1"), Some(MatchOutcome::Found(task("2"))));
        assert_eq!(choice.interpret("2"), Some(MatchOutcome::Skip));
        assert_eq!(choice.interpret(""), Some(MatchOutcome::NotFound));
    }

    #[test]
    fn unusable_answers_name_no_option() {
        let choice = choice();
        assert_eq!(choice.interpret("3"), None);
        assert_eq!(choice.interpret("11"), None);
        assert_eq!(choice.interpret("nope"), None);
        assert!(choice.retry_message().contains("between 0 and 2"));
    }

    #[test]
    fn long_text_is_shortened() {
        let long = "word ".repeat(40);
        let short = excerpt(&long);
        assert_eq!(short.chars().count(), EXCERPT_CHARS + 3);
        assert!(short.ends_with("..."));
    }
}
