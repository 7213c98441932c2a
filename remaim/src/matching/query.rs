//! Full-text query derivation.

/// Characters with a meaning in the full-text search syntax (boolean mode).
const SEARCH_OPERATORS: &[char] = &['+', '-', '<', '>', '(', ')', '~', '*', '"', '@'];

/// Derives the full-text query for an issue.
///
/// Search operators are removed, the rest is kept verbatim and whitespace is
/// collapsed into single spaces. Descriptions that are empty after stripping
/// fall back to the title.
#[must_use]
pub fn fulltext_query(description: &str, title: &str) -> String {
    let query = normalize(description);
    if query.is_empty() {
        normalize(title)
    } else {
        query
    }
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !SEARCH_OPERATORS.contains(c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_search_operators() {
        assert_eq!(
            fulltext_query("A task with +- special chars.", "t"),
            "A task with special chars."
        );
    }

    #[test]
    fn collapses_whitespace_and_newlines() {
        assert_eq!(
            fulltext_query("  line one\n\n  line   two ", "t"),
            "line one line two"
        );
    }

    #[test]
    fn keeps_plain_text_verbatim() {
        assert_eq!(
            fulltext_query("A random description of a task", "t"),
            "A random description of a task"
        );
    }

    #[test]
    fn falls_back_to_title() {
        assert_eq!(fulltext_query(" +- ", "Broken (login)"), "Broken login");
    }
}
