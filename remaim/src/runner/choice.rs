//! Target project choice.

/// What the operator asked for at the target project prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectChoice {
    /// `q`: end the session.
    Quit,
    /// Empty answer: list all projects.
    Browse,
    /// `0`: create a project from the Redmine project.
    Create,
    /// A project id.
    Id(u64),
    /// A project slug.
    Slug(String),
}

/// Parses the answer to the target project prompt.
#[must_use]
pub fn parse_project_choice(answer: &str) -> ProjectChoice {
    let answer = answer.trim();
    match answer {
        "" => ProjectChoice::Browse,
        "q" | "Q" => ProjectChoice::Quit,
        "0" => ProjectChoice::Create,
        _ => match answer.parse::<u64>() {
            Ok(id) => ProjectChoice::Id(id),
            Err(_) => ProjectChoice::Slug(answer.to_string()),
        },
    }
}
