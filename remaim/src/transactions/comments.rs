//! Journal comment rendering.

use super::TemplateError;
use crate::markup::MarkupConverter;
use crate::redmine::Journal;
use handlebars::{no_escape, Handlebars};
use serde_json::json;

const COMMENT_TEMPLATE: &str = "comment";
const UNKNOWN_AUTHOR: &str = "Unknown author";

/// Renders journal entries as Phabricator comments.
///
/// Comments are posted by the importing account, so each one names the
/// original author through the template.
pub struct CommentRenderer {
    handlebars: Handlebars<'static>,
}

impl CommentRenderer {
    /// Compiles `template`.
    ///
    /// The registry does no HTML escaping (output is Remarkup) and runs in
    /// strict mode, so unknown variables fail loudly. Available variables
    /// are `author`, `date` and `notes`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the template does not compile.
    pub fn new(template: &str) -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(no_escape);
        handlebars.set_strict_mode(true);
        handlebars.register_template_string(COMMENT_TEMPLATE, template)?;
        Ok(Self { handlebars })
    }

    /// Renders one journal entry, or `None` if it carries no notes.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if rendering fails.
    pub fn render(
        &self,
        journal: &Journal,
        markup: &dyn MarkupConverter,
    ) -> Result<Option<String>, TemplateError> {
        let Some(notes) = journal.notes.as_deref().filter(|n| !n.trim().is_empty()) else {
            return Ok(None);
        };

        let data = json!({
            "author": journal.user.as_ref().map_or(UNKNOWN_AUTHOR, |u| u.name.as_str()),
            "date": journal.created_on.as_deref().unwrap_or_default(),
            "notes": markup.convert(notes),
        });
        Ok(Some(self.handlebars.render(COMMENT_TEMPLATE, &data)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_COMMENT_TEMPLATE;
    use crate::markup::Verbatim;
    use crate::redmine::NamedRef;

    fn journal(notes: Option<&str>) -> Journal {
        Journal {
            user: Some(NamedRef::named("Alfred Pennyworth")),
            notes: notes.map(str::to_string),
            created_on: Some("2016-05-10T09:12:00Z".to_string()),
        }
    }

    #[test]
    fn default_template_names_the_author() {
        let renderer = CommentRenderer::new(DEFAULT_COMMENT_TEMPLATE).unwrap();
        let comment = renderer
            .render(&journal(Some("Fixed in r42")), &Verbatim)
            .unwrap();

        assert_eq!(
            comment.as_deref(),
            Some("Alfred Pennyworth wrote on 2016-05-10T09:12:00Z:\n\nFixed in r42")
        );
    }

    #[test]
    fn empty_notes_produce_no_comment() {
        let renderer = CommentRenderer::new(DEFAULT_COMMENT_TEMPLATE).unwrap();
        assert_eq!(renderer.render(&journal(None), &Verbatim).unwrap(), None);
        assert_eq!(renderer.render(&journal(Some("  ")), &Verbatim).unwrap(), None);
    }

    #[test]
    fn no_html_escaping() {
        let renderer = CommentRenderer::new("{{notes}}").unwrap();
        let comment = renderer
            .render(&journal(Some("<b>&</b>")), &Verbatim)
            .unwrap();
        assert_eq!(comment.as_deref(), Some("<b>&</b>"));
    }

    #[test]
    fn unknown_variable_fails_in_strict_mode() {
        let renderer = CommentRenderer::new("{{missing}}").unwrap();
        assert!(renderer.render(&journal(Some("x")), &Verbatim).is_err());
    }

    #[test]
    fn broken_template_is_rejected() {
        assert!(CommentRenderer::new("{{#if notes}}unclosed").is_err());
    }
}
