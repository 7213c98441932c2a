//! Conversion from Redmine's Textile to Phabricator's Remarkup.

use regex::Regex;
use std::sync::LazyLock;

/// Converts rich text from the source dialect to the target dialect.
pub trait MarkupConverter: Send + Sync {
    /// Converts `text`. Never fails; unknown constructs pass through.
    fn convert(&self, text: &str) -> String;
}

/// Leaves text untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Verbatim;

impl MarkupConverter for Verbatim {
    fn convert(&self, text: &str) -> String {
        text.to_string()
    }
}

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^h([1-6])\.\s+(.*)$").expect("valid regex"));
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[\s(])\*([^*\s][^*]*?)\*").expect("valid regex"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[\s(])_([^_\s][^_]*?)_").expect("valid regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([^@\s][^@]*?)@").expect("valid regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)":(\S*[^\s.,;:!?)])"#).expect("valid regex"));
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([*#]+)\s+(.*)$").expect("valid regex"));

/// Handles the Textile constructs that show up in Redmine issues.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextileConverter;

impl MarkupConverter for TextileConverter {
    fn convert(&self, text: &str) -> String {
        let mut out = Vec::new();
        let mut in_pre = false;

        for line in text.replace("\r\n", "\n").lines() {
            let trimmed = line.trim();
            if !in_pre && trimmed.starts_with("<pre>") {
                in_pre = true;
                out.push("```".to_string());
                let rest = trimmed.trim_start_matches("<pre>");
                if let Some(body) = rest.strip_suffix("</pre>") {
                    if !body.is_empty() {
                        out.push(body.to_string());
                    }
                    out.push("```".to_string());
                    in_pre = false;
                } else if !rest.is_empty() {
                    out.push(rest.to_string());
                }
                continue;
            }
            if in_pre {
                if let Some(body) = line.strip_suffix("</pre>") {
                    if !body.trim().is_empty() {
                        out.push(body.to_string());
                    }
                    out.push("```".to_string());
                    in_pre = false;
                } else {
                    out.push(line.to_string());
                }
                continue;
            }
            out.push(convert_line(line));
        }

        if in_pre {
            out.push("```".to_string());
        }
        out.join("\n")
    }
}

fn convert_line(line: &str) -> String {
    if let Some(caps) = HEADING.captures(line) {
        let level: usize = caps[1].parse().unwrap_or(1);
        return format!("{} {}", "=".repeat(level), convert_inline(&caps[2]));
    }
    if let Some(caps) = LIST_ITEM.captures(line) {
        let marker = &caps[1];
        let bullet = if marker.starts_with('#') { "#" } else { "-" };
        let indent = "  ".repeat(marker.len());
        return format!("{indent}{bullet} {}", convert_inline(&caps[2]));
    }
    convert_inline(line)
}

fn convert_inline(text: &str) -> String {
    let text = LINK.replace_all(text, "[[$2|$1]]");
    let text = INLINE_CODE.replace_all(&text, "`$1`");
    let text = BOLD.replace_all(&text, "$1**$2**");
    ITALIC.replace_all(&text, "$1//$2//").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(text: &str) -> String {
        TextileConverter.convert(text)
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(
            convert("A random description of a task"),
            "A random description of a task"
        );
    }

    #[test]
    fn converts_headings() {
        assert_eq!(convert("h2. Steps"), "== Steps");
    }

    #[test]
    fn converts_emphasis_and_code() {
        assert_eq!(
            convert("This is *bold*, _italic_ and @code@"),
            "This is **bold**, //italic// and `code`"
        );
    }

    #[test]
    fn converts_links() {
        assert_eq!(
            convert(r#"See "the docs":https://example.com/docs."#),
            "See [[https://example.com/docs|the docs]]."
        );
    }

    #[test]
    fn converts_lists() {
        assert_eq!(convert("* one\n** two\n# first"), "  - one\n    - two\n  # first");
    }

    #[test]
    fn converts_preformatted_blocks() {
        assert_eq!(
            convert("before\n<pre>\nlet *x* = 1;\n</pre>\nafter"),
            "before\n```\nlet *x* = 1;\n```\nafter"
        );
    }

    #[test]
    fn single_line_pre() {
        assert_eq!(convert("<pre>ls -la</pre>"), "```\nls -la\n```");
    }

    #[test]
    fn verbatim_keeps_text() {
        assert_eq!(Verbatim.convert("*x*"), "*x*");
    }
}
