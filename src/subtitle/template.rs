/*!
 * Tag-template extraction for subtitle lines.
 *
 * A subtitle line may carry presentation markup such as `{\an8}` or
 * `<i>…</i>`. Translation should only ever see the clean text, so each line
 * is split into a clean-text/format-template pair: the template is the
 * original line with the clean text replaced by a single `{}` substitution
 * slot, and every other brace doubled so it cannot be mistaken for a slot.
 * Rehydrating the template with the clean text reproduces the line exactly.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches brace-delimited and angle-bracket style presentation tags
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[^{}]*\}|<[^<>]*>").unwrap()
});

/// One physical subtitle line split into translatable text and markup
#[derive(Debug, Clone, PartialEq)]
pub struct LineTemplate {
    /// The line text with presentation markup removed
    pub clean_text: String,

    /// The original line with the clean text replaced by a `{}` slot and
    /// all structural braces elsewhere escaped as `{{` / `}}`
    pub template: String,
}

impl LineTemplate {
    /// Build the clean-text/template pair for a raw subtitle line
    pub fn from_line(line: &str) -> Self {
        let clean_text = strip_tags(line);

        if clean_text.is_empty() {
            // Nothing to substitute later; the whole line is markup
            return Self {
                clean_text,
                template: escape_braces(line),
            };
        }

        let template = match line.find(&clean_text) {
            Some(pos) => {
                let prefix = &line[..pos];
                let suffix = &line[pos + clean_text.len()..];
                format!("{}{{}}{}", escape_braces(prefix), escape_braces(suffix))
            }
            None => {
                // Tags interleaved inside the text; the markup cannot be
                // reattached safely, so the slot covers the whole line.
                debug!("Clean text not contiguous in line, dropping markup: {:?}", line);
                "{}".to_string()
            }
        };

        Self { clean_text, template }
    }

    /// Rehydrate this line with its own clean text, reproducing the original
    pub fn original_line(&self) -> String {
        rehydrate(&self.template, &self.clean_text)
    }
}

/// Remove all presentation tags from a line and trim whitespace
pub fn strip_tags(line: &str) -> String {
    TAG_REGEX.replace_all(line, "").trim().to_string()
}

/// Substitute `text` into a template's `{}` slot, unescaping `{{` and `}}`.
///
/// A template without a slot yields its unescaped self unchanged.
pub fn rehydrate(template: &str, text: &str) -> String {
    let mut result = String::with_capacity(template.len() + text.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => match chars.peek() {
                Some('{') => {
                    chars.next();
                    result.push('{');
                }
                Some('}') => {
                    chars.next();
                    result.push_str(text);
                }
                _ => result.push(c),
            },
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
                result.push('}');
            }
            _ => result.push(c),
        }
    }

    result
}

/// Double every brace so the text survives inside a template
fn escape_braces(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '{' => escaped.push_str("{{"),
            '}' => escaped.push_str("}}"),
            _ => escaped.push(c),
        }
    }
    escaped
}
