//! Turns extracted page content into the text of a post.
//!
//! All lengths here are counted in `char`s, which is what the character
//! budget of the post refers to. Byte offsets only matter once the text is
//! final, see [`crate::facet`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::MessageConfig;
use crate::error::{AppError, Result};
use crate::scraper::{ExtractedContent, collapse_whitespace};

pub const SECTION_BREAK: &str = "\n\n";
pub const ELLIPSIS: char = '…';

static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("Failed to compile entity pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    pub text: String,
    /// Char index where the call-to-action label starts.
    pub label_start_char: usize,
}

pub fn compose_message(
    content: &ExtractedContent,
    url: &str,
    config: &MessageConfig,
) -> Result<ComposedMessage> {
    let label = config.label.as_str();
    let combined = combine(content, url);

    let available = config
        .max_len
        .saturating_sub(char_len(label))
        .saturating_sub(char_len(SECTION_BREAK));
    let body = truncate_with_ellipsis(&combined, available);

    let label_start_char = char_len(&body) + char_len(SECTION_BREAK);
    let mut text = String::with_capacity(body.len() + SECTION_BREAK.len() + label.len());
    text.push_str(&body);
    text.push_str(SECTION_BREAK);
    text.push_str(label);

    let length = char_len(&text);
    if length > config.max_len {
        return Err(AppError::MessageOverflowError {
            length,
            max_len: config.max_len,
        });
    }

    ::log::debug!("Composed {} char message ({} bytes)", length, text.len());
    Ok(ComposedMessage {
        text,
        label_start_char,
    })
}

/// Joins title and excerpt, dropping the title when the excerpt already
/// opens with it.
fn combine(content: &ExtractedContent, url: &str) -> String {
    let title = content.title.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let body = content
        .body_excerpt
        .as_deref()
        .map(collapse_whitespace)
        .filter(|b| !b.is_empty());

    match (title, body) {
        (Some(title), Some(body)) => {
            if char_len(title) < char_len(&body) && body_repeats_title(title, &body) {
                ::log::debug!("Excerpt already starts with the title, dropping title");
                body
            } else {
                format!("{} - {}", title, body)
            }
        }
        (Some(title), None) => title.to_string(),
        (None, Some(body)) => body,
        (None, None) => url.to_string(),
    }
}

fn body_repeats_title(title: &str, body: &str) -> bool {
    let title = normalize(title);
    let title = title.trim_end_matches(|c: char| c.is_ascii_punctuation()).trim_end();
    if title.is_empty() {
        return false;
    }
    normalize(body).starts_with(title)
}

fn normalize(text: &str) -> String {
    collapse_whitespace(&ENTITY_RE.replace_all(text, " ")).to_lowercase()
}

/// Cuts `text` to at most `limit` chars, marking the cut with an ellipsis.
pub fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    if char_len(text) <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(1);
    let mut cut: String = text.chars().take(keep).collect();
    cut.truncate(cut.trim_end().len());
    cut.push(ELLIPSIS);
    cut
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
