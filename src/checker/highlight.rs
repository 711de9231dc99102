//! # Error Highlighting
//!
//! Splits the original text into [`Segment`]s: plain runs and highlighted
//! error words carrying their suggested correction.
//!
//! The scan runs once over the original text with a single alternation of
//! all error words, so spans never overlap and highlighted output is never
//! scanned again:
//!
//! - every literal occurrence of every word is found, anywhere in the text
//! - the leftmost match wins
//! - at a shared start position, the error listed first wins
//!
//! Words are regex-escaped before use; [`to_html`] escapes everything it emits.

use crate::checker::model::TextError;
use regex::RegexBuilder;

const PATTERN_SIZE_LIMIT: usize = 1 << 24;

/// A run of the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Highlight { word: String, correction: String },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(text) => text,
            Segment::Highlight { word, .. } => word,
        }
    }
}

/// Build the segment list for `text` given the reported `errors`.
pub fn highlight(text: &str, errors: &[TextError]) -> Vec<Segment> {
    let mut words: Vec<&TextError> = Vec::new();
    for error in errors {
        if !error.word.is_empty() && !words.iter().any(|w| w.word == error.word) {
            words.push(error);
        }
    }

    if words.is_empty() {
        return plain_only(text);
    }

    let pattern = words
        .iter()
        .map(|e| regex::escape(&e.word))
        .collect::<Vec<_>>()
        .join("|");
    let regex = match RegexBuilder::new(&pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
    {
        Ok(regex) => regex,
        Err(e) => {
            tracing::warn!(error = %e, words = words.len(), "could not build highlight pattern");
            return plain_only(text);
        }
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in regex.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::Plain(text[last..m.start()].to_string()));
        }
        let correction = words
            .iter()
            .find(|e| e.word == m.as_str())
            .map(|e| e.correction.clone())
            .unwrap_or_default();
        segments.push(Segment::Highlight {
            word: m.as_str().to_string(),
            correction,
        });
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::Plain(text[last..].to_string()));
    }

    segments
}

fn plain_only(text: &str) -> Vec<Segment> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Segment::Plain(text.to_string())]
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render segments as an HTML fragment. Highlights become
/// `<span class="error-highlight" data-correction="...">word</span>`.
pub fn to_html(segments: &[Segment]) -> String {
    let mut html = String::new();
    for segment in segments {
        match segment {
            Segment::Plain(text) => html.push_str(&escape_html(text)),
            Segment::Highlight { word, correction } => {
                html.push_str(&format!(
                    r#"<span class="error-highlight" data-correction="{}">{}</span>"#,
                    escape_html(correction),
                    escape_html(word)
                ));
            }
        }
    }
    html
}
