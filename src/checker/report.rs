//! # Rendered Results
//!
//! A [`Report`] is built once from a [`CheckResult`] and never changed
//! afterwards. It holds everything the display regions need: the error
//! count, the error-type breakdown, the highlighted original text, and the
//! corrected text.

use crate::checker::highlight::{self, escape_html, Segment};
use crate::checker::model::CheckResult;
use chrono::{DateTime, Local};

/// Heading shown above the per-type counts
pub const ERROR_TYPES_HEADING: &str = "Error Types:";

#[derive(Debug, Clone)]
pub struct Report {
    pub result: CheckResult,
    pub segments: Vec<Segment>,
    pub checked_at: DateTime<Local>,
}

impl Report {
    pub fn new(result: CheckResult) -> Self {
        let segments = highlight::highlight(&result.original_text, &result.errors);
        Self {
            result,
            segments,
            checked_at: Local::now(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.result.stats.total_errors
    }

    pub fn corrected_text(&self) -> &str {
        &self.result.corrected_text
    }

    /// `(type, count)` pairs in the order the service sent them.
    pub fn breakdown(&self) -> Vec<(&str, usize)> {
        self.result
            .stats
            .error_types
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect()
    }

    /// Breakdown as display lines: a heading then `type: count`, or nothing
    /// when there are no error types.
    pub fn breakdown_lines(&self) -> Vec<String> {
        let breakdown = self.breakdown();
        if breakdown.is_empty() {
            return Vec::new();
        }
        let mut lines = vec![ERROR_TYPES_HEADING.to_string()];
        lines.extend(
            breakdown
                .into_iter()
                .map(|(name, count)| format!("{}: {}", name, count)),
        );
        lines
    }

    /// One line per reported error, e.g. `teh → the [spelling]`.
    pub fn detail_lines(&self) -> Vec<String> {
        self.result
            .errors
            .iter()
            .map(|e| match &e.rule {
                Some(rule) => format!("{} → {} [{}]", e.word, e.correction, rule),
                None => format!("{} → {}", e.word, e.correction),
            })
            .collect()
    }

    /// Plain-text rendering for terminals without the TUI. Highlights are
    /// shown inline as `[word → correction]`.
    /// Rows needed by the tallest results pane, before wrapping.
    pub fn content_rows(&self) -> usize {
        let text_rows = |text: &str| text.split('\n').count();
        [
            text_rows(&self.result.original_text),
            text_rows(&self.result.corrected_text),
            1 + self.breakdown_lines().len(),
            self.result.errors.len(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("Errors: {}\n", self.error_count());
        for line in self.breakdown_lines() {
            out.push_str(&line);
            out.push('\n');
        }

        out.push_str("\nOriginal:\n");
        for segment in &self.segments {
            match segment {
                Segment::Plain(text) => out.push_str(text),
                Segment::Highlight { word, correction } => {
                    out.push_str(&format!("[{} → {}]", word, correction));
                }
            }
        }

        out.push_str("\n\nCorrected:\n");
        out.push_str(self.corrected_text());
        out.push('\n');
        out
    }

    /// HTML fragment with the four display regions.
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<div id=\"error-count\">{}</div>\n<div id=\"error-types\">",
            self.error_count()
        );
        let breakdown = self.breakdown();
        if !breakdown.is_empty() {
            html.push_str(&format!("<h4>{}</h4>", ERROR_TYPES_HEADING));
            for (name, count) in breakdown {
                html.push_str(&format!("<p>{}: {}</p>", escape_html(name), count));
            }
        }
        html.push_str("</div>\n<div id=\"original-text\">");
        html.push_str(&highlight::to_html(&self.segments));
        html.push_str("</div>\n<div id=\"corrected-text\">");
        html.push_str(&escape_html(self.corrected_text()));
        html.push_str("</div>\n");
        html
    }
}
