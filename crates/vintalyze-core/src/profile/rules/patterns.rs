//! Common regex patterns for profile page extraction.
//!
//! Layout-independent shapes are compiled once. Patterns built around a
//! layout label are compiled per parser from [`crate::models::LayoutLabels`].

use lazy_static::lazy_static;
use regex::{Regex, escape};

lazy_static! {
    // A line holding nothing but a count (applied to trimmed lines)
    pub static ref NUMBER_LINE: Regex = Regex::new(r"^\d+$").unwrap();

    // Rating, then the review count in parentheses on a following line:
    // "4.8\n(120)" or "4,8 \n  ( 120 )"
    pub static ref RATING_WITH_COUNT: Regex = Regex::new(
        r"(\d+(?:[.,]\d+)?)\s*\n\s*\(\s*(\d+)\s*\)"
    ).unwrap();
}

/// `Boutique: name`: first whitespace-free token after the label's colon.
pub fn labeled_token(label: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"{}[ \t]*:[ \t]*(\S+)", escape(label)))
}

/// `label : rest of the line`, value possibly empty.
pub fn labeled_line(label: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"{}[ \t]*:[ \t]*([^\n]*)", escape(label)))
}

/// A line whose first token is followed, after blank lines, by the marker.
pub fn heading_before_marker(marker: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?m)^[ \t]*(\S+)[ \t]*\n\s*{}", escape(marker)))
}

/// Whole-line `author <marker> phrase`, author without whitespace.
pub fn plain_comment_header(relative_time_marker: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"^(\S+)\s+{}\s+(.+)$",
        escape(relative_time_marker)
    ))
}

/// `**author** ... <marker> phrase`, author wrapped in the comment marker.
pub fn marked_comment_header(
    comment_marker: &str,
    relative_time_marker: &str,
) -> Result<Regex, regex::Error> {
    let marker = escape(comment_marker);
    Regex::new(&format!(
        r"^{marker}\s*(.+?)\s*{marker}.*?{}\s+(.+)$",
        escape(relative_time_marker)
    ))
}
