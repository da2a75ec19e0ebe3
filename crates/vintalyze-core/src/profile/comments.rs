//! Comment segmentation.
//!
//! Comments appear on a profile page as a header line naming the author and
//! how long ago they posted, optionally followed by one line of text. The
//! header shape differs between page layouts, so it is a swappable
//! [`HeaderShape`] strategy.

use regex::Regex;
use tracing::debug;

use crate::models::{Comment, CommentCap, CommentHeaderShape, ExtractionOptions};

use super::rules::patterns::{marked_comment_header, plain_comment_header};

/// Author and elapsed time read from a header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentHeader {
    pub author: String,
    pub relative_time: String,
}

/// Recognizes comment header lines of one page layout.
pub trait HeaderShape: Send + Sync {
    /// Parse a trimmed line as a header.
    fn parse_header(&self, line: &str) -> Option<CommentHeader>;

    /// Whether a trimmed, non-empty line following a header is its body.
    fn accepts_body(&self, line: &str) -> bool;
}

/// `alice il y a 2 jours`, the whole line.
pub struct PlainHeader {
    pattern: Regex,
}

impl PlainHeader {
    pub fn new(relative_time_marker: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: plain_comment_header(relative_time_marker)?,
        })
    }
}

impl HeaderShape for PlainHeader {
    fn parse_header(&self, line: &str) -> Option<CommentHeader> {
        let caps = self.pattern.captures(line)?;
        Some(CommentHeader {
            author: caps[1].to_string(),
            relative_time: caps[2].trim().to_string(),
        })
    }

    fn accepts_body(&self, line: &str) -> bool {
        self.parse_header(line).is_none()
    }
}

/// `**alice** · il y a 2 jours`, author wrapped in a two-character marker.
pub struct MarkedHeader {
    pattern: Regex,
    marker: String,
}

impl MarkedHeader {
    pub fn new(marker: &str, relative_time_marker: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: marked_comment_header(marker, relative_time_marker)?,
            marker: marker.to_string(),
        })
    }
}

impl HeaderShape for MarkedHeader {
    fn parse_header(&self, line: &str) -> Option<CommentHeader> {
        let caps = self.pattern.captures(line)?;
        let author = caps[1].trim();
        if author.is_empty() {
            return None;
        }
        Some(CommentHeader {
            author: author.to_string(),
            relative_time: caps[2].trim().to_string(),
        })
    }

    fn accepts_body(&self, line: &str) -> bool {
        !line.starts_with(&self.marker)
    }
}

/// Splits pasted lines into comments.
pub struct CommentSegmenter {
    shape: Box<dyn HeaderShape>,
    cap: CommentCap,
    denylist: Vec<String>,
}

impl CommentSegmenter {
    /// Segmenter with no cap and an empty denylist.
    pub fn new(shape: Box<dyn HeaderShape>) -> Self {
        Self {
            shape,
            cap: CommentCap::Unbounded,
            denylist: Vec::new(),
        }
    }

    /// Segmenter for the header shape, cap and denylist of `options`.
    pub fn from_options(options: &ExtractionOptions) -> Result<Self, regex::Error> {
        let labels = &options.labels;
        let shape: Box<dyn HeaderShape> = match options.comment_header {
            CommentHeaderShape::Plain => Box::new(PlainHeader::new(&labels.relative_time_marker)?),
            CommentHeaderShape::Marked => Box::new(MarkedHeader::new(
                &labels.comment_marker,
                &labels.relative_time_marker,
            )?),
        };
        Ok(Self::new(shape)
            .with_cap(options.comment_cap)
            .with_denylist(options.author_denylist.clone()))
    }

    pub fn with_cap(mut self, cap: CommentCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_denylist(mut self, denylist: Vec<String>) -> Self {
        self.denylist = denylist;
        self
    }

    fn is_denylisted(&self, author: &str) -> bool {
        self.denylist.iter().any(|a| a == author)
    }

    /// Comments in source order, at most `cap` of them.
    pub fn segment(&self, lines: &[&str]) -> Vec<Comment> {
        let mut comments = Vec::new();
        let mut i = 0;

        while i < lines.len() && !self.cap.is_reached(comments.len()) {
            let line = lines[i].trim();
            i += 1;

            let Some(header) = self.shape.parse_header(line) else {
                continue;
            };
            if self.is_denylisted(&header.author) {
                debug!(author = %header.author, line = i - 1, "skipping denylisted author");
                continue;
            }

            let mut body = String::new();
            if let Some(next) = lines.get(i).map(|l| l.trim()) {
                if !next.is_empty() && self.shape.accepts_body(next) {
                    body = next.to_string();
                    i += 1;
                }
            }

            comments.push(Comment {
                author: header.author,
                relative_time: header.relative_time,
                body,
            });
        }

        debug!("Segmented {} comments", comments.len());
        comments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain() -> CommentSegmenter {
        CommentSegmenter::new(Box::new(PlainHeader::new("il y a").unwrap()))
    }

    fn lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }

    #[test]
    fn test_header_with_body() {
        let comments = plain().segment(&lines("alice il y a 2 jours\nTrès bien"));
        assert_eq!(comments, vec![Comment::new("alice", "2 jours", "Très bien")]);
    }

    #[test]
    fn test_last_line_header_has_empty_body() {
        let comments = plain().segment(&lines("Super\nbob il y a 1 semaine"));
        assert_eq!(comments, vec![Comment::new("bob", "1 semaine", "")]);
    }

    #[test]
    fn test_consecutive_headers() {
        let text = "alice il y a 2 jours\nbob il y a 3 jours\nParfait";
        let comments = plain().segment(&lines(text));
        assert_eq!(
            comments,
            vec![
                Comment::new("alice", "2 jours", ""),
                Comment::new("bob", "3 jours", "Parfait"),
            ]
        );
    }

    #[test]
    fn test_blank_line_is_not_a_body() {
        let comments = plain().segment(&lines("alice il y a 2 jours\n   \nTrès bien"));
        assert_eq!(comments, vec![Comment::new("alice", "2 jours", "")]);
    }

    #[test]
    fn test_consumed_body_is_not_a_header() {
        let shape = MarkedHeader::new("**", "il y a").unwrap();
        let text = "**alice** il y a 2 jours\ncarol il y a 1 jour\n**bob** il y a 3 jours";
        let comments = CommentSegmenter::new(Box::new(shape)).segment(&lines(text));
        assert_eq!(
            comments,
            vec![
                Comment::new("alice", "2 jours", "carol il y a 1 jour"),
                Comment::new("bob", "3 jours", ""),
            ]
        );
    }

    #[test]
    fn test_denylisted_authors_do_not_count() {
        let text = "Vinted il y a 1 jour\nalice il y a 2 jours\nkymordz il y a 3 jours\nbob il y a 4 jours";
        let comments = plain()
            .with_denylist(vec!["Vinted".to_string(), "kymordz".to_string()])
            .with_cap(CommentCap::at_most(2).unwrap())
            .segment(&lines(text));

        let authors: Vec<&str> = comments.iter().map(|c| c.author.as_str()).collect();
        assert_eq!(authors, vec!["alice", "bob"]);
    }

    #[test]
    fn test_cap_keeps_first_comments() {
        let text: Vec<String> = (1..=7)
            .map(|n| format!("user{n} il y a {n} jours\nmerci {n}"))
            .collect();
        let text = text.join("\n");
        let comments = plain()
            .with_cap(CommentCap::at_most(5).unwrap())
            .segment(&lines(&text));

        assert_eq!(comments.len(), 5);
        for (n, comment) in (1..=5).zip(&comments) {
            assert_eq!(comment.author, format!("user{n}"));
            assert_eq!(comment.body, format!("merci {n}"));
        }
    }

    #[test]
    fn test_marked_header_body_rules() {
        let shape = MarkedHeader::new("**", "il y a").unwrap();
        assert_eq!(
            shape.parse_header("** lea ** · il y a 5 heures"),
            Some(CommentHeader {
                author: "lea".to_string(),
                relative_time: "5 heures".to_string(),
            })
        );
        assert!(shape.parse_header("lea il y a 5 heures").is_none());
        assert!(shape.parse_header("**** il y a 5 heures").is_none());
        assert!(!shape.accepts_body("**bob**"));
        assert!(shape.accepts_body("Très bien"));
    }
}
