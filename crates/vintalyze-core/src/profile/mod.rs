//! Profile field extraction module.

pub mod comments;
mod parser;
pub mod rules;

pub use comments::{CommentHeader, CommentSegmenter, HeaderShape, MarkedHeader, PlainHeader};
pub use parser::{ExtractionResult, FieldSource, ProfileParser};

use tracing::error;

use crate::error::ExtractionError;
use crate::models::{ExtractionOptions, ProfileRecord};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for profile extractors.
pub trait ProfileExtractor {
    /// Parse a pasted profile page, keeping provenance and warnings.
    fn parse(&self, text: &str) -> Result<ExtractionResult>;

    /// Extract the profile record from a pasted profile page.
    fn extract(&self, text: &str) -> Result<ProfileRecord> {
        self.parse(text).map(|r| r.record)
    }
}

/// Analyze pasted profile text with the given options.
///
/// Returns either a complete record or one of the two [`ExtractionError`]
/// kinds; internal failures never escape as panics.
pub fn analyze(raw_text: &str, options: &ExtractionOptions) -> Result<ProfileRecord> {
    let parser = ProfileParser::new(options).inspect_err(|e| {
        error!("Failed to compile profile rules: {}", e);
    })?;
    parser.extract(raw_text)
}
