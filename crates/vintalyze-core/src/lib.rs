//! Core library for Vinted profile analysis.
//!
//! This crate provides:
//! - Rule-based extraction of profile fields from pasted page text
//!   (shop name, follower and following counts, location, rating)
//! - Comment segmentation with swappable header shapes
//! - Derived metrics (estimated sales from the review count)
//! - Presentation data for reports and exports

pub mod error;
pub mod models;
pub mod profile;
pub mod report;

pub use error::{ExtractionError, Result, VintalyzeError};
pub use models::config::{
    CommentCap, CommentHeaderShape, CountLayout, ExtractionOptions, FollowingPolicy,
    LayoutLabels, VintalyzeConfig,
};
pub use models::profile::{Comment, ProfileRecord, SalesEstimate};
pub use profile::{ExtractionResult, ProfileExtractor, ProfileParser, analyze};
pub use report::{EngagementChart, InfoRow, export_file_stem, general_info_rows};
