//! Data models for profile analysis.

pub mod config;
pub mod profile;

pub use config::{
    CommentCap, CommentHeaderShape, CountLayout, ExtractionOptions, FollowingPolicy,
    LayoutLabels, ReportConfig, VintalyzeConfig,
};
pub use profile::{Comment, ProfileRecord, ProfileRecordBuilder, SalesEstimate};
