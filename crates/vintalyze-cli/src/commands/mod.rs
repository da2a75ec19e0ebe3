//! CLI subcommands.

pub mod analyze;
pub mod batch;
pub mod config;
pub mod output;

use std::path::Path;

use clap::Args;
use tracing::{debug, error};

use vintalyze_core::models::config::VintalyzeConfig;
use vintalyze_core::{
    CommentCap, CommentHeaderShape, ExtractionError, ExtractionOptions, FollowingPolicy,
};

/// Per-invocation overrides of the configured extraction options.
#[derive(Args, Debug, Default)]
pub struct ExtractionOverrides {
    /// Following count when none is found: unset or zero_when_absent
    #[arg(long)]
    following_policy: Option<FollowingPolicy>,

    /// Comment header shape: plain or marked
    #[arg(long)]
    comment_header: Option<CommentHeaderShape>,

    /// Maximum number of comments: a positive integer or "unbounded"
    #[arg(long)]
    comment_cap: Option<CommentCap>,
}

impl ExtractionOverrides {
    pub fn apply(&self, mut options: ExtractionOptions) -> ExtractionOptions {
        if let Some(policy) = self.following_policy {
            options.following_policy = policy;
        }
        if let Some(shape) = self.comment_header {
            options.comment_header = shape;
        }
        if let Some(cap) = self.comment_cap {
            options.comment_cap = cap;
        }
        options
    }
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<VintalyzeConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(VintalyzeConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(VintalyzeConfig::from_file(&default_path)?)
    } else {
        Ok(VintalyzeConfig::default())
    }
}

/// Log the cause of an extraction failure and keep only the user message.
pub fn extraction_failure(err: ExtractionError) -> anyhow::Error {
    error!("Profile extraction failed: {}", err);
    anyhow::anyhow!(err.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_only_given_values() {
        let overrides = ExtractionOverrides {
            comment_cap: CommentCap::at_most(3),
            ..Default::default()
        };
        let options = overrides.apply(ExtractionOptions::default());

        assert_eq!(options.comment_cap.limit(), Some(3));
        assert_eq!(options.following_policy, FollowingPolicy::Unset);
        assert_eq!(options.comment_header, CommentHeaderShape::Plain);
    }
}
