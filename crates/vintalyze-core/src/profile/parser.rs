//! Profile parser combining the field rule chains and the comment segmenter.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::ExtractionError;
use crate::models::{ExtractionOptions, FollowingPolicy, ProfileRecord};

use super::comments::CommentSegmenter;
use super::rules::{
    ExtractionMatch, PastedText, RatingSummary, RuleChain, count_chain, location_chain,
    normalize_line_endings, rating_chain, shop_chain,
};
use super::{ProfileExtractor, Result};

/// Result of profile extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted profile.
    pub record: ProfileRecord,
    /// Which rule produced each recognized field.
    pub sources: Vec<FieldSource>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
}

/// Provenance of one extracted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSource {
    pub field: &'static str,
    pub rule: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl FieldSource {
    fn of<T>(field: &'static str, found: &ExtractionMatch<T>) -> Self {
        Self {
            field,
            rule: found.rule,
            line: found.line,
        }
    }
}

/// Rule-based profile parser.
///
/// Patterns are compiled once in [`ProfileParser::new`]; a parser can then be
/// reused for any number of pasted texts.
pub struct ProfileParser {
    shop: RuleChain<String>,
    followers: RuleChain<u64>,
    following: RuleChain<u64>,
    location: RuleChain<String>,
    rating: RuleChain<RatingSummary>,
    comments: CommentSegmenter,
    following_policy: FollowingPolicy,
}

impl ProfileParser {
    /// Compile the rules selected by `options`.
    pub fn new(options: &ExtractionOptions) -> Result<Self> {
        if let Some((name, _)) = options
            .labels
            .entries()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(ExtractionError::malformed(format!("empty layout label: {name}")));
        }

        let labels = &options.labels;
        Ok(Self {
            shop: shop_chain(labels)?,
            followers: count_chain("follower count", &labels.followers, &options.count_layouts),
            following: count_chain("following count", &labels.following, &options.count_layouts),
            location: location_chain(&labels.location_label, &options.countries)?,
            rating: rating_chain(),
            comments: CommentSegmenter::from_options(options)?,
            following_policy: options.following_policy,
        })
    }

    fn run(&self, text: &str) -> Result<ExtractionResult> {
        info!("Parsing profile from {} characters of text", text.chars().count());

        let text = normalize_line_endings(text);
        let lines: Vec<&str> = text.split('\n').collect();
        let doc = PastedText::new(&text, &lines);

        let mut sources = Vec::new();
        let mut warnings = Vec::new();

        let shop = self
            .shop
            .extract(&doc)
            .ok_or_else(|| ExtractionError::MissingMandatoryField("shop name".to_string()))?;
        sources.push(FieldSource::of("shopName", &shop));

        let followers = self.followers.extract(&doc);
        if let Some(found) = &followers {
            sources.push(FieldSource::of("followerCount", found));
        }

        let following = self.following.extract(&doc);
        if let Some(found) = &following {
            sources.push(FieldSource::of("followingCount", found));
        }
        let following_count = match (following, self.following_policy) {
            (Some(found), _) => Some(found.value),
            (None, FollowingPolicy::Unset) => None,
            (None, FollowingPolicy::ZeroWhenAbsent) => {
                warnings.push("Following count not found, reporting 0".to_string());
                Some(0)
            }
        };

        let location = self.location.extract(&doc);
        if let Some(found) = &location {
            sources.push(FieldSource::of("location", found));
        }

        let rating = self.rating.extract(&doc);
        if let Some(found) = &rating {
            sources.push(FieldSource::of("rating", found));
        }
        let (rating, review_count) = match rating {
            Some(found) => (Some(found.value.rating), found.value.review_count),
            None => (None, None),
        };

        let comments = self.comments.segment(&lines);

        let record = ProfileRecord::builder(shop.value)
            .follower_count(followers.map(|m| m.value))
            .following_count(following_count)
            .location(location.map(|m| m.value))
            .rating(rating)
            .review_count(review_count)
            .comments(comments)
            .build();

        warnings.extend(
            record
                .missing_fields()
                .into_iter()
                .map(|field| format!("Could not extract {field}")),
        );

        debug!(
            "Extracted profile {} with {} comments and {} warnings",
            record.shop_name(),
            record.comments().len(),
            warnings.len()
        );

        Ok(ExtractionResult {
            record,
            sources,
            warnings,
        })
    }
}

impl ProfileExtractor for ProfileParser {
    fn parse(&self, text: &str) -> Result<ExtractionResult> {
        contain_panics(|| self.run(text))
    }
}

/// Run `f`, turning a panic into [`ExtractionError::MalformedInput`].
///
/// Only effective where panics unwind. On `wasm32-unknown-unknown` panics
/// abort, so a panic there surfaces as a JS `RuntimeError` instead.
fn contain_panics<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let cause = panic_message(payload.as_ref());
            error!(cause = %cause, "profile rules failed");
            Err(ExtractionError::malformed(cause))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
