//! Rating and review count.

use tracing::warn;

use super::patterns::RATING_WITH_COUNT;
use super::{ExtractionMatch, FieldExtractor, PastedText, RuleChain};

/// Average rating and, when it parsed, the number of reviews behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub rating: f64,
    pub review_count: Option<u64>,
}

/// `4.8` followed on the next line by `(120)`.
pub struct RatingWithCountRule;

impl RatingWithCountRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RatingWithCountRule {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for RatingWithCountRule {
    type Output = RatingSummary;

    fn name(&self) -> &'static str {
        "rating_with_count"
    }

    fn extract(&self, doc: &PastedText<'_>) -> Option<ExtractionMatch<RatingSummary>> {
        let caps = RATING_WITH_COUNT.captures(doc.text)?;
        let full = caps.get(0)?;

        let rating = match caps[1].replace(',', ".").parse::<f64>() {
            Ok(rating) => rating,
            Err(e) => {
                warn!(value = &caps[1], "unparseable rating: {}", e);
                return None;
            }
        };

        let review_count = match caps[2].parse::<u64>() {
            Ok(count) => Some(count),
            Err(e) => {
                warn!(value = &caps[2], "unparseable review count: {}", e);
                None
            }
        };

        Some(
            ExtractionMatch::new(
                RatingSummary {
                    rating,
                    review_count,
                },
                self.name(),
                full.as_str(),
            )
            .with_line(doc.line_of(full.start())),
        )
    }
}

pub fn rating_chain() -> RuleChain<RatingSummary> {
    RuleChain::new("rating").with_rule(RatingWithCountRule::new())
}
