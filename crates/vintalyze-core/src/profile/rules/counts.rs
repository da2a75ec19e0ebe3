//! Follower and following counts.

use tracing::warn;

use crate::models::CountLayout;

use super::patterns::NUMBER_LINE;
use super::{ExtractionMatch, FieldExtractor, PastedText, RuleChain};

/// A number-only line next to a label line, in a given order.
pub struct LabeledCountRule {
    label: String,
    layout: CountLayout,
}

impl LabeledCountRule {
    pub fn new(label: impl Into<String>, layout: CountLayout) -> Self {
        Self {
            label: label.into(),
            layout,
        }
    }
}

impl FieldExtractor for LabeledCountRule {
    type Output = u64;

    fn name(&self) -> &'static str {
        match self.layout {
            CountLayout::NumberThenLabel => "count_above_label",
            CountLayout::LabelThenNumber => "count_below_label",
        }
    }

    fn extract(&self, doc: &PastedText<'_>) -> Option<ExtractionMatch<u64>> {
        for (i, pair) in doc.lines.windows(2).enumerate() {
            let (number_line, label_line, number_index) = match self.layout {
                CountLayout::NumberThenLabel => (pair[0].trim(), pair[1].trim(), i),
                CountLayout::LabelThenNumber => (pair[1].trim(), pair[0].trim(), i + 1),
            };

            if !label_line.starts_with(&self.label) || !NUMBER_LINE.is_match(number_line) {
                continue;
            }

            return match number_line.parse::<u64>() {
                Ok(count) => Some(
                    ExtractionMatch::new(count, self.name(), number_line).with_line(number_index),
                ),
                Err(e) => {
                    warn!(label = %self.label, value = number_line, "unparseable count: {}", e);
                    None
                }
            };
        }
        None
    }
}

/// One count rule per layout, tried in the configured order.
pub fn count_chain(field: &'static str, label: &str, layouts: &[CountLayout]) -> RuleChain<u64> {
    layouts
        .iter()
        .fold(RuleChain::new(field), |chain, &layout| {
            chain.with_rule(LabeledCountRule::new(label, layout))
        })
}
