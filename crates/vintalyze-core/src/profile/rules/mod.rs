//! Rule-based field extractors for pasted profile pages.
//!
//! Every field is served by a [`RuleChain`]: an ordered list of independent
//! rules where the first rule yielding a value wins. Supporting a new page
//! layout means adding a rule to a chain, never editing an existing one.

pub mod counts;
pub mod location;
pub mod patterns;
pub mod rating;
pub mod shop;

use std::borrow::Cow;

use tracing::debug;

pub use counts::{LabeledCountRule, count_chain};
pub use location::{LabeledLocationRule, location_chain, narrow_to_country};
pub use rating::{RatingSummary, RatingWithCountRule, rating_chain};
pub use shop::{HeadingShopRule, LabeledShopRule, shop_chain};

/// Pasted text with its line view, shared by every rule.
#[derive(Debug, Clone, Copy)]
pub struct PastedText<'a> {
    /// Full text with `\n` line endings.
    pub text: &'a str,
    /// The text split on `\n`.
    pub lines: &'a [&'a str],
}

impl<'a> PastedText<'a> {
    pub fn new(text: &'a str, lines: &'a [&'a str]) -> Self {
        Self { text, lines }
    }

    /// Zero-based line number of a byte offset in `text`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.text.as_bytes()[..offset.min(self.text.len())]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
    }
}

/// Normalize `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Trait for field extractors.
pub trait FieldExtractor: Send + Sync {
    /// The type of value this extractor produces.
    type Output;

    /// Short rule name, reported with every match.
    fn name(&self) -> &'static str;

    /// Extract the field, or `None` when the rule does not apply.
    fn extract(&self, doc: &PastedText<'_>) -> Option<ExtractionMatch<Self::Output>>;
}

/// A value recognized by a rule, with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that matched.
    pub rule: &'static str,
    /// Zero-based line where the match starts.
    pub line: Option<usize>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            line: None,
            source: source.into(),
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Replace the value, keeping the provenance.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractionMatch<U> {
        ExtractionMatch {
            value: f(self.value),
            rule: self.rule,
            line: self.line,
            source: self.source,
        }
    }
}

/// Ordered, first-match-wins list of rules for one field.
pub struct RuleChain<T> {
    field: &'static str,
    rules: Vec<Box<dyn FieldExtractor<Output = T>>>,
}

impl<T: 'static> RuleChain<T> {
    /// Create an empty chain for the named field.
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            rules: Vec::new(),
        }
    }

    /// Append a rule; it is tried after every rule already in the chain.
    pub fn with_rule(mut self, rule: impl FieldExtractor<Output = T> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Field this chain extracts.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run the rules in order and return the first match.
    pub fn extract(&self, doc: &PastedText<'_>) -> Option<ExtractionMatch<T>> {
        for rule in &self.rules {
            if let Some(found) = rule.extract(doc) {
                debug!(
                    field = self.field,
                    rule = found.rule,
                    line = ?found.line,
                    "rule matched"
                );
                return Some(found);
            }
        }
        debug!(field = self.field, "no rule matched");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, Option<u64>);

    impl FieldExtractor for Fixed {
        type Output = u64;

        fn name(&self) -> &'static str {
            self.0
        }

        fn extract(&self, _doc: &PastedText<'_>) -> Option<ExtractionMatch<u64>> {
            self.1.map(|v| ExtractionMatch::new(v, self.0, v.to_string()))
        }
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let chain = RuleChain::new("count")
            .with_rule(Fixed("never", None))
            .with_rule(Fixed("first", Some(1)))
            .with_rule(Fixed("second", Some(2)));
        let doc = PastedText::new("", &[]);

        let found = chain.extract(&doc).unwrap();
        assert_eq!(found.value, 1);
        assert_eq!(found.rule, "first");
        assert_eq!(chain.rule_names(), vec!["never", "first", "second"]);
    }

    #[test]
    fn test_empty_chain_matches_nothing() {
        let chain: RuleChain<u64> = RuleChain::new("count");
        assert!(chain.is_empty());
        assert!(chain.extract(&PastedText::new("42", &["42"])).is_none());
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\rc"), "a\nb\nc");
        assert!(matches!(normalize_line_endings("a\nb"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_line_of() {
        let text = "one\ntwo\nthree";
        let lines: Vec<&str> = text.split('\n').collect();
        let doc = PastedText::new(text, &lines);
        assert_eq!(doc.line_of(0), 0);
        assert_eq!(doc.line_of(4), 1);
        assert_eq!(doc.line_of(text.len()), 2);
    }
}
