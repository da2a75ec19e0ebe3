//! Shop name extraction.

use regex::Regex;

use crate::models::LayoutLabels;

use super::patterns::{heading_before_marker, labeled_token};
use super::{ExtractionMatch, FieldExtractor, PastedText, RuleChain};

/// Explicit `Boutique: name` line.
pub struct LabeledShopRule {
    pattern: Regex,
}

impl LabeledShopRule {
    pub fn new(label: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: labeled_token(label)?,
        })
    }
}

impl FieldExtractor for LabeledShopRule {
    type Output = String;

    fn name(&self) -> &'static str {
        "labeled_shop"
    }

    fn extract(&self, doc: &PastedText<'_>) -> Option<ExtractionMatch<String>> {
        let caps = self.pattern.captures(doc.text)?;
        let full = caps.get(0)?;
        Some(
            ExtractionMatch::new(caps[1].to_string(), self.name(), full.as_str())
                .with_line(doc.line_of(full.start())),
        )
    }
}

/// Profile heading: the shop name alone on its line, right above the
/// "about" section marker.
pub struct HeadingShopRule {
    pattern: Regex,
}

impl HeadingShopRule {
    pub fn new(about_marker: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: heading_before_marker(about_marker)?,
        })
    }
}

impl FieldExtractor for HeadingShopRule {
    type Output = String;

    fn name(&self) -> &'static str {
        "heading_shop"
    }

    fn extract(&self, doc: &PastedText<'_>) -> Option<ExtractionMatch<String>> {
        let caps = self.pattern.captures(doc.text)?;
        let name = caps.get(1)?;
        Some(
            ExtractionMatch::new(name.as_str().to_string(), self.name(), &caps[0])
                .with_line(doc.line_of(name.start())),
        )
    }
}

/// Shop name rules: explicit label first, heading fallback second.
pub fn shop_chain(labels: &LayoutLabels) -> Result<RuleChain<String>, regex::Error> {
    Ok(RuleChain::new("shop name")
        .with_rule(LabeledShopRule::new(&labels.shop_label)?)
        .with_rule(HeadingShopRule::new(&labels.about_marker)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<ExtractionMatch<String>> {
        let lines: Vec<&str> = text.split('\n').collect();
        let chain = shop_chain(&LayoutLabels::default()).unwrap();
        chain.extract(&PastedText::new(text, &lines))
    }

    #[test]
    fn test_labeled_shop() {
        let found = extract("Profil\nBoutique: vintage_lea\n12\nAbonnés").unwrap();
        assert_eq!(found.value, "vintage_lea");
        assert_eq!(found.rule, "labeled_shop");
        assert_eq!(found.line, Some(1));
    }

    #[test]
    fn test_label_wins_over_heading() {
        let found = extract("MonShop\nÀ propos :\nBoutique : autre").unwrap();
        assert_eq!(found.value, "autre");
    }

    #[test]
    fn test_heading_shop() {
        let found = extract("MonShop\nÀ propos :\n42\nAbonnés").unwrap();
        assert_eq!(found.value, "MonShop");
        assert_eq!(found.rule, "heading_shop");
        assert_eq!(found.line, Some(0));
    }

    #[test]
    fn test_heading_after_other_lines() {
        let found = extract("Menu\nVendre\n\nlea.vintage\n\nÀ propos : Lyon").unwrap();
        assert_eq!(found.value, "lea.vintage");
        assert_eq!(found.line, Some(3));
    }

    #[test]
    fn test_no_shop() {
        assert!(extract("42\nAbonnés\n4.8\n(120)").is_none());
        assert!(extract("").is_none());
    }
}
