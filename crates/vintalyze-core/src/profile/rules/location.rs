//! Location extraction and country narrowing.

use regex::Regex;

use super::patterns::labeled_line;
use super::{ExtractionMatch, FieldExtractor, PastedText, RuleChain};

/// `À propos : Paris, France` line, narrowed to a known country if possible.
pub struct LabeledLocationRule {
    pattern: Regex,
    countries: Vec<String>,
}

impl LabeledLocationRule {
    pub fn new(label: &str, countries: &[String]) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: labeled_line(label)?,
            countries: countries.to_vec(),
        })
    }
}

impl FieldExtractor for LabeledLocationRule {
    type Output = String;

    fn name(&self) -> &'static str {
        "labeled_location"
    }

    fn extract(&self, doc: &PastedText<'_>) -> Option<ExtractionMatch<String>> {
        // A label with nothing after it on the same line is skipped.
        self.pattern.captures_iter(doc.text).find_map(|caps| {
            let raw = caps[1].trim();
            if raw.is_empty() {
                return None;
            }
            let full = caps.get(0)?;
            let value = narrow_to_country(raw, &self.countries)
                .unwrap_or(raw)
                .to_string();
            Some(
                ExtractionMatch::new(value, self.name(), full.as_str())
                    .with_line(doc.line_of(full.start())),
            )
        })
    }
}

/// First country of `countries` contained in `value`, ignoring case.
pub fn narrow_to_country<'a>(value: &str, countries: &'a [String]) -> Option<&'a str> {
    let value = value.to_lowercase();
    countries
        .iter()
        .filter(|c| !c.trim().is_empty())
        .find(|c| value.contains(&c.to_lowercase()))
        .map(String::as_str)
}

pub fn location_chain(label: &str, countries: &[String]) -> Result<RuleChain<String>, regex::Error> {
    Ok(RuleChain::new("location").with_rule(LabeledLocationRule::new(label, countries)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::DEFAULT_COUNTRIES;

    fn countries() -> Vec<String> {
        DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect()
    }

    fn extract(text: &str, countries: &[String]) -> Option<String> {
        let lines: Vec<&str> = text.split('\n').collect();
        location_chain("À propos", countries)
            .unwrap()
            .extract(&PastedText::new(text, &lines))
            .map(|m| m.value)
    }

    #[test]
    fn test_narrowed_to_country() {
        assert_eq!(
            extract("À propos : Lyon, France", &countries()),
            Some("France".to_string())
        );
        assert_eq!(
            extract("À propos: bruxelles, belgique", &countries()),
            Some("Belgique".to_string())
        );
    }

    #[test]
    fn test_raw_value_kept_without_country() {
        assert_eq!(
            extract("À propos :   Quelque part  ", &countries()),
            Some("Quelque part".to_string())
        );
        assert_eq!(
            extract("À propos : Lyon, France", &[]),
            Some("Lyon, France".to_string())
        );
    }

    #[test]
    fn test_value_must_share_the_line() {
        assert_eq!(extract("MonShop\nÀ propos :\n42\nAbonnés", &countries()), None);
        assert_eq!(
            extract("À propos :\nÀ propos : Madrid, Espagne", &countries()),
            Some("Espagne".to_string())
        );
    }

    #[test]
    fn test_enumeration_order_decides() {
        let countries = vec!["Suisse".to_string(), "France".to_string()];
        assert_eq!(narrow_to_country("Genève, Suisse (France voisine)", &countries), Some("Suisse"));
        assert_eq!(narrow_to_country("nowhere", &countries), None);
    }
}
