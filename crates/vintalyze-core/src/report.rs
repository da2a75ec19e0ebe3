//! Presentation data derived from a profile record.
//!
//! Renderers (CLI text output, CSV export, the browser front end) consume
//! these instead of reading the record field by field.

use serde::Serialize;

use crate::models::ProfileRecord;

/// One bar of the engagement chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: u64,
}

/// Follower, following and estimated sales bars, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngagementChart {
    pub bars: Vec<ChartBar>,
}

impl EngagementChart {
    /// Missing metrics are charted as zero.
    pub fn from_record(record: &ProfileRecord) -> Self {
        let bars = vec![
            ChartBar {
                label: "Abonnés",
                value: record.follower_count().unwrap_or(0),
            },
            ChartBar {
                label: "Abonnements",
                value: record.following_count().unwrap_or(0),
            },
            ChartBar {
                label: "Ventes estimées",
                value: record.estimated_sales_high().unwrap_or(0),
            },
        ];
        Self { bars }
    }

    /// Largest bar value, zero for an empty chart.
    pub fn max_value(&self) -> u64 {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }

    /// Length of each bar scaled so the largest spans `width` cells.
    pub fn scaled(&self, width: usize) -> Vec<(&ChartBar, usize)> {
        let max = self.max_value();
        self.bars
            .iter()
            .map(|bar| {
                let len = if max == 0 {
                    0
                } else {
                    ((bar.value as u128 * width as u128) / max as u128) as usize
                };
                (bar, len)
            })
            .collect()
    }
}

/// A labeled row of the general information table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
}

impl InfoRow {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// General information rows for the fields present in the record.
pub fn general_info_rows(record: &ProfileRecord) -> Vec<InfoRow> {
    let mut rows = vec![InfoRow::new("Boutique", record.shop_name())];

    if let Some(count) = record.review_count() {
        rows.push(InfoRow::new("Évaluations", count.to_string()));
    }
    if let Some(count) = record.follower_count() {
        rows.push(InfoRow::new("Abonnés", count.to_string()));
    }
    if let Some(count) = record.following_count() {
        rows.push(InfoRow::new("Abonnements", count.to_string()));
    }
    if let Some(location) = record.location() {
        rows.push(InfoRow::new("Lieu", location));
    }
    if let Some(rating) = record.rating() {
        rows.push(InfoRow::new("Note", format!("{rating}/5")));
    }
    if let Some(sales) = record.sales_estimate() {
        rows.push(InfoRow::new(
            "Ventes estimées",
            format!("{} – {}", sales.low, sales.high),
        ));
    }

    rows
}

/// File name stem for exports: `<prefix>_<shop>`, restricted to
/// `[A-Za-z0-9_-]`.
pub fn export_file_stem(record: &ProfileRecord, prefix: &str) -> String {
    let shop: String = record
        .shop_name()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if prefix.is_empty() {
        shop
    } else {
        format!("{prefix}_{shop}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> ProfileRecord {
        ProfileRecord::builder("lea.vintage")
            .follower_count(Some(200))
            .rating(Some(4.5))
            .review_count(Some(50))
            .build()
    }

    #[test]
    fn test_chart_defaults_missing_to_zero() {
        let chart = EngagementChart::from_record(&record());
        let values: Vec<u64> = chart.bars.iter().map(|b| b.value).collect();
        assert_eq!(values, vec![200, 0, 50]);
        assert_eq!(chart.max_value(), 200);
    }

    #[test]
    fn test_chart_scaling() {
        let chart = EngagementChart::from_record(&record());
        let lengths: Vec<usize> = chart.scaled(40).into_iter().map(|(_, l)| l).collect();
        assert_eq!(lengths, vec![40, 0, 10]);

        let empty = EngagementChart::from_record(&ProfileRecord::builder("x").build());
        assert!(empty.scaled(40).iter().all(|(_, l)| *l == 0));
    }

    #[test]
    fn test_general_info_rows() {
        let rows = general_info_rows(&record());
        assert_eq!(
            rows,
            vec![
                InfoRow::new("Boutique", "lea.vintage"),
                InfoRow::new("Évaluations", "50"),
                InfoRow::new("Abonnés", "200"),
                InfoRow::new("Note", "4.5/5"),
                InfoRow::new("Ventes estimées", "45 – 50"),
            ]
        );
    }

    #[test]
    fn test_export_file_stem() {
        assert_eq!(export_file_stem(&record(), "vintalyze"), "vintalyze_lea_vintage");

        let odd = ProfileRecord::builder("Léa's shop/2").build();
        assert_eq!(export_file_stem(&odd, ""), "L_a_s_shop_2");
    }
}
