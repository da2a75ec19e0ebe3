//! Configuration structures for profile analysis.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Country names recognized when narrowing a location, in priority order.
pub const DEFAULT_COUNTRIES: &[&str] = &[
    "France",
    "Belgique",
    "Luxembourg",
    "Suisse",
    "Espagne",
    "Portugal",
    "Italie",
    "Allemagne",
    "Autriche",
    "Pays-Bas",
    "Pologne",
    "Lituanie",
    "Lettonie",
    "Estonie",
    "République tchèque",
    "Slovaquie",
    "Hongrie",
    "Roumanie",
    "Croatie",
    "Slovénie",
    "Grèce",
    "Finlande",
    "Suède",
    "Danemark",
    "Irlande",
    "Royaume-Uni",
    "États-Unis",
];

/// Authors never reported as comments: the platform's own system account,
/// and an account whose lines are known to mimic comment headers.
pub const DEFAULT_AUTHOR_DENYLIST: &[&str] = &["Vinted", "kymordz"];

/// Main configuration for vintalyze.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VintalyzeConfig {
    /// Profile extraction options.
    pub extraction: ExtractionOptions,

    /// Report rendering and export configuration.
    pub report: ReportConfig,
}

/// Options selecting the extraction strategy for each ambiguous field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionOptions {
    /// What to report when no following count is recognized.
    pub following_policy: FollowingPolicy,

    /// Shape of the lines that introduce a comment.
    pub comment_header: CommentHeaderShape,

    /// Maximum number of comments to keep.
    pub comment_cap: CommentCap,

    /// Recognized country names, first match wins.
    pub countries: Vec<String>,

    /// Authors whose header lines are skipped.
    pub author_denylist: Vec<String>,

    /// Field labels of the pasted page layout.
    pub labels: LayoutLabels,

    /// Layouts tried, in order, for follower and following counts.
    pub count_layouts: Vec<CountLayout>,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            following_policy: FollowingPolicy::default(),
            comment_header: CommentHeaderShape::default(),
            comment_cap: CommentCap::default(),
            countries: DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            author_denylist: DEFAULT_AUTHOR_DENYLIST
                .iter()
                .map(|a| a.to_string())
                .collect(),
            labels: LayoutLabels::default(),
            count_layouts: vec![CountLayout::NumberThenLabel],
        }
    }
}

impl ExtractionOptions {
    /// Set the following-count policy.
    pub fn with_following_policy(mut self, policy: FollowingPolicy) -> Self {
        self.following_policy = policy;
        self
    }

    /// Set the comment header shape.
    pub fn with_comment_header(mut self, shape: CommentHeaderShape) -> Self {
        self.comment_header = shape;
        self
    }

    /// Set the comment cap.
    pub fn with_comment_cap(mut self, cap: CommentCap) -> Self {
        self.comment_cap = cap;
        self
    }

    /// Replace the author denylist.
    pub fn with_author_denylist<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.author_denylist = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the country enumeration.
    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the count layouts.
    pub fn with_count_layouts(mut self, layouts: Vec<CountLayout>) -> Self {
        self.count_layouts = layouts;
        self
    }
}

/// Labels used by the rules to recognize fields in a pasted page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutLabels {
    /// Label of an explicit shop name line (`Boutique: name`).
    pub shop_label: String,

    /// Marker line that follows the shop heading.
    pub about_marker: String,

    /// Label below (or above) the follower count.
    pub followers: String,

    /// Label below (or above) the following count.
    pub following: String,

    /// Label of the location line (`À propos : Paris, France`).
    pub location_label: String,

    /// Phrase between a comment author and its elapsed time.
    pub relative_time_marker: String,

    /// Marker wrapping the author in marked comment headers (`**` by default,
    /// any non-empty string).
    pub comment_marker: String,
}

impl Default for LayoutLabels {
    fn default() -> Self {
        Self {
            shop_label: "Boutique".to_string(),
            about_marker: "À propos".to_string(),
            followers: "Abonnés".to_string(),
            following: "Abonnement".to_string(),
            location_label: "À propos".to_string(),
            relative_time_marker: "il y a".to_string(),
            comment_marker: "**".to_string(),
        }
    }
}

impl LayoutLabels {
    /// Name and value of every label, for validation and diagnostics.
    pub fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("shop_label", &self.shop_label),
            ("about_marker", &self.about_marker),
            ("followers", &self.followers),
            ("following", &self.following),
            ("location_label", &self.location_label),
            ("relative_time_marker", &self.relative_time_marker),
            ("comment_marker", &self.comment_marker),
        ]
    }
}

/// Behavior when no following count is recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowingPolicy {
    /// Leave the field absent.
    #[default]
    Unset,
    /// Report zero.
    ZeroWhenAbsent,
}

impl FromStr for FollowingPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "unset" => Ok(Self::Unset),
            "zero_when_absent" | "zero" => Ok(Self::ZeroWhenAbsent),
            other => Err(format!(
                "unknown following policy '{other}', expected 'unset' or 'zero_when_absent'"
            )),
        }
    }
}

/// Shape of a comment header line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentHeaderShape {
    /// `alice il y a 2 jours`
    #[default]
    Plain,
    /// `**alice** · il y a 2 jours`
    Marked,
}

impl FromStr for CommentHeaderShape {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "marked" => Ok(Self::Marked),
            other => Err(format!(
                "unknown comment header shape '{other}', expected 'plain' or 'marked'"
            )),
        }
    }
}

/// Order of a count and its label in the pasted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountLayout {
    /// `42` then `Abonnés` on the next line.
    NumberThenLabel,
    /// `Abonnés` then `42` on the next line.
    LabelThenNumber,
}

/// Upper bound on the number of comments kept.
///
/// Serialized as a positive integer or the string `"unbounded"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CommentCapRepr", into = "CommentCapRepr")]
pub enum CommentCap {
    /// Keep every comment.
    #[default]
    Unbounded,
    /// Keep at most this many comments.
    AtMost(NonZeroUsize),
}

impl CommentCap {
    /// Cap at `n` comments; zero is not a valid cap.
    pub fn at_most(n: usize) -> Option<Self> {
        NonZeroUsize::new(n).map(Self::AtMost)
    }

    /// Numeric limit, if any.
    pub fn limit(&self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::AtMost(n) => Some(n.get()),
        }
    }

    /// Whether `count` comments already fill the cap.
    pub fn is_reached(&self, count: usize) -> bool {
        self.limit().is_some_and(|limit| count >= limit)
    }
}

impl fmt::Display for CommentCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("unbounded"),
            Self::AtMost(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for CommentCap {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unbounded") {
            return Ok(Self::Unbounded);
        }
        s.parse::<usize>()
            .ok()
            .and_then(Self::at_most)
            .ok_or_else(|| format!("invalid comment cap '{s}', expected a positive integer or 'unbounded'"))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CommentCapRepr {
    Count(usize),
    Keyword(String),
}

impl TryFrom<CommentCapRepr> for CommentCap {
    type Error = String;

    fn try_from(repr: CommentCapRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            CommentCapRepr::Count(n) => {
                Self::at_most(n).ok_or_else(|| "comment cap must be positive".to_string())
            }
            CommentCapRepr::Keyword(k) => k.parse(),
        }
    }
}

impl From<CommentCap> for CommentCapRepr {
    fn from(cap: CommentCap) -> Self {
        match cap {
            CommentCap::Unbounded => Self::Keyword("unbounded".to_string()),
            CommentCap::AtMost(n) => Self::Count(n.get()),
        }
    }
}

/// Report rendering and export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Width in characters of the longest bar in text charts.
    pub chart_width: usize,

    /// Prefix of exported file names.
    pub export_prefix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            chart_width: 40,
            export_prefix: "vintalyze".to_string(),
        }
    }
}

impl VintalyzeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
