//! Profile record produced by one analysis run.

use serde::{Deserialize, Serialize};

/// Structured statistics recovered from a pasted profile page.
///
/// A record is built once per analysis and is read-only afterwards. Optional
/// fields that no rule recognized are absent, and are left out of the
/// serialized form entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    shop_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    follower_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    following_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    review_count: Option<u64>,

    #[serde(flatten)]
    sales_estimate: Option<SalesEstimate>,

    comments: Vec<Comment>,
}

impl ProfileRecord {
    /// Start a record for the given shop.
    pub fn builder(shop_name: impl Into<String>) -> ProfileRecordBuilder {
        ProfileRecordBuilder {
            shop_name: shop_name.into(),
            follower_count: None,
            following_count: None,
            location: None,
            rating: None,
            review_count: None,
            comments: Vec::new(),
        }
    }

    pub fn shop_name(&self) -> &str {
        &self.shop_name
    }

    pub fn follower_count(&self) -> Option<u64> {
        self.follower_count
    }

    pub fn following_count(&self) -> Option<u64> {
        self.following_count
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    pub fn review_count(&self) -> Option<u64> {
        self.review_count
    }

    /// Sales range derived from the review count.
    pub fn sales_estimate(&self) -> Option<SalesEstimate> {
        self.sales_estimate
    }

    pub fn estimated_sales_low(&self) -> Option<u64> {
        self.sales_estimate.map(|s| s.low)
    }

    pub fn estimated_sales_high(&self) -> Option<u64> {
        self.sales_estimate.map(|s| s.high)
    }

    /// Comments in the order they appear in the pasted text.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Names of the optional fields no rule recognized.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.follower_count.is_none() {
            missing.push("followerCount");
        }
        if self.following_count.is_none() {
            missing.push("followingCount");
        }
        if self.location.is_none() {
            missing.push("location");
        }
        if self.rating.is_none() {
            missing.push("rating");
        }
        if self.review_count.is_none() {
            missing.push("reviewCount");
        }
        missing
    }
}

/// Builder for [`ProfileRecord`]; the sales estimate is derived on `build`.
#[derive(Debug, Clone)]
pub struct ProfileRecordBuilder {
    shop_name: String,
    follower_count: Option<u64>,
    following_count: Option<u64>,
    location: Option<String>,
    rating: Option<f64>,
    review_count: Option<u64>,
    comments: Vec<Comment>,
}

impl ProfileRecordBuilder {
    pub fn follower_count(mut self, count: Option<u64>) -> Self {
        self.follower_count = count;
        self
    }

    pub fn following_count(mut self, count: Option<u64>) -> Self {
        self.following_count = count;
        self
    }

    pub fn location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    pub fn rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating;
        self
    }

    pub fn review_count(mut self, count: Option<u64>) -> Self {
        self.review_count = count;
        self
    }

    pub fn comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }

    pub fn build(self) -> ProfileRecord {
        ProfileRecord {
            sales_estimate: self.review_count.map(SalesEstimate::from_review_count),
            shop_name: self.shop_name,
            follower_count: self.follower_count,
            following_count: self.following_count,
            location: self.location,
            rating: self.rating,
            review_count: self.review_count,
            comments: self.comments,
        }
    }
}

/// Estimated number of sales, assuming most sales leave a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalesEstimate {
    /// 90% of the review count, rounded down.
    #[serde(rename = "estimatedSalesLow")]
    pub low: u64,

    /// The review count itself.
    #[serde(rename = "estimatedSalesHigh")]
    pub high: u64,
}

impl SalesEstimate {
    /// Derive the range from a review count.
    pub fn from_review_count(count: u64) -> Self {
        // floor(count * 0.9) without going through floating point.
        let low = (count / 10) * 9 + (count % 10) * 9 / 10;
        Self { low, high: count }
    }
}

/// A recent comment left on the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment author.
    pub author: String,

    /// Elapsed time as written on the page, e.g. `2 jours`.
    pub relative_time: String,

    /// Comment text, empty when the header had no body line.
    pub body: String,
}

impl Comment {
    pub fn new(
        author: impl Into<String>,
        relative_time: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            relative_time: relative_time.into(),
            body: body.into(),
        }
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}
