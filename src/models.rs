use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One entry of a top-articles list.
///
/// `article` is the API's canonical title: underscores instead of spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRanking {
    pub article: String,
    pub views: u64,
    pub rank: u32,
}

/// Inclusive date window for per-article queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, d: NaiveDate) -> bool {
        self.start <= d && d <= self.end
    }
}

/// The single busiest day in a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakViews {
    pub date: NaiveDate,
    pub views: u64,
}

/// Per-article series resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
        }
    }
}

/// Raw `top` response: `{"items":[{"articles":[...]}]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopResponse {
    pub items: Vec<TopItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopItem {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
    pub articles: Vec<ArticleRanking>,
}

/// Raw `per-article` response: `{"items":[{"timestamp":..,"views":..}]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerArticleResponse {
    pub items: Vec<PerArticleItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerArticleItem {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub article: Option<String>,
    #[serde(default)]
    pub granularity: Option<String>,
    /// `YYYYMMDDHH`
    pub timestamp: String,
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub agent: Option<String>,
    pub views: u64,
}
