//! Synchronous client for the **Wikimedia Pageviews REST API**.
//!
//! Covers the `pageviews/top` and `pageviews/per-article` endpoints and derives
//! the figures the API does not serve directly: weekly top lists, weekly and
//! monthly article totals, and the busiest day of a week or month.
//!
//! ### Notes
//! - Every request carries the configured User-Agent. Wikimedia throttles
//!   anonymous or generic agents, so use a real contact address.
//! - Article titles are encoded exactly once: spaces become underscores and
//!   everything else outside `[A-Za-z0-9-_.~]` is percent-encoded.
//! - Weekly top lists are ranked in first-seen order across the seven days,
//!   not by total views.
//!
//! Typical usage:
//! ```no_run
//! # use wikimedia_pageviews::{ClientConfig, PageviewsClient};
//! let client = PageviewsClient::new(ClientConfig::new("stats-bot/1.0 (ops@example.org)")?)?;
//! let top = client.top_articles_for_day(2022, 12, 29)?;
//! let messi = client.article_views_for_week("Lionel Messi", "20221218")?;
//! let peak = client.peak_day_in_month("Pelé", 2022, 12)?;
//! # Ok::<(), wikimedia_pageviews::PageviewsError>(())
//! ```

use crate::config::ClientConfig;
use crate::dates::{format_compact_date, month_range, parse_compact_date, parse_timestamp, week_range};
use crate::error::{ApiError, PageviewsError, Result};
use crate::http::{HttpResponse, ReqwestTransport, Transport};
use crate::models::{
    ArticleRanking, DateRange, Granularity, PeakViews, PerArticleItem, PerArticleResponse,
    TopResponse,
};
use chrono::Datelike;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

// RFC 3986 unreserved characters stay literal: alphanumerics and -_.~
const ARTICLE_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Convert a human-readable title into the path segment the API expects.
///
/// ```
/// use wikimedia_pageviews::encode_article;
/// assert_eq!(encode_article("Lionel Messi"), "Lionel_Messi");
/// assert_eq!(encode_article("Kylian Mbappé"), "Kylian_Mbapp%C3%A9");
/// assert_eq!(encode_article("AC/DC"), "AC%2FDC");
/// ```
///
/// Not idempotent: `%` itself is escaped, so encode each raw title once.
pub fn encode_article(title: &str) -> String {
    let underscored = title.replace(' ', "_");
    percent_encoding::utf8_percent_encode(&underscored, ARTICLE_SAFE).to_string()
}

/// Endpoint family under `.../metrics/pageviews/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Top,
    PerArticle,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Top => "/pageviews/top",
            Endpoint::PerArticle => "/pageviews/per-article",
        }
    }
}

/// Turn a raw HTTP result into body text or an [`ApiError`].
///
/// - non-2xx: the body is decoded as a JSON object for `detail`; a body that
///   is not a JSON object is kept verbatim under `"body"`.
/// - 2xx with a body: `Some(body)`.
/// - 2xx without a body: `None`.
pub fn unwrap_response(resp: HttpResponse) -> Result<Option<String>> {
    if !resp.is_success() {
        let detail = match serde_json::from_str::<Value>(&resp.body) {
            Ok(Value::Object(map)) => map,
            _ => {
                let mut map = Map::new();
                map.insert("body".into(), Value::String(resp.body));
                map
            }
        };
        let err = ApiError {
            status_code: resp.status,
            detail,
        };
        log::warn!(
            "pageviews api returned {} for {}",
            err.status_code,
            err.uri().unwrap_or("<unknown uri>")
        );
        return Err(err.into());
    }
    if resp.body.is_empty() {
        return Ok(None);
    }
    Ok(Some(resp.body))
}

/// Blocking Pageviews client.
///
/// Holds an immutable [`ClientConfig`] and one reusable [`Transport`]. Meant
/// for sequential use; every method is a pure read and safe to retry.
#[derive(Debug, Clone)]
pub struct PageviewsClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl PageviewsClient<ReqwestTransport> {
    /// Client backed by a fresh `reqwest` blocking session.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, ReqwestTransport::new()?)
    }
}

impl<T: Transport> PageviewsClient<T> {
    /// Client over any [`Transport`]. Fails if the config is invalid.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `{base}{endpoint}/{project}/{access}`: the root every request shares.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}{}/{}/{}",
            self.config.base_url(),
            endpoint.path(),
            self.config.project,
            self.config.access
        )
    }

    /// Full per-article URL. `article` must already be encoded.
    pub fn per_article_url(
        &self,
        article: &str,
        granularity: Granularity,
        range: DateRange,
    ) -> String {
        format!(
            "{}/{}/{}/{}/{}/{}",
            self.endpoint_url(Endpoint::PerArticle),
            self.config.agent,
            article,
            granularity.as_str(),
            format_compact_date(range.start),
            format_compact_date(range.end)
        )
    }

    fn get_json<D: DeserializeOwned>(&self, url: &str) -> Result<D> {
        log::debug!("GET {url}");
        let resp = self.transport.get(url, &self.config.user_agent)?;
        match unwrap_response(resp)? {
            Some(body) => Ok(serde_json::from_str(&body)?),
            None => Err(PageviewsError::EmptyBody {
                url: url.to_string(),
            }),
        }
    }

    fn top_articles(&self, url: &str) -> Result<Vec<ArticleRanking>> {
        let resp: TopResponse = self.get_json(url)?;
        resp.items
            .into_iter()
            .next()
            .map(|item| item.articles)
            .ok_or_else(|| PageviewsError::MissingItem {
                url: url.to_string(),
            })
    }

    fn per_article_series(
        &self,
        article: &str,
        granularity: Granularity,
        range: DateRange,
    ) -> Result<(String, PerArticleResponse)> {
        let url = self.per_article_url(article, granularity, range);
        let resp = self.get_json(&url)?;
        Ok((url, resp))
    }

    /// Most viewed articles on one day, exactly as ranked by the API.
    ///
    /// The date is not checked locally; an impossible day comes back as an
    /// [`ApiError`].
    pub fn top_articles_for_day(&self, year: i32, month: u32, day: u32) -> Result<Vec<ArticleRanking>> {
        let url = format!(
            "{}/{}/{:02}/{:02}",
            self.endpoint_url(Endpoint::Top),
            year,
            month,
            day
        );
        self.top_articles(&url)
    }

    /// Most viewed articles over a calendar month, truncated to `limit`.
    ///
    /// The `top` route takes the month as `MM` and the literal `all-days` in
    /// place of `DD`, so March is requested as `/{year}/03/all-days`.
    pub fn top_articles_for_month(
        &self,
        year: i32,
        month: u32,
        limit: Option<usize>,
    ) -> Result<Vec<ArticleRanking>> {
        let url = format!(
            "{}/{}/{:02}/all-days",
            self.endpoint_url(Endpoint::Top),
            year,
            month
        );
        let mut articles = self.top_articles(&url)?;
        if let Some(n) = limit {
            articles.truncate(n);
        }
        Ok(articles)
    }

    /// Most viewed articles over the seven days starting at `start_date`
    /// (`YYYYMMDD`), built from seven daily top lists.
    ///
    /// Views are summed per title. Ranks follow the order in which titles were
    /// first seen (day one's list first, then newcomers from day two, ...),
    /// not total views. Any failing day fails the whole call.
    pub fn top_articles_for_week(
        &self,
        start_date: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ArticleRanking>> {
        let start = parse_compact_date(start_date)?;
        let mut tally = OrderedTally::default();
        for day in start.iter_days().take(7) {
            for entry in self.top_articles_for_day(day.year(), day.month(), day.day())? {
                tally.add(entry.article, entry.views);
            }
        }
        let mut ranked = tally.into_rankings();
        if let Some(n) = limit {
            ranked.truncate(n);
        }
        Ok(ranked)
    }

    /// Total views of `article` over the seven days starting at `start_date`.
    /// One daily-granularity request covers the whole week.
    pub fn article_views_for_week(&self, article: &str, start_date: &str) -> Result<u64> {
        let encoded = encode_article(article);
        let range = week_range(parse_compact_date(start_date)?)?;
        let (_, series) = self.per_article_series(&encoded, Granularity::Daily, range)?;
        Ok(series.items.iter().map(|i| i.views).sum())
    }

    /// Total views of `article` for one month.
    ///
    /// `start_date`/`end_date` (`YYYYMMDD`) must be the first and last day of
    /// the month. The pair is passed through as given.
    pub fn article_views_for_month(
        &self,
        article: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<u64> {
        let encoded = encode_article(article);
        let range = DateRange {
            start: parse_compact_date(start_date)?,
            end: parse_compact_date(end_date)?,
        };
        let (url, series) = self.per_article_series(&encoded, Granularity::Monthly, range)?;
        series
            .items
            .first()
            .map(|i| i.views)
            .ok_or(PageviewsError::MissingItem { url })
    }

    /// Busiest day of `article` in `year`-`month`.
    pub fn peak_day_in_month(&self, article: &str, year: i32, month: u32) -> Result<PeakViews> {
        let encoded = encode_article(article);
        self.peak_day(&encoded, month_range(year, month)?)
    }

    /// Busiest day of `article` in the seven days starting at `start_date`.
    pub fn peak_day_in_week(&self, article: &str, start_date: &str) -> Result<PeakViews> {
        let encoded = encode_article(article);
        self.peak_day(&encoded, week_range(parse_compact_date(start_date)?)?)
    }

    fn peak_day(&self, encoded_article: &str, range: DateRange) -> Result<PeakViews> {
        let (url, series) = self.per_article_series(encoded_article, Granularity::Daily, range)?;
        // On equal views the earlier day wins.
        let best = series
            .items
            .iter()
            .fold(None, |best: Option<&PerArticleItem>, item| match best {
                Some(b) if b.views >= item.views => Some(b),
                _ => Some(item),
            })
            .ok_or(PageviewsError::MissingItem { url })?;
        let date = parse_timestamp(&best.timestamp)?;
        if !range.contains(date) {
            log::warn!("peak day {date} for {encoded_article} lies outside {}..={}", range.start, range.end);
        }
        Ok(PeakViews {
            date,
            views: best.views,
        })
    }
}

/// Title -> running total, remembering first-insertion order.
#[derive(Debug, Default)]
struct OrderedTally {
    totals: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl OrderedTally {
    fn add(&mut self, article: String, views: u64) {
        match self.index.get(&article) {
            Some(&i) => self.totals[i].1 += views,
            None => {
                self.index.insert(article.clone(), self.totals.len());
                self.totals.push((article, views));
            }
        }
    }

    fn into_rankings(self) -> Vec<ArticleRanking> {
        self.totals
            .into_iter()
            .zip(1u32..)
            .map(|((article, views), rank)| ArticleRanking {
                article,
                views,
                rank,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_replaces_spaces_and_escapes_reserved() {
        assert_eq!(encode_article("Lionel Messi"), "Lionel_Messi");
        assert_eq!(encode_article("Kylian Mbappé"), "Kylian_Mbapp%C3%A9");
        assert_eq!(encode_article("Pelé"), "Pel%C3%A9");
        assert_eq!(
            encode_article("What? Me worry/100%#"),
            "What%3F_Me_worry%2F100%25%23"
        );
        assert_eq!(encode_article("Already_under-scored.~"), "Already_under-scored.~");
    }

    #[test]
    fn encoding_twice_double_escapes() {
        let once = encode_article("Pelé");
        assert_eq!(encode_article(&once), "Pel%25C3%25A9");
    }

    #[test]
    fn unwrap_success_and_empty() {
        assert_eq!(
            unwrap_response(HttpResponse::new(200, "{\"items\":[]}")).unwrap(),
            Some("{\"items\":[]}".to_string())
        );
        assert_eq!(unwrap_response(HttpResponse::new(200, "")).unwrap(), None);
    }

    #[test]
    fn unwrap_error_with_json_body() {
        let body = r#"{"type":"https://mediawiki.org/wiki/HyperSwitch/errors/not_found","title":"Not found.","detail":"no data","uri":"/x"}"#;
        let err = unwrap_response(HttpResponse::new(404, body)).unwrap_err();
        let api = err.api().unwrap();
        assert_eq!(api.status_code, 404);
        assert_eq!(api.uri(), Some("/x"));
        assert_eq!(api.message(), Some("no data"));
    }

    #[test]
    fn unwrap_error_with_non_json_body() {
        let err = unwrap_response(HttpResponse::new(502, "Bad Gateway")).unwrap_err();
        let api = err.api().unwrap();
        assert_eq!(api.status_code, 502);
        assert_eq!(api.detail.get("body"), Some(&Value::from("Bad Gateway")));
        assert_eq!(api.uri(), None);
    }

    #[test]
    fn unwrap_error_with_json_array_body_falls_back_to_raw() {
        let err = unwrap_response(HttpResponse::new(500, "[1,2]")).unwrap_err();
        assert_eq!(
            err.api().unwrap().detail.get("body"),
            Some(&Value::from("[1,2]"))
        );
    }

    #[test]
    fn tally_keeps_first_seen_order() {
        let mut t = OrderedTally::default();
        t.add("B".into(), 5);
        t.add("A".into(), 10);
        t.add("B".into(), 7);
        t.add("C".into(), 1);
        let r = t.into_rankings();
        let got: Vec<_> = r.iter().map(|a| (a.article.as_str(), a.views, a.rank)).collect();
        assert_eq!(got, vec![("B", 12, 1), ("A", 10, 2), ("C", 1, 3)]);
    }
}
