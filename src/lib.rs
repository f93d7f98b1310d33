//! wikimedia_pageviews
//!
//! A small blocking Rust client for the Wikimedia Pageviews REST API. Pairs
//! with the `pageviews` CLI.
//!
//! ### Features
//! - Top articles for a day or a month, straight from the API
//! - Top articles for any rolling week, aggregated from seven daily lists
//! - Total views of one article for a week or a month
//! - The busiest day of an article within a week or a month
//! - Save rankings as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use wikimedia_pageviews::{ClientConfig, PageviewsClient};
//!
//! let cfg = ClientConfig::new("pageviews-report/0.1 (you@example.org)")?;
//! let client = PageviewsClient::new(cfg)?;
//! let week = client.top_articles_for_week("20221218", Some(10))?;
//! wikimedia_pageviews::storage::save_csv(&week, "top_week.csv")?;
//! let peak = client.peak_day_in_week("Kylian Mbappé", "20221218")?;
//! println!("{} views on {}", peak.views, peak.date);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod dates;
pub mod error;
pub mod http;
pub mod models;
pub mod storage;

pub use api::{Endpoint, PageviewsClient, encode_article, unwrap_response};
pub use config::{Access, Agent, ClientConfig};
pub use error::{ApiError, PageviewsError, Result};
pub use http::{HttpResponse, ReqwestTransport, Transport};
pub use models::{ArticleRanking, DateRange, Granularity, PeakViews};
