use serde_json::{Map, Value};
use thiserror::Error;

/// Error payload returned by the Pageviews API for a non-success response.
///
/// `detail` holds the decoded JSON body (usually `type`, `title`, `detail`,
/// `method` and `uri`). When the body was not a JSON object, the raw text is
/// stored under the `"body"` key instead.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("ApiError({status_code}): {}", Value::Object(.detail.clone()))]
pub struct ApiError {
    pub status_code: u16,
    pub detail: Map<String, Value>,
}

impl ApiError {
    /// Human-readable explanation from the payload, if the API sent one.
    pub fn message(&self) -> Option<&str> {
        self.detail
            .get("detail")
            .or_else(|| self.detail.get("title"))
            .and_then(Value::as_str)
    }

    /// Request URI echoed back by the API, if present.
    pub fn uri(&self) -> Option<&str> {
        self.detail.get("uri").and_then(Value::as_str)
    }
}

/// Everything that can go wrong while talking to the Pageviews API.
#[derive(Debug, Error)]
pub enum PageviewsError {
    /// The API answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Connection, TLS or body-read failure in the transport.
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    /// A success body that is not the JSON shape we expected.
    #[error("decode json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("empty response body from {url}")]
    EmptyBody { url: String },
    #[error("response from {url} contained no items")]
    MissingItem { url: String },
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PageviewsError {
    /// Returns the API error payload when this is an [`PageviewsError::Api`].
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            PageviewsError::Api(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PageviewsError>;
