//! Blocking HTTP GET seam.
//!
//! [`PageviewsClient`](crate::PageviewsClient) only needs "GET this URL with
//! this User-Agent and hand back status, body and headers". [`Transport`]
//! captures exactly that, so the client can run against `reqwest` in
//! production and against canned responses in tests.

use crate::error::Result;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::USER_AGENT;
use reqwest::redirect::Policy;
use std::time::Duration;

/// Raw HTTP result before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            headers: Vec::new(),
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Performs a single GET request.
pub trait Transport {
    fn get(&self, url: &str, user_agent: &str) -> Result<HttpResponse>;
}

/// Default transport: one reusable `reqwest` blocking session.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: HttpClient,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .build()?;
        Ok(Self { http })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str, user_agent: &str) -> Result<HttpResponse> {
        let resp = self.http.get(url).header(USER_AGENT, user_agent).send()?;
        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = resp.text()?;
        Ok(HttpResponse {
            status,
            body,
            headers,
        })
    }
}
