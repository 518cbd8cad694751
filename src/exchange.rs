//! HTTP exchange model
//!
//! An [`Exchange`] is a completed request paired with its response. It is
//! produced by the HTTP client side (see [`Exchange::capture`]) or built by
//! hand in tests, and only ever read by the formatter.

use crate::error::Result;
use reqwest::header::HeaderMap;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static NEXT_EXCHANGE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identifier assigned to every exchange at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ExchangeId(u64);

impl ExchangeId {
    fn next() -> Self {
        Self(NEXT_EXCHANGE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered header list with case-insensitive lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// First value for `name`, compared ignoring ASCII case
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get("content-type")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<&HeaderMap> for Headers {
    fn from(map: &HeaderMap) -> Self {
        map.iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }
}

/// Message body, either already text or raw bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Body {
    Text(String),
    Bytes(Vec<u8>),
}

impl Body {
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Text(text) => text.is_empty(),
            Body::Bytes(bytes) => bytes.is_empty(),
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Bytes(bytes.to_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Request {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Body>,
}

impl Request {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Snapshot of a `reqwest` request taken before it is sent.
    ///
    /// Streaming bodies cannot be read back and are recorded as absent.
    pub fn from_reqwest(request: &reqwest::Request) -> Self {
        Self {
            method: request.method().to_string(),
            url: request.url().to_string(),
            headers: Headers::from(request.headers()),
            body: request
                .body()
                .and_then(|body| body.as_bytes())
                .map(Body::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub status_code: u16,
    pub reason: String,
    pub headers: Headers,
    pub content: Option<Vec<u8>>,
    pub elapsed: Duration,
}

impl Response {
    pub fn new(status_code: u16, reason: impl Into<String>) -> Self {
        Self {
            status_code,
            reason: reason.into(),
            headers: Headers::new(),
            content: None,
            elapsed: Duration::ZERO,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(name, value);
        self
    }

    pub fn content(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }
}

/// A request paired with its completed response
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    id: ExchangeId,
    pub request: Request,
    pub response: Response,
}

impl Exchange {
    pub fn new(request: Request, response: Response) -> Self {
        Self {
            id: ExchangeId::next(),
            request,
            response,
        }
    }

    /// Build an exchange from a request snapshot and a `reqwest` response,
    /// reading the response body to the end.
    pub async fn capture(
        request: Request,
        response: reqwest::Response,
        elapsed: Duration,
    ) -> Result<Self> {
        let status = response.status();
        let headers = Headers::from(response.headers());
        let content = response.bytes().await?;

        let response = Response {
            status_code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            content: Some(content.to_vec()),
            elapsed,
        };
        Ok(Self::new(request, response))
    }

    pub fn id(&self) -> ExchangeId {
        self.id
    }
}

impl AsRef<Exchange> for Exchange {
    fn as_ref(&self) -> &Exchange {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Body, Exchange, Headers, Request, Response};
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

    #[test]
    fn headers_lookup_ignores_case_and_keeps_order() {
        let headers: Headers = [
            ("X-First", "1"),
            ("Content-Type", "text/plain"),
            ("x-first", "2"),
        ]
        .into_iter()
        .collect();
        assert_eq!(headers.get("x-FIRST"), Some("1"));
        assert_eq!(headers.content_type(), Some("text/plain"));
        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["X-First", "Content-Type", "x-first"]);
    }

    #[test]
    fn headers_from_header_map() {
        let mut map = HeaderMap::new();
        map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let headers = Headers::from(&map);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Content-Type"), Some("application/json"));
    }

    #[test]
    fn exchange_ids_are_unique_and_survive_clone() {
        let first = Exchange::new(Request::new("GET", "http://a"), Response::new(200, "OK"));
        let second = Exchange::new(Request::new("GET", "http://a"), Response::new(200, "OK"));
        assert_ne!(first.id(), second.id());
        assert_eq!(first.clone().id(), first.id());
    }

    #[test]
    fn body_emptiness() {
        assert!(Body::from("").is_empty());
        assert!(Body::from(Vec::<u8>::new()).is_empty());
        assert!(!Body::from(&b"x"[..]).is_empty());
    }

    #[test]
    fn request_snapshot_from_reqwest_keeps_buffered_body() {
        let client = reqwest::Client::new();
        let request = client
            .post("http://example.com/items")
            .header("X-Trace", "abc")
            .body("payload")
            .build()
            .expect("request");
        let snapshot = Request::from_reqwest(&request);
        assert_eq!(snapshot.method, "POST");
        assert_eq!(snapshot.url, "http://example.com/items");
        assert_eq!(snapshot.headers.get("x-trace"), Some("abc"));
        assert_eq!(snapshot.body, Some(Body::Bytes(b"payload".to_vec())));
    }
}
