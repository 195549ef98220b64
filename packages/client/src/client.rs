//! The Mantr API client.
//!
//! A [`Client`] holds the API key, the base URL and a configured
//! [`reqwest::blocking::Client`]. All of these are fixed at construction, so
//! one instance can be shared across threads and reused for any number of
//! calls. Each [`Client::walk`] is a single blocking request/response cycle.

use std::fmt;
use std::io::{self, Read};
use std::time::Duration;

use mantr_api::{WalkRequest, WalkResponse, WALK_PATH};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::{Error, KeyFormatError, Result};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.mantr.net";

/// Transport timeout applied to every call unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Every valid API key starts with this prefix.
pub const API_KEY_PREFIX: &str = "vak_";

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("mantr-rust/", env!("CARGO_PKG_VERSION"));

/// Bytes of a non-200 body kept for the debug log; the rest is discarded.
const ERROR_BODY_LOG_LIMIT: u64 = 1024;

// ---------------------------------------------------------------------------
// ClientBuilder
// ---------------------------------------------------------------------------

/// Construction-time options for a [`Client`].
///
/// Setters may be called in any order; calling the same setter twice keeps
/// the last value.
///
/// ```rust,ignore
/// let client = Client::builder("vak_...")
///     .base_url("http://localhost:8080")
///     .timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl ClientBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different deployment. A trailing `/` is ignored.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound each call by `timeout` instead of [`DEFAULT_TIMEOUT`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the API key and build the client. No network I/O happens here.
    pub fn build(self) -> Result<Client> {
        if !self.api_key.starts_with(API_KEY_PREFIX) {
            return Err(Error::Format(KeyFormatError::MissingPrefix));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| Error::Format(KeyFormatError::InvalidHeaderValue))?;
        auth.set_sensitive(true);

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Transport)?;

        Ok(Client {
            auth,
            base_url: self.base_url,
            timeout: self.timeout,
            http,
        })
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the Mantr API.
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Clone)]
pub struct Client {
    auth: HeaderValue,
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    /// Build a client with the default base URL and timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `{base_url}/v1/walk`
    pub fn walk_url(&self) -> String {
        format!("{}{}", self.base_url, WALK_PATH)
    }

    /// Traverse the graph from `request.phonemes`.
    ///
    /// Depth and limit are defaulted on a copy before sending (see
    /// [`WalkRequest::with_defaults`]); `request` itself is not modified.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `phonemes` is empty (no request is sent).
    /// - [`Error::Authentication`], [`Error::InsufficientCredits`],
    ///   [`Error::RateLimit`] for 401, 402 and 429.
    /// - [`Error::Api`] for any other non-200 status.
    /// - [`Error::Decode`] if a 200 body is not a valid [`WalkResponse`].
    /// - [`Error::Transport`] if the server could not be reached in time.
    pub fn walk(&self, request: &WalkRequest) -> Result<WalkResponse> {
        request.validate()?;
        let body = request.with_defaults();
        let url = self.walk_url();

        debug!(
            "walk: POST {url} ({} phonemes, depth {}, limit {})",
            body.phonemes.len(),
            body.effective_depth(),
            body.effective_limit()
        );

        let mut response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.auth.clone())
            .json(&body)
            .send()
            .map_err(Error::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let detail = drain_error_body(&mut response);
            warn!("walk: server returned {status}");
            debug!("walk: error body: {detail}");
            return Err(Error::from_status(status.as_u16()));
        }

        let bytes = response.bytes().map_err(Error::Transport)?;
        let walk: WalkResponse = serde_json::from_slice(&bytes).map_err(Error::Decode)?;

        debug!(
            "walk: {} paths, latency {}us, {} credits",
            walk.paths.len(),
            walk.latency_us,
            walk.credits_used
        );

        Ok(walk)
    }
}

/// Keep the first [`ERROR_BODY_LOG_LIMIT`] bytes of `body` for logging and
/// discard the rest, so the connection can go back to the pool without the
/// whole body being buffered. Read errors end the drain early.
fn drain_error_body<R: Read>(body: &mut R) -> String {
    let mut head = Vec::new();
    let _ = body.by_ref().take(ERROR_BODY_LOG_LIMIT).read_to_end(&mut head);
    let _ = io::copy(body, &mut io::sink());
    String::from_utf8_lossy(&head).into_owned()
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "vak_test_0123456789";

    #[test]
    fn defaults() {
        let client = Client::new(KEY).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.timeout(), Duration::from_secs(30));
        assert_eq!(client.walk_url(), "https://api.mantr.net/v1/walk");
    }

    #[test]
    fn key_without_prefix_is_rejected() {
        for key in ["", "vak", "vak-", "VAK_abc", "sk_live_abc", " vak_abc"] {
            let err = Client::new(key).unwrap_err();
            assert!(
                matches!(err, Error::Format(KeyFormatError::MissingPrefix)),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn bare_prefix_is_accepted() {
        assert!(Client::new("vak_").is_ok());
    }

    #[test]
    fn key_with_control_characters_is_rejected() {
        let err = Client::new("vak_abc\ndef").unwrap_err();
        assert!(matches!(err, Error::Format(KeyFormatError::InvalidHeaderValue)));
        assert!(!err.to_string().contains("must start with"));
    }

    #[test]
    fn error_body_is_capped_and_drained() {
        let mut body = io::Cursor::new(vec![b'x'; 1 << 20]);
        let head = drain_error_body(&mut body);
        assert_eq!(head.len() as u64, ERROR_BODY_LOG_LIMIT);
        assert_eq!(body.position(), 1 << 20);
    }

    #[test]
    fn short_error_body_is_kept_whole() {
        let mut body = io::Cursor::new(b"boom".to_vec());
        assert_eq!(drain_error_body(&mut body), "boom");
    }

    #[test]
    fn later_options_override_earlier_ones() {
        let client = Client::builder(KEY)
            .base_url("http://first.example")
            .timeout(Duration::from_secs(1))
            .base_url("http://second.example/")
            .timeout(Duration::from_secs(7))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://second.example");
        assert_eq!(client.timeout(), Duration::from_secs(7));
        assert_eq!(client.walk_url(), "http://second.example/v1/walk");
    }

    #[test]
    fn debug_output_hides_key() {
        let client = Client::new(KEY).unwrap();
        let dbg = format!("{client:?}");
        assert!(!dbg.contains(KEY));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn empty_phonemes_fail_before_io() {
        // Port 9 (discard) on a reserved address: any I/O attempt would
        // surface as a transport error instead.
        let client = Client::builder(KEY)
            .base_url("http://192.0.2.1:9")
            .build()
            .unwrap();
        let err = client.walk(&WalkRequest::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn user_agent_identifies_crate() {
        assert!(USER_AGENT.starts_with("mantr-rust/"));
    }
}
