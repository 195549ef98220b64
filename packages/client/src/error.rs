//! Error type returned by the client.
//!
//! Every failure reaches the caller as one [`Error`] variant. Nothing is
//! retried or swallowed; the caller decides what to do with each kind.

use mantr_api::RequestError;
use thiserror::Error;

use crate::client::API_KEY_PREFIX;

/// Shorthand for results produced by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Why an API key was rejected at construction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormatError {
    #[error("must start with {:?}", API_KEY_PREFIX)]
    MissingPrefix,

    #[error("contains characters that cannot be sent in an HTTP header")]
    InvalidHeaderValue,
}

#[derive(Debug, Error)]
pub enum Error {
    /// The API key is malformed. Raised at construction.
    #[error("invalid API key format, {0}")]
    Format(KeyFormatError),

    /// The request was rejected locally, before any I/O.
    #[error("invalid request: {0}")]
    Validation(#[from] RequestError),

    /// `401`: the server rejected the API key.
    #[error("authentication failed - invalid API key")]
    Authentication,

    /// `402`: the account has no credits left.
    #[error("insufficient credits")]
    InsufficientCredits,

    /// `429`: the caller is being throttled.
    #[error("rate limit exceeded")]
    RateLimit,

    /// The request never produced a response (connect, timeout, I/O).
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Any other non-200 status.
    #[error("API error: status {status}")]
    Api { status: u16 },

    /// A 200 reply whose body is not a valid walk response.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl Error {
    /// The HTTP status that produced this error, if it came from the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication => Some(401),
            Error::InsufficientCredits => Some(402),
            Error::RateLimit => Some(429),
            Error::Api { status } => Some(*status),
            _ => None,
        }
    }

    /// Map a non-200 status to its error kind.
    pub(crate) fn from_status(status: u16) -> Self {
        match status {
            401 => Error::Authentication,
            402 => Error::InsufficientCredits,
            429 => Error::RateLimit,
            status => Error::Api { status },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(Error::from_status(401), Error::Authentication));
        assert!(matches!(Error::from_status(402), Error::InsufficientCredits));
        assert!(matches!(Error::from_status(429), Error::RateLimit));
        assert!(matches!(Error::from_status(503), Error::Api { status: 503 }));
    }

    #[test]
    fn status_round_trips_through_helper() {
        for code in [401, 402, 429, 404, 500] {
            assert_eq!(Error::from_status(code).status(), Some(code));
        }
    }

    #[test]
    fn local_errors_have_no_status() {
        let e = Error::Format(KeyFormatError::MissingPrefix);
        assert_eq!(e.status(), None);
        let e = Error::from(RequestError::EmptyPhonemes);
        assert_eq!(e.status(), None);
    }

    #[test]
    fn messages() {
        assert_eq!(
            Error::Format(KeyFormatError::MissingPrefix).to_string(),
            r#"invalid API key format, must start with "vak_""#
        );
        assert_eq!(
            Error::Format(KeyFormatError::InvalidHeaderValue).to_string(),
            "invalid API key format, contains characters that cannot be sent in an HTTP header"
        );
        assert_eq!(
            Error::from(RequestError::EmptyPhonemes).to_string(),
            "invalid request: phonemes cannot be empty"
        );
        assert_eq!(Error::Api { status: 500 }.to_string(), "API error: status 500");
    }

    #[test]
    fn decode_error_keeps_source() {
        use std::error::Error as _;

        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e = Error::Decode(parse);
        assert!(e.source().is_some());
    }
}
