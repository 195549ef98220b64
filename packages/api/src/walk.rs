//! Graph walk types — `POST /v1/walk`.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Path of the walk endpoint, relative to the API base URL.
pub const WALK_PATH: &str = "/v1/walk";

/// Traversal depth applied when a request leaves `depth` unset or zero.
pub const DEFAULT_DEPTH: u32 = 3;

/// Result limit applied when a request leaves `limit` unset or zero.
pub const DEFAULT_LIMIT: u32 = 100;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Errors returned when a [`WalkRequest`] is rejected before it is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("phonemes cannot be empty")]
    EmptyPhonemes,
}

/// The request body for `POST /v1/walk`.
///
/// # Example
///
/// ```json
/// { "phonemes": ["ka", "ru", "na"], "pod": "research", "depth": 3, "limit": 100 }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalkRequest {
    /// Seed tokens for the traversal, in order. Must not be empty.
    pub phonemes: Vec<String>,

    /// Scoping identifier for the traversal. Opaque to the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod: Option<String>,

    /// Maximum traversal depth. `None` or `0` means [`DEFAULT_DEPTH`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,

    /// Maximum number of paths returned. `None` or `0` means [`DEFAULT_LIMIT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl WalkRequest {
    /// Construct a request seeded with `phonemes`, leaving everything else unset.
    pub fn new<I, S>(phonemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phonemes: phonemes.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_pod(mut self, pod: impl Into<String>) -> Self {
        self.pod = Some(pod.into());
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check the request can be sent. Only the phoneme list is constrained.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.phonemes.is_empty() {
            return Err(RequestError::EmptyPhonemes);
        }
        Ok(())
    }

    /// Depth that will be sent on the wire.
    pub fn effective_depth(&self) -> u32 {
        match self.depth {
            Some(d) if d > 0 => d,
            _ => DEFAULT_DEPTH,
        }
    }

    /// Limit that will be sent on the wire.
    pub fn effective_limit(&self) -> u32 {
        match self.limit {
            Some(l) if l > 0 => l,
            _ => DEFAULT_LIMIT,
        }
    }

    /// Return the request as it is put on the wire: depth and limit filled
    /// in, an empty pod dropped. `self` is left untouched.
    pub fn with_defaults(&self) -> Self {
        Self {
            phonemes: self.phonemes.clone(),
            pod: self.pod.clone().filter(|p| !p.is_empty()),
            depth: Some(self.effective_depth()),
            limit: Some(self.effective_limit()),
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// A single path found by the walk.
///
/// Decoding is lenient: absent fields take their zero value and a `null`
/// node list reads as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PathResult {
    /// Node identifiers along the path, starting at the seed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<String>,

    /// Relevance score assigned by the service.
    #[serde(default)]
    pub score: f64,

    /// Number of hops in this path.
    #[serde(default)]
    pub depth: u32,
}

/// The response body for a successful `POST /v1/walk`.
///
/// # Example
///
/// ```json
/// {
///   "paths": [ { "nodes": ["a", "b"], "score": 0.9, "depth": 2 } ],
///   "latency_us": 1500,
///   "credits_used": 3
/// }
/// ```
///
/// Servers may send `"paths": null` for an empty result, and may leave out
/// the counters; both decode to their zero value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WalkResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub paths: Vec<PathResult>,

    /// Server-side processing time in microseconds.
    #[serde(default)]
    pub latency_us: u64,

    /// Credits charged for this call.
    #[serde(default)]
    pub credits_used: u64,
}

/// Read `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
