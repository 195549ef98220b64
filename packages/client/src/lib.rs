//! Blocking client for the Mantr graph walk API.
//!
//! The library is a thin layer over HTTP: it checks the credential format,
//! sends one `POST /v1/walk` per call and maps the reply to a typed result
//! or a typed [`Error`]. There are no retries, no caching and no pooling
//! beyond what `reqwest` provides; callers own those policies.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use mantr::{Client, WalkRequest};
//!
//! let client = Client::new("vak_...")?;
//! let resp = client.walk(&WalkRequest::new(["ka", "ru", "na"]))?;
//! for path in &resp.paths {
//!     println!("{:.3} {}", path.score, path.nodes.join(" → "));
//! }
//! ```
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`Client`] and [`ClientBuilder`] |
//! | [`error`] | [`Error`] taxonomy returned by every fallible call |

pub mod client;
pub mod error;

pub use client::{
    Client, ClientBuilder, API_KEY_PREFIX, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, USER_AGENT,
};
pub use error::{Error, KeyFormatError, Result};
pub use mantr_api::{PathResult, RequestError, WalkRequest, WalkResponse};
