//! Request and response types for the Mantr API.
//!
//! This crate encodes the HTTP contract of the walk endpoint as Rust types.
//! It performs no I/O; the `mantr` crate owns the HTTP client.
//!
//! # Endpoints covered
//!
//! | Method | Path | Type |
//! |--------|------|------|
//! | POST | `/v1/walk` | [`WalkRequest`] → [`WalkResponse`] |

pub mod walk;

pub use walk::{
    PathResult, RequestError, WalkRequest, WalkResponse, DEFAULT_DEPTH, DEFAULT_LIMIT, WALK_PATH,
};
