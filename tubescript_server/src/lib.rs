//! HTTP boundary for transcript lookups.
//!
//! `GET /api/get_transcript?videoId=<id or url>&languages=en&languages=de[&debug=true]`
//! returns a [`tubescript_core::TranscriptResult`] as JSON. Resolver-level failures
//! ("no transcript", "video unavailable") are answered with 200 and
//! `success: false`; only request-shape problems get a 4xx.

pub mod config;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::{app, AppState};
