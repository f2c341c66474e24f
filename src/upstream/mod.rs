//! Access to the upstream people provider.
//!
//! The provider exposes two read operations. [`PeopleSource`] is the seam the
//! aggregation service depends on; [`HttpPeopleSource`] is the production
//! implementation.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::Person;

pub use http::HttpPeopleSource;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UpstreamError {
    #[error("upstream unavailable: {0}")]
    Unavailable(String),
    #[error("upstream timed out: {0}")]
    Timeout(String),
    #[error("upstream responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid people payload: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Transport-level failures may succeed on a later attempt; provider
    /// rejections and malformed payloads will not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout(_))
    }
}

/// The two read operations offered by the upstream provider.
///
/// Implementations must be safe to call concurrently from both branches of a
/// single aggregation.
#[async_trait]
pub trait PeopleSource: Send + Sync {
    /// Every person known to the provider.
    async fn fetch_all_people(&self) -> Result<Vec<Person>, UpstreamError>;

    /// People the provider already tags as belonging to `city`.
    async fn fetch_people_by_city(&self, city: &str) -> Result<Vec<Person>, UpstreamError>;
}
