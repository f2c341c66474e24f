use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, StatusCode, Url};

use super::{PeopleSource, UpstreamError};
use crate::entities::Person;

const USER_AGENT: &str = concat!("people-api/", env!("CARGO_PKG_VERSION"));
const BODY_PREVIEW_CHAR_LIMIT: usize = 160;

/// Reqwest-backed client for the upstream provider.
///
/// The inner [`Client`] holds the connection pool; cloning the source shares it.
#[derive(Clone, Debug)]
pub struct HttpPeopleSource {
    client: Client,
    base_url: Url,
}

impl HttpPeopleSource {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, connect_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                UpstreamError::Unavailable(format!("base url {} cannot carry a path", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn get_people(&self, url: Url) -> Result<Vec<Person>, UpstreamError> {
        tracing::debug!(url = %url, "Requesting people from upstream");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref()).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PeopleSource for HttpPeopleSource {
    async fn fetch_all_people(&self) -> Result<Vec<Person>, UpstreamError> {
        let url = self.endpoint(&["users"])?;
        self.get_people(url).await
    }

    async fn fetch_people_by_city(&self, city: &str) -> Result<Vec<Person>, UpstreamError> {
        let url = self.endpoint(&["city", city, "users"])?;
        self.get_people(url).await
    }
}

fn map_transport_error(error: reqwest::Error) -> UpstreamError {
    if error.is_timeout() {
        UpstreamError::Timeout(error.to_string())
    } else {
        UpstreamError::Unavailable(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UpstreamError {
    UpstreamError::Status {
        status: status.as_u16(),
        body: body_preview(body),
    }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(BODY_PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > BODY_PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
