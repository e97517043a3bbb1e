//! HTTP client for the USGS GeoJSON summary feed.
//!
//! Wraps `reqwest` with feed-specific error handling and conversion into
//! domain [`Event`]s. The feed URL comes from configuration, so tests point
//! the client at a wiremock server.

use std::time::Duration;

use reqwest::{Client, Url};

use quakewatch_core::Event;

use crate::error::FeedError;
use crate::types::{FeedDocument, Feature};

/// Client for the USGS GeoJSON summary feed.
pub struct FeedClient {
    client: Client,
    feed_url: Url,
}

impl FeedClient {
    /// Creates a client for the given feed URL.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FeedError::InvalidUrl`] if `feed_url`
    /// does not parse.
    pub fn new(feed_url: &str, timeout_secs: u64) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("quakewatch/0.1 (earthquake-monitoring)")
            .build()?;

        let feed_url = Url::parse(feed_url).map_err(|e| FeedError::InvalidUrl {
            url: feed_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, feed_url })
    }

    /// Fetches the feed once and returns its events in feed order.
    ///
    /// The feed is conventionally newest-first, but the order is
    /// feed-defined and passed through untouched. Features without an id
    /// are dropped.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Http`] on network failure or a non-2xx HTTP status.
    /// - [`FeedError::Deserialize`] if the body is not a GeoJSON document
    ///   of the expected shape.
    pub async fn fetch(&self) -> Result<Vec<Event>, FeedError> {
        let response = self.client.get(self.feed_url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let document: FeedDocument =
            serde_json::from_str(&body).map_err(|e| FeedError::Deserialize {
                context: self.feed_url.to_string(),
                source: e,
            })?;

        Ok(document
            .features
            .into_iter()
            .filter_map(Feature::into_event)
            .collect())
    }
}
