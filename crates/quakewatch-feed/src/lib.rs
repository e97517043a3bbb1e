//! HTTP client for the USGS earthquake GeoJSON summary feed.

mod client;
mod error;
mod types;

pub use client::FeedClient;
pub use error::FeedError;
