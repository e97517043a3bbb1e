//! Serde types for the USGS GeoJSON summary document.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use quakewatch_core::Event;

/// Top-level GeoJSON feed document. Only `features` is read.
#[derive(Debug, Deserialize)]
pub(crate) struct FeedDocument {
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// One feed feature, i.e. a single event.
#[derive(Debug, Deserialize)]
pub(crate) struct Feature {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub geometry: Geometry,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Properties {
    pub mag: Option<f64>,
    pub place: Option<String>,
    pub time: Option<i64>,
}

/// Feed geometry. Coordinates arrive as `[longitude, latitude, depth]`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Geometry {
    pub coordinates: Vec<f64>,
}

impl Feature {
    /// Convert into a domain event.
    ///
    /// Returns `None` for features without an id — an id-less event could
    /// never be deduplicated. Absent magnitude becomes 0.0, absent place
    /// `"Unknown"`, and an absent or unrepresentable timestamp the Unix
    /// epoch.
    pub(crate) fn into_event(self) -> Option<Event> {
        let id = self.id?;
        let longitude = self.geometry.coordinates.first().copied().unwrap_or(0.0);
        let latitude = self.geometry.coordinates.get(1).copied().unwrap_or(0.0);
        let time = self
            .properties
            .time
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Some(Event {
            id,
            magnitude: self.properties.mag.unwrap_or(0.0),
            latitude,
            longitude,
            place: self
                .properties
                .place
                .unwrap_or_else(|| "Unknown".to_string()),
            time,
        })
    }
}
