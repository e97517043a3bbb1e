//! Domain representation of a single feed event.

use chrono::{DateTime, Utc};

/// One earthquake event, normalized from the feed.
///
/// `magnitude` is 0.0 when the feed omits it, `place` is `"Unknown"` when
/// missing, and `time` falls back to the Unix epoch for absent or invalid
/// timestamps. `id` is unique per feed and is the deduplication key.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub magnitude: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub place: String,
    pub time: DateTime<Utc>,
}
