//! Daily summary and manual test notifications.

use quakewatch_core::{impact, points, report, AppConfig};
use quakewatch_feed::{FeedClient, FeedError};
use quakewatch_notify::TelegramClient;

/// Fetch the feed once and broadcast the daily summary.
///
/// An empty feed sends the fixed "no earthquakes" report without a map;
/// otherwise the first (newest) event is summarised with its impact list.
///
/// # Errors
///
/// Returns [`FeedError`] if the feed cannot be fetched or parsed. Delivery
/// failures are handled per recipient inside the broadcast and are not
/// errors here.
pub async fn send_daily_report(
    config: &AppConfig,
    feed: &FeedClient,
    notify: &TelegramClient,
) -> Result<(), FeedError> {
    let events = feed.fetch().await?;

    let Some(latest) = events.first() else {
        let delivered = notify
            .broadcast(&config.recipients, report::EMPTY_DAILY_REPORT, None)
            .await;
        tracing::info!(delivered, "empty daily report sent");
        return Ok(());
    };

    let entries = impact::rank_impact(
        latest.latitude,
        latest.longitude,
        latest.magnitude,
        points::CITIES,
        points::PRIORITY_CITY,
        impact::DEFAULT_INCLUSION_RADIUS_KM,
    );
    let text = report::format_daily_report(latest, &entries);
    let delivered = notify
        .broadcast(
            &config.recipients,
            &text,
            Some((latest.latitude, latest.longitude)),
        )
        .await;

    tracing::info!(
        id = %latest.id,
        place = %latest.place,
        magnitude = latest.magnitude,
        delivered,
        "daily report sent"
    );
    Ok(())
}

/// Broadcast the fixed system-check alert with its Manila-area map.
pub async fn send_test_alert(config: &AppConfig, notify: &TelegramClient) {
    let delivered = notify
        .broadcast(
            &config.recipients,
            report::TEST_ALERT,
            Some(report::TEST_ALERT_COORDS),
        )
        .await;
    tracing::info!(delivered, "test alert sent");
}
