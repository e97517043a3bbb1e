//! The polling loop: fetch, filter, dedup, alert, daily gate.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Timelike, Utc};

use quakewatch_core::{impact, points, report, AppConfig};
use quakewatch_feed::{FeedClient, FeedError};
use quakewatch_notify::TelegramClient;
use quakewatch_store::SeenStore;

/// Pause between consecutive alert broadcasts within one poll cycle.
const INTER_ALERT_DELAY: Duration = Duration::from_secs(1);

/// Loop-carried state, passed explicitly so the daily gate stays testable.
#[derive(Debug, Default)]
struct PollState {
    last_report_date: Option<NaiveDate>,
}

/// Run the monitor loop forever.
///
/// Every cycle fetches the feed, alerts on new in-region events, evaluates
/// the daily-report gate, and sleeps the configured interval. Nothing past
/// startup is fatal: cycle errors are logged and the loop continues.
pub async fn run(config: &AppConfig, feed: &FeedClient, notify: &TelegramClient) {
    let mut store = SeenStore::open(&config.seen_path);
    let mut state = PollState::default();

    tracing::info!(
        recipients = config.recipients.len(),
        min_magnitude = config.min_magnitude,
        interval_secs = config.poll_interval_secs,
        seen = store.len(),
        "quakewatch online; monitoring feed"
    );

    loop {
        match poll_once(config, feed, notify, &mut store).await {
            Ok(0) => {}
            Ok(sent) => tracing::info!(sent, "poll cycle complete"),
            Err(e) => tracing::error!(error = %e, "poll cycle failed"),
        }

        if let Some(date) = daily_report_due(Utc::now(), state.last_report_date) {
            if let Err(e) = crate::daily::send_daily_report(config, feed, notify).await {
                tracing::error!(error = %e, "daily report failed");
            }
            // One attempt per day, success or not.
            state.last_report_date = Some(date);
        }

        tokio::time::sleep(Duration::from_secs(config.poll_interval_secs)).await;
    }
}

/// One fetch-filter-notify pass. Returns the number of alerts sent.
async fn poll_once(
    config: &AppConfig,
    feed: &FeedClient,
    notify: &TelegramClient,
    store: &mut SeenStore,
) -> Result<usize, FeedError> {
    let events = feed.fetch().await?;
    let mut sent = 0;

    for event in &events {
        if event.magnitude < config.min_magnitude {
            continue;
        }
        if !points::in_monitored_region(event.latitude, event.longitude) {
            continue;
        }
        if store.contains(&event.id) {
            continue;
        }

        let entries = impact::rank_impact(
            event.latitude,
            event.longitude,
            event.magnitude,
            points::CITIES,
            points::PRIORITY_CITY,
            impact::DEFAULT_INCLUSION_RADIUS_KM,
        );
        let text = report::format_alert(event, &entries);
        let delivered = notify
            .broadcast(
                &config.recipients,
                &text,
                Some((event.latitude, event.longitude)),
            )
            .await;

        store.insert(event.id.clone());
        tracing::info!(
            id = %event.id,
            magnitude = event.magnitude,
            place = %event.place,
            delivered,
            "alert sent"
        );
        sent += 1;

        tokio::time::sleep(INTER_ALERT_DELAY).await;
    }

    Ok(sent)
}

/// Returns the UTC+8 calendar date to record when a daily report is due.
///
/// Due when the UTC+8 hour equals [`report::DAILY_REPORT_HOUR`] and no
/// report has been recorded for that UTC+8 date yet, so the report goes out
/// at most once per local day no matter how often the loop polls.
fn daily_report_due(now_utc: DateTime<Utc>, last_sent: Option<NaiveDate>) -> Option<NaiveDate> {
    let local = now_utc.with_timezone(&report::reporting_offset());
    let today = local.date_naive();
    (local.hour() == report::DAILY_REPORT_HOUR && last_sent != Some(today)).then_some(today)
}
