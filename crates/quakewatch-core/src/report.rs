//! Alert and daily-report message construction.
//!
//! Pure text building for the Telegram messages. Event times render both as
//! UTC and at the fixed UTC+8 reporting offset; distances render truncated
//! to whole kilometers.

use chrono::{DateTime, FixedOffset, Utc};

use crate::event::Event;
use crate::impact::ImpactEntry;
use crate::points::PRIORITY_CITY;

/// The reporting timezone, UTC+8. A constant offset, not a timezone-database
/// lookup.
const REPORTING_OFFSET_SECS: i32 = 8 * 3600;

/// Hour of the UTC+8 day at which the daily report goes out.
pub const DAILY_REPORT_HOUR: u32 = 8;

/// Sent as the daily report when the feed window contains no events.
pub const EMPTY_DAILY_REPORT: &str =
    "📅 *Daily Report:* No earthquakes recorded in the past 24 hours.";

/// Fixed system-check message for the `test` subcommand.
pub const TEST_ALERT: &str = "🧪 *Test Quake Alert* — This is a system check.";

/// Coordinates attached to the test alert (central Manila).
pub const TEST_ALERT_COORDS: (f64, f64) = (14.5995, 120.9842);

const SAFETY_REMINDER: &str = "⚠️ *QUICK REMINDER:*\n\
    • Stay calm, move to safety\n\
    • Avoid glass/walls/heavy items\n\
    • Turn off gas/electricity if needed\n\
    • Expect aftershocks — monitor updates\n";

/// The fixed UTC+8 reporting offset.
#[must_use]
pub fn reporting_offset() -> FixedOffset {
    FixedOffset::east_opt(REPORTING_OFFSET_SECS).expect("UTC+8 is a valid offset")
}

/// Render an event time as `UTC / UTC+8`, matching the alert layout.
fn time_line(time: DateTime<Utc>) -> String {
    let local = time.with_timezone(&reporting_offset());
    format!(
        "{} / {}",
        time.format("%Y-%m-%d %H:%M:%S UTC"),
        local.format("%Y-%m-%d %I:%M %p (PHT)")
    )
}

/// Truncate a distance toward zero for display.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_km(distance: f64) -> u64 {
    distance.max(0.0) as u64
}

/// One line per impact entry; the first (nearest) entry is the epicenter
/// zone and gets the warning marker, the priority city gets a star.
fn impact_lines(entries: &[ImpactEntry]) -> String {
    let zone = entries.first().map(|e| e.name);
    entries
        .iter()
        .map(|entry| {
            let marker = if Some(entry.name) == zone { "⚠️" } else { "🏙️" };
            let star = if entry.name == PRIORITY_CITY { "⭐" } else { "" };
            format!(
                "{marker} *{name}*{star}: ~{dist} km → {intensity}",
                name = entry.name,
                dist = whole_km(entry.distance_km),
                intensity = entry.intensity,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn epicenter_zone(entries: &[ImpactEntry]) -> String {
    entries.first().map_or_else(
        || "Unknown".to_string(),
        |zone| {
            format!(
                "{} ({} km, {})",
                zone.name,
                whole_km(zone.distance_km),
                zone.intensity
            )
        },
    )
}

/// Build the full alert message for a new event.
///
/// `entries` is the ranked impact list for the event's epicenter, as
/// produced by [`crate::impact::rank_impact`].
#[must_use]
pub fn format_alert(event: &Event, entries: &[ImpactEntry]) -> String {
    format!(
        "🌏 *EARTHQUAKE ALERT*\n\n\
         📍 *Location:* {place}\n\
         💥 *Magnitude:* {magnitude:.1}\n\
         🕒 *Time:* {time}\n\
         📌 *Epicenter Zone:* {zone}\n\n\
         🌐 *Estimated Intensities*\n{impact}\n\n\
         🗺 https://www.google.com/maps?q={lat},{lon}\n\n\
         {reminder}",
        place = event.place,
        magnitude = event.magnitude,
        time = time_line(event.time),
        zone = epicenter_zone(entries),
        impact = impact_lines(entries),
        lat = event.latitude,
        lon = event.longitude,
        reminder = SAFETY_REMINDER,
    )
}

/// Build the once-daily summary message around the feed's newest event.
#[must_use]
pub fn format_daily_report(event: &Event, entries: &[ImpactEntry]) -> String {
    format!(
        "📊 *Daily Quake Report*\n\n\
         🕒 {time}\n\
         📍 {place}\n\
         💥 Magnitude: {magnitude:.1}\n\n\
         ⚠️ *Epicenter Zone:* {zone}\n\n\
         🌐 *Estimated Intensities*\n{impact}\n\n\
         ✅ System Operational, Chief.",
        time = time_line(event.time),
        place = event.place,
        magnitude = event.magnitude,
        zone = epicenter_zone(entries),
        impact = impact_lines(entries),
    )
}
