//! Telegram Bot API client for alert delivery.

mod client;
mod error;

pub use client::{static_map_url, TelegramClient};
pub use error::NotifyError;
