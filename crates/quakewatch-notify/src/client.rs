//! HTTP client for the Telegram Bot API.
//!
//! Wraps `reqwest` with bot-token URL construction and envelope checking:
//! every response is checked for a 2xx HTTP status and then for the Bot
//! API's `"ok"` field, so API-level failures surface as
//! [`NotifyError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::NotifyError;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Client for the Telegram Bot API.
///
/// Use [`TelegramClient::new`] for production or
/// [`TelegramClient::with_base_url`] to point at a mock server in tests.
pub struct TelegramClient {
    client: Client,
    send_message_url: Url,
    send_photo_url: Url,
}

impl TelegramClient {
    /// Creates a client pointed at the production Bot API.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, timeout_secs: u64) -> Result<Self, NotifyError> {
        Self::with_base_url(token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`NotifyError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("quakewatch/0.1 (earthquake-monitoring)")
            .build()?;

        // Normalise: the join below needs the base to end with exactly one
        // slash, or the last path segment would be replaced.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised)
            .map_err(|e| NotifyError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        let method_url = |endpoint: &str| {
            base.join(&format!("bot{token}/{endpoint}"))
                .map_err(|e| NotifyError::Api(format!("invalid bot token for URL: {e}")))
        };

        Ok(Self {
            client,
            send_message_url: method_url("sendMessage")?,
            send_photo_url: method_url("sendPhoto")?,
        })
    }

    /// Sends a Markdown text message to one chat.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::Http`] on network failure or a non-2xx HTTP status.
    /// - [`NotifyError::Api`] if the Bot API rejects the request.
    /// - [`NotifyError::Deserialize`] if the response is not valid JSON.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), NotifyError> {
        let params = [
            ("chat_id", chat_id),
            ("text", text),
            ("parse_mode", "Markdown"),
        ];
        self.post_form("sendMessage", &self.send_message_url, &params)
            .await
    }

    /// Sends a photo by URL to one chat.
    ///
    /// # Errors
    ///
    /// Same as [`TelegramClient::send_message`].
    pub async fn send_photo(&self, chat_id: &str, photo_url: &str) -> Result<(), NotifyError> {
        let params = [("chat_id", chat_id), ("photo", photo_url)];
        self.post_form("sendPhoto", &self.send_photo_url, &params)
            .await
    }

    /// Sends `text` to every recipient, with a static-map photo first when a
    /// location is given.
    ///
    /// Failures are logged per recipient and never abort delivery to the
    /// remaining recipients; a failed photo still lets the text go out.
    /// Returns the number of recipients that received the message.
    pub async fn broadcast(
        &self,
        recipients: &[String],
        text: &str,
        location: Option<(f64, f64)>,
    ) -> usize {
        let mut delivered = 0;
        for chat_id in recipients {
            if let Some((latitude, longitude)) = location {
                if let Err(e) = self
                    .send_photo(chat_id, &static_map_url(latitude, longitude))
                    .await
                {
                    tracing::warn!(chat_id = %chat_id, error = %e, "failed to send map photo");
                }
            }
            match self.send_message(chat_id, text).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(chat_id = %chat_id, error = %e, "failed to send message");
                }
            }
        }
        delivered
    }

    /// POSTs a form-encoded request and checks both the HTTP status and the
    /// Bot API envelope. `endpoint` is used for error context so the bot
    /// token never appears in error messages.
    async fn post_form(
        &self,
        endpoint: &str,
        url: &Url,
        params: &[(&str, &str)],
    ) -> Result<(), NotifyError> {
        let response = self.client.post(url.clone()).form(params).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let envelope: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| NotifyError::Deserialize {
                context: endpoint.to_string(),
                source: e,
            })?;

        Self::check_api_error(&envelope)
    }

    /// Checks the Bot API `"ok"` field and surfaces the description on
    /// failure.
    fn check_api_error(body: &serde_json::Value) -> Result<(), NotifyError> {
        if body.get("ok").and_then(serde_json::Value::as_bool) == Some(false) {
            let msg = body
                .get("description")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(NotifyError::Api(msg));
        }
        Ok(())
    }
}

/// Static-map image URL centred on the given coordinates.
#[must_use]
pub fn static_map_url(latitude: f64, longitude: f64) -> String {
    format!(
        "https://maps.googleapis.com/maps/api/staticmap?center={latitude},{longitude}&zoom=6&size=600x400&markers=color:red|{latitude},{longitude}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_map_url_embeds_coordinates_twice() {
        let url = static_map_url(11.2, 125.4);
        assert!(url.starts_with("https://maps.googleapis.com/maps/api/staticmap?center=11.2,125.4"));
        assert!(url.ends_with("markers=color:red|11.2,125.4"));
    }

    #[test]
    fn check_api_error_passes_ok_envelope() {
        let body = serde_json::json!({ "ok": true, "result": { "message_id": 1 } });
        assert!(TelegramClient::check_api_error(&body).is_ok());
    }

    #[test]
    fn check_api_error_surfaces_description() {
        let body = serde_json::json!({ "ok": false, "description": "Bad Request: chat not found" });
        let err = TelegramClient::check_api_error(&body).unwrap_err();
        assert!(matches!(err, NotifyError::Api(ref msg) if msg == "Bad Request: chat not found"));
    }
}
