use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub recipients: Vec<String>,
    pub feed_url: String,
    pub min_magnitude: f64,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub seen_path: PathBuf,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bot_token", &"[redacted]")
            .field("recipients", &self.recipients.len())
            .field("feed_url", &self.feed_url)
            .field("min_magnitude", &self.min_magnitude)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("seen_path", &self.seen_path)
            .field("log_level", &self.log_level)
            .finish()
    }
}
