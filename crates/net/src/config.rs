use std::time::Duration;

/// Settings for the HTTP client behind [`crate::HttpTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub user_agent: String,
    pub timeout: Duration,
    /// Response bodies are truncated to this many bytes.
    pub max_body_bytes: u64,
    pub max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: "Surfer/0.1".to_string(),
            timeout: Duration::from_secs(10),
            max_body_bytes: 4 * 1024 * 1024,
            max_redirects: 10,
        }
    }
}
