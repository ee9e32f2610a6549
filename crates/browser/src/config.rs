use net::ClientConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserConfig {
    pub client: ClientConfig,
    /// Oldest pages are dropped once the back stack grows past this.
    pub max_history: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            max_history: 100,
        }
    }
}
