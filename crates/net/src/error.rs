use std::fmt;
use url::Url;

#[derive(Debug)]
pub enum NetError {
    /// The HTTP client could not be constructed.
    Client(reqwest::Error),
    Request { url: Url, source: reqwest::Error },
    Body { url: Url, source: std::io::Error },
    InvalidUrl { url: String, source: url::ParseError },
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::Client(e) => write!(f, "client build error: {e}"),
            NetError::Request { url, source } => write!(f, "request to {url} failed: {source}"),
            NetError::Body { url, source } => write!(f, "reading body of {url} failed: {source}"),
            NetError::InvalidUrl { url, source } => write!(f, "invalid url '{url}': {source}"),
        }
    }
}

impl std::error::Error for NetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NetError::Client(e) => Some(e),
            NetError::Request { source, .. } => Some(source),
            NetError::Body { source, .. } => Some(source),
            NetError::InvalidUrl { source, .. } => Some(source),
        }
    }
}
