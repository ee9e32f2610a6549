mod config;
mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::ClientConfig;
pub use error::NetError;

use core_types::{Method, RequestId};
use std::io::Read;
use std::time::Instant;
use url::Url;

/// Request payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    /// Already-encoded bytes sent with the given `Content-Type`.
    Encoded { content_type: String, bytes: Vec<u8> },
    /// `multipart/form-data` with one text part per pair; the transport picks the boundary.
    Multipart(Vec<(String, String)>),
}

impl Body {
    pub fn encoded(content_type: &str, text: String) -> Self {
        Body::Encoded {
            content_type: content_type.to_string(),
            bytes: text.into_bytes(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub id: RequestId,
    pub method: Method,
    pub url: Url,
    pub body: Option<Body>,
}

impl Request {
    pub fn get(id: RequestId, url: Url) -> Self {
        Self {
            id,
            method: Method::Get,
            url,
            body: None,
        }
    }

    pub fn post(id: RequestId, url: Url, body: Body) -> Self {
        Self {
            id,
            method: Method::Post,
            url,
            body: Some(body),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Response {
    pub id: RequestId,
    /// Final URL after redirects.
    pub url: Url,
    pub requested_url: Url,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
    pub duration_ms: u128,
}

/// Anything that can carry a [`Request`] and hand back the whole [`Response`].
pub trait Transport {
    fn send(&mut self, request: Request) -> Result<Response, NetError>;
}

/// Blocking HTTP(S) transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    max_body_bytes: u64,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, NetError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(NetError::Client)?;
        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

impl Transport for HttpTransport {
    fn send(&mut self, request: Request) -> Result<Response, NetError> {
        let start = Instant::now();
        let Request {
            id,
            method,
            url: requested_url,
            body,
        } = request;
        log::debug!(target: "net", "req {id}: {method} {requested_url}");

        let mut builder = match method {
            Method::Get => self.client.get(requested_url.clone()),
            Method::Post => self.client.post(requested_url.clone()),
        };
        builder = match body {
            Some(Body::Encoded {
                content_type,
                bytes,
            }) => builder
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(bytes),
            Some(Body::Multipart(parts)) => {
                let form = parts
                    .into_iter()
                    .fold(reqwest::blocking::multipart::Form::new(), |form, (name, value)| {
                        form.text(name, value)
                    });
                builder.multipart(form)
            }
            None => builder,
        };

        let resp = builder.send().map_err(|source| NetError::Request {
            url: requested_url.clone(),
            source,
        })?;
        let status = resp.status().as_u16();
        let final_url = resp.url().clone();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let mut buf = Vec::new();
        resp.take(self.max_body_bytes)
            .read_to_end(&mut buf)
            .map_err(|source| NetError::Body {
                url: final_url.clone(),
                source,
            })?;
        if buf.len() as u64 == self.max_body_bytes {
            log::warn!(target: "net", "req {id}: body truncated at {} bytes", buf.len());
        }

        let duration_ms = start.elapsed().as_millis();
        log::debug!(
            target: "net",
            "req {id}: {status} {final_url} ({} bytes, {duration_ms} ms)",
            buf.len()
        );

        Ok(Response {
            id,
            url: final_url,
            requested_url,
            status,
            content_type,
            body: String::from_utf8_lossy(&buf).into_owned(),
            duration_ms,
        })
    }
}

/// Parse an absolute URL.
pub fn parse_url(input: &str) -> Result<Url, NetError> {
    Url::parse(input.trim()).map_err(|source| NetError::InvalidUrl {
        url: input.to_string(),
        source,
    })
}
