//! In-memory stand-in for an HTTP test server.
//!
//! `GET` returns the configured page; a request with a body gets that body echoed back as
//! `text/plain`, so tests can assert on exactly what a form sent.

use crate::{Body, NetError, Request, Response, Transport};
use std::io;

pub struct EchoServer {
    page: String,
    offline: bool,
    /// Every request received, oldest first.
    pub requests: Vec<Request>,
}

impl EchoServer {
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            offline: false,
            requests: Vec::new(),
        }
    }

    /// Make every following request fail as if the connection was refused.
    pub fn go_offline(&mut self) {
        self.offline = true;
    }

    pub fn last_request(&self) -> Option<&Request> {
        self.requests.last()
    }
}

impl Transport for EchoServer {
    fn send(&mut self, request: Request) -> Result<Response, NetError> {
        if self.offline {
            return Err(NetError::Body {
                url: request.url,
                source: io::Error::from(io::ErrorKind::ConnectionRefused),
            });
        }

        let (content_type, body) = match &request.body {
            None => ("text/html; charset=utf-8", self.page.clone()),
            Some(Body::Encoded { bytes, .. }) => (
                "text/plain; charset=utf-8",
                String::from_utf8_lossy(bytes).into_owned(),
            ),
            Some(Body::Multipart(parts)) => (
                "text/plain; charset=utf-8",
                url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(parts.iter())
                    .finish(),
            ),
        };

        let response = Response {
            id: request.id,
            url: request.url.clone(),
            requested_url: request.url.clone(),
            status: 200,
            content_type: Some(content_type.to_string()),
            body,
            duration_ms: 0,
        };
        self.requests.push(request);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_url;

    #[test]
    fn serves_the_page_and_echoes_bodies() {
        let url = parse_url("http://test.local/").unwrap();
        let mut server = EchoServer::new("<p>hi</p>");

        let page = server.send(Request::get(1, url.clone())).unwrap();
        assert_eq!(page.body, "<p>hi</p>");
        assert_eq!(page.content_type.as_deref(), Some("text/html; charset=utf-8"));

        let echoed = server
            .send(Request::post(
                2,
                url.clone(),
                Body::Multipart(vec![("a".into(), "1 2".into())]),
            ))
            .unwrap();
        assert_eq!(echoed.body, "a=1+2");
        assert_eq!(server.requests.len(), 2);

        server.go_offline();
        assert!(server.send(Request::get(3, url)).is_err());
        assert_eq!(server.requests.len(), 2);
    }
}
