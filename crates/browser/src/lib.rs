//! A headless, blocking browser: fetch a page, find its forms, fill them in and submit them.
//!
//! ```no_run
//! use browser::{Browser, BrowserConfig, BrowserError};
//!
//! fn search() -> Result<(), BrowserError> {
//!     let mut bow = Browser::new(BrowserConfig::default())?;
//!     bow.open("https://example.com/search")?;
//!     let mut form = bow.form("form[name=search]")?;
//!     form.input("q", "rust")?;
//!     form.click(&mut bow, "go")?;
//!     println!("{}", bow.body());
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod history;
mod page;

pub use config::BrowserConfig;
pub use error::BrowserError;
pub use history::History;
pub use page::Page;

use core_types::{EncType, Method, RequestId};
use forms::{Form, Submission, Submitter};
use html::{Node, Selector};
use net::{Body, HttpTransport, Request, Transport};
use url::Url;

pub struct Browser<T: Transport = HttpTransport> {
    transport: T,
    page: Option<Page>,
    history: History,
    next_request: RequestId,
}

impl Browser<HttpTransport> {
    /// A browser talking HTTP(S) through a blocking client built from `config.client`.
    pub fn new(config: BrowserConfig) -> Result<Self, BrowserError> {
        let transport = HttpTransport::new(&config.client)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> Browser<T> {
    pub fn with_transport(transport: T, config: BrowserConfig) -> Self {
        Self {
            transport,
            page: None,
            history: History::new(config.max_history),
            next_request: 0,
        }
    }

    /// Fetch `url` and make it the current page. Relative URLs resolve against the current
    /// page.
    pub fn open(&mut self, url: &str) -> Result<(), BrowserError> {
        let url = match &self.page {
            Some(page) => page.url.join(url.trim()).map_err(|source| BrowserError::Url {
                action: url.to_string(),
                source,
            })?,
            None => net::parse_url(url)?,
        };
        let request = Request::get(self.next_id(), url);
        self.navigate(request)
    }

    /// Go back to the previous page without refetching it. Returns `false` at the start of
    /// history.
    pub fn back(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        log::debug!(target: "browser", "back to {}", previous.url);
        self.page = Some(previous);
        true
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn url(&self) -> Option<&Url> {
        self.page.as_ref().map(|p| &p.url)
    }

    pub fn status(&self) -> Option<u16> {
        self.page.as_ref().map(|p| p.status)
    }

    /// Raw body of the current page; empty before the first `open`.
    pub fn body(&self) -> &str {
        self.page.as_ref().map_or("", |p| p.body.as_str())
    }

    pub fn title(&self) -> Option<String> {
        self.page.as_ref().and_then(Page::title)
    }

    pub fn dom(&self) -> Option<&Node> {
        self.page.as_ref().map(|p| &p.dom)
    }

    /// The first `<form>` on the current page matching `selector`.
    pub fn form(&self, selector: &str) -> Result<Form, BrowserError> {
        let dom = self.dom().ok_or(BrowserError::NoPage)?;
        let node = Selector::parse(selector)?
            .select_all(dom)
            .into_iter()
            .find(|n| n.is_element("form"))
            .ok_or_else(|| BrowserError::FormNotFound(selector.to_string()))?;
        Form::from_node(node).map_err(|_| BrowserError::FormNotFound(selector.to_string()))
    }

    /// Every form on the current page, in document order.
    pub fn forms(&self) -> Vec<Form> {
        self.dom().map(forms::forms_in).unwrap_or_default()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn next_id(&mut self) -> RequestId {
        self.next_request = self.next_request.wrapping_add(1);
        self.next_request
    }

    fn navigate(&mut self, request: Request) -> Result<(), BrowserError> {
        let response = self.transport.send(request)?;
        log::debug!(
            target: "browser",
            "loaded {} ({}, {} bytes)",
            response.url,
            response.status,
            response.body.len()
        );
        let page = Page::from_response(response);
        if let Some(previous) = self.page.replace(page) {
            self.history.push(previous);
        }
        Ok(())
    }

    fn resolve_action(&self, action: &str) -> Result<Url, BrowserError> {
        let base = self.url().ok_or(BrowserError::NoPage)?;
        if action.is_empty() {
            return Ok(base.clone());
        }
        base.join(action).map_err(|source| BrowserError::Url {
            action: action.to_string(),
            source,
        })
    }
}

impl<T: Transport> Submitter for Browser<T> {
    type Error = BrowserError;

    fn submit(&mut self, submission: Submission) -> Result<(), Self::Error> {
        let mut url = self.resolve_action(&submission.action)?;
        let request = match submission.method {
            Method::Get => {
                url.set_query(Some(&submission.encode()));
                Request::get(self.next_id(), url)
            }
            Method::Post => {
                let body = match submission.enctype {
                    EncType::UrlEncoded => {
                        Body::encoded(EncType::UrlEncoded.mime(), submission.encode())
                    }
                    EncType::TextPlain => {
                        Body::encoded(EncType::TextPlain.mime(), submission.encode_text_plain())
                    }
                    EncType::Multipart => Body::Multipart(submission.pairs),
                };
                Request::post(self.next_id(), url, body)
            }
        };
        log::debug!(target: "browser", "submitting form: {} {}", request.method, request.url);
        self.navigate(request)
    }
}
