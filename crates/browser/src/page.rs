use html::{Node, document_title, is_html, parse_document};
use net::Response;
use url::Url;

/// A loaded document: the response that produced it plus its parsed DOM.
#[derive(Clone, Debug)]
pub struct Page {
    pub url: Url,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
    pub dom: Node,
}

impl Page {
    pub fn from_response(response: Response) -> Self {
        // Bodies without a content type are sniffed as HTML; anything else non-HTML gets an
        // empty document so form lookups simply find nothing.
        let dom = if response.content_type.is_none() || is_html(&response.content_type) {
            parse_document(&response.body)
        } else {
            parse_document("")
        };
        Self {
            url: response.url,
            status: response.status,
            content_type: response.content_type,
            body: response.body,
            dom,
        }
    }

    pub fn title(&self) -> Option<String> {
        document_title(&self.dom)
    }
}
