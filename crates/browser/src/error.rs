use forms::{FormError, SubmitError};
use html::SelectorError;
use net::NetError;
use std::fmt;

#[derive(Debug)]
pub enum BrowserError {
    Net(NetError),
    /// A form `action` that cannot be resolved against the page URL.
    Url { action: String, source: url::ParseError },
    /// Called before any page was opened.
    NoPage,
    FormNotFound(String),
    Form(FormError),
    Selector(SelectorError),
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserError::Net(e) => write!(f, "{e}"),
            BrowserError::Url { action, source } => {
                write!(f, "cannot resolve form action '{action}': {source}")
            }
            BrowserError::NoPage => f.write_str("no page has been opened"),
            BrowserError::FormNotFound(selector) => {
                write!(f, "no form matches selector '{selector}'")
            }
            BrowserError::Form(e) => write!(f, "{e}"),
            BrowserError::Selector(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for BrowserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrowserError::Net(e) => Some(e),
            BrowserError::Url { source, .. } => Some(source),
            BrowserError::Form(e) => Some(e),
            BrowserError::Selector(e) => Some(e),
            BrowserError::NoPage | BrowserError::FormNotFound(_) => None,
        }
    }
}

impl From<NetError> for BrowserError {
    fn from(e: NetError) -> Self {
        BrowserError::Net(e)
    }
}

impl From<FormError> for BrowserError {
    fn from(e: FormError) -> Self {
        BrowserError::Form(e)
    }
}

impl From<SelectorError> for BrowserError {
    fn from(e: SelectorError) -> Self {
        BrowserError::Selector(e)
    }
}

/// Flattens the result of `Form::click`/`submit` against a [`crate::Browser`].
impl From<SubmitError<BrowserError>> for BrowserError {
    fn from(e: SubmitError<BrowserError>) -> Self {
        match e {
            SubmitError::Form(e) => BrowserError::Form(e),
            SubmitError::Submitter(e) => e,
        }
    }
}
