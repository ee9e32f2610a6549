use crate::error::FormError;
use core_types::{EncType, Method};
use std::convert::Infallible;
use std::fmt;

/// Everything needed to perform one form submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub method: Method,
    /// `action` exactly as declared; resolving it against the page URL is the submitter's job.
    pub action: String,
    pub enctype: EncType,
    /// The form data set: fields in document order, then the clicked button (if any).
    pub pairs: Vec<(String, String)>,
}

impl Submission {
    /// `application/x-www-form-urlencoded` serialization; repeated names repeat segments.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// `text/plain` serialization: one `name=value` line per pair, CRLF-terminated.
    pub fn encode_text_plain(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.pairs {
            out.push_str(name);
            out.push('=');
            out.push_str(value);
            out.push_str("\r\n");
        }
        out
    }
}

/// Performs the request for a built [`Submission`].
pub trait Submitter {
    type Error;

    fn submit(&mut self, submission: Submission) -> Result<(), Self::Error>;
}

/// In-memory submitter that records every submission, for callers that only need the data
/// set (and for tests).
impl Submitter for Vec<Submission> {
    type Error = Infallible;

    fn submit(&mut self, submission: Submission) -> Result<(), Self::Error> {
        self.push(submission);
        Ok(())
    }
}

/// Failure of `click`/`click_by_value`/`submit`: either the form rejected the request before
/// anything was sent, or the submitter failed (its error is passed through untouched).
#[derive(Debug)]
pub enum SubmitError<E> {
    Form(FormError),
    Submitter(E),
}

impl<E> From<FormError> for SubmitError<E> {
    fn from(err: FormError) -> Self {
        SubmitError::Form(err)
    }
}

impl<E: fmt::Display> fmt::Display for SubmitError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Form(err) => write!(f, "{err}"),
            SubmitError::Submitter(err) => write!(f, "submission failed: {err}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for SubmitError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::Form(err) => Some(err),
            SubmitError::Submitter(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(pairs: &[(&str, &str)]) -> Submission {
        Submission {
            method: Method::Post,
            action: String::new(),
            enctype: EncType::UrlEncoded,
            pairs: pairs
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn encode_repeats_keys_and_escapes_reserved_characters() {
        let s = submission(&[
            ("count", "5"),
            ("count", "1"),
            ("q", "a b&c=d"),
            ("label", "Five & Six"),
            ("empty", ""),
        ]);
        assert_eq!(
            s.encode(),
            "count=5&count=1&q=a+b%26c%3Dd&label=Five+%26+Six&empty="
        );
    }

    #[test]
    fn encode_of_empty_data_set_is_empty() {
        assert_eq!(submission(&[]).encode(), "");
    }

    #[test]
    fn text_plain_uses_crlf_lines() {
        let s = submission(&[("a", "1"), ("b", "x y")]);
        assert_eq!(s.encode_text_plain(), "a=1\r\nb=x y\r\n");
    }

    #[test]
    fn vec_submitter_records_submissions() {
        let mut sent: Vec<Submission> = Vec::new();
        sent.submit(submission(&[("a", "1")])).unwrap();
        assert_eq!(sent.len(), 1);
    }
}
