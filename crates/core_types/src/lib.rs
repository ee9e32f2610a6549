use std::fmt;

pub type RequestId = u64;

/// HTTP method a form submits with.
///
/// Anything other than a case-insensitive `post` falls back to `GET`, matching how browsers
/// treat missing or invalid `method` attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl Method {
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("post") => Method::Post,
            _ => Method::Get,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form encoding type (`enctype` attribute).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EncType {
    #[default]
    UrlEncoded,
    Multipart,
    TextPlain,
}

impl EncType {
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("multipart/form-data") => EncType::Multipart,
            Some(v) if v.eq_ignore_ascii_case("text/plain") => EncType::TextPlain,
            _ => EncType::UrlEncoded,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            EncType::UrlEncoded => "application/x-www-form-urlencoded",
            EncType::Multipart => "multipart/form-data",
            EncType::TextPlain => "text/plain",
        }
    }
}

impl fmt::Display for EncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}
