//! Programmatic web browsing centred on HTML forms.
//!
//! The workspace is split the way the pieces depend on each other: [`html`] parses documents,
//! [`forms`] models a form and builds its submission, [`net`] moves bytes and [`browser`] ties
//! them together behind a page/history model.

pub use browser::{Browser, BrowserConfig, BrowserError, History, Page};
pub use core_types::{EncType, Method};
pub use forms::{
    Button, Field, FieldCatalog, Form, FormError, ParseError, Select, SelectOption, SubmitError,
    Submission, SubmissionState, Submitter,
};
pub use net::{ClientConfig, HttpTransport, NetError, Transport};

pub use browser;
pub use forms;
pub use html;
pub use net;
