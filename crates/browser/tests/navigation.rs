use browser::{Browser, BrowserConfig, BrowserError};
use forms::SubmitError;
use net::Body;
use net::test_support::EchoServer;

const PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Echo Form</title></head>
  <body>
    <form method="get" action="/search?stale=1" id="search" class="box wide">
      <input type="text" name="q" value="rust forms" />
      <input type="submit" name="go" value="Go" />
    </form>
    <form method="post" name="login">
      <input type="text" name="user" value="" />
      <input type="password" name="pass" value="" />
      <input type="submit" name="login" value="Log in" />
    </form>
    <form method="post" action="upload" enctype="multipart/form-data" name="upload">
      <input type="hidden" name="token" value="abc" />
      <button name="send" value="1">Send</button>
    </form>
    <form method="post" enctype="text/plain" name="plain">
      <input name="note" value="a b" />
    </form>
  </body>
</html>"#;

fn browser() -> Browser<EchoServer> {
    let mut bow = Browser::with_transport(EchoServer::new(PAGE), BrowserConfig::default());
    bow.open("http://test.local/forms").unwrap();
    bow
}

fn last_body(bow: &Browser<EchoServer>) -> Option<&Body> {
    bow.transport()
        .last_request()
        .and_then(|r| r.body.as_ref())
}

#[test]
fn open_loads_and_parses_the_page() {
    let bow = browser();
    assert_eq!(bow.url().map(|u| u.as_str()), Some("http://test.local/forms"));
    assert_eq!(bow.status(), Some(200));
    assert_eq!(bow.title().as_deref(), Some("Echo Form"));
    assert_eq!(bow.forms().len(), 4);
    assert_eq!(bow.history_len(), 0);
}

#[test]
fn form_lookup_by_selector() {
    let bow = browser();
    assert_eq!(bow.form("#search").unwrap().id(), Some("search"));
    assert_eq!(bow.form(".wide").unwrap().id(), Some("search"));
    assert_eq!(bow.form("[name='login']").unwrap().name(), Some("login"));
    assert_eq!(bow.form("form[name=upload]").unwrap().name(), Some("upload"));
    assert_eq!(bow.form("div, form").unwrap().id(), Some("search"));

    assert!(matches!(
        bow.form("[name='missing']"),
        Err(BrowserError::FormNotFound(s)) if s == "[name='missing']"
    ));
    assert!(matches!(bow.form("form > input"), Err(BrowserError::Selector(_))));
}

#[test]
fn form_before_open_is_an_error() {
    let bow = Browser::with_transport(EchoServer::new(PAGE), BrowserConfig::default());
    assert!(matches!(bow.form("form"), Err(BrowserError::NoPage)));
    assert!(bow.forms().is_empty());
    assert_eq!(bow.body(), "");
}

#[test]
fn post_submission_becomes_the_current_page() {
    let mut bow = browser();
    let mut form = bow.form("[name='login']").unwrap();
    form.input("user", "ada").unwrap();
    form.input("pass", "s3cret&more").unwrap();
    form.click(&mut bow, "login").unwrap();

    assert_eq!(bow.body(), "user=ada&pass=s3cret%26more&login=Log+in");
    assert_eq!(bow.url().map(|u| u.as_str()), Some("http://test.local/forms"));
    assert_eq!(
        last_body(&bow),
        Some(&Body::Encoded {
            content_type: "application/x-www-form-urlencoded".to_string(),
            bytes: b"user=ada&pass=s3cret%26more&login=Log+in".to_vec(),
        })
    );
    assert_eq!(bow.history_len(), 1);

    assert!(bow.back());
    assert_eq!(bow.title().as_deref(), Some("Echo Form"));
    assert!(!bow.back());
}

#[test]
fn get_submission_replaces_the_action_query() {
    let mut bow = browser();
    let form = bow.form("#search").unwrap();
    form.submit(&mut bow).unwrap();

    let request = bow.transport().last_request().unwrap();
    assert_eq!(
        request.url.as_str(),
        "http://test.local/search?q=rust+forms&go=Go"
    );
    assert!(request.body.is_none());
    assert_eq!(bow.title().as_deref(), Some("Echo Form"));
}

#[test]
fn multipart_and_text_plain_bodies() {
    let mut bow = browser();
    let upload = bow.form("[name=upload]").unwrap();
    upload.click(&mut bow, "send").unwrap();
    let request = bow.transport().last_request().unwrap();
    assert_eq!(request.url.as_str(), "http://test.local/upload");
    assert_eq!(
        request.body,
        Some(Body::Multipart(vec![
            ("token".to_string(), "abc".to_string()),
            ("send".to_string(), "1".to_string()),
        ]))
    );

    bow.back();
    let plain = bow.form("[name=plain]").unwrap();
    plain.submit(&mut bow).unwrap();
    assert_eq!(bow.body(), "note=a b\r\n");
}

#[test]
fn form_errors_send_nothing() {
    let mut bow = browser();
    let form = bow.form("[name='login']").unwrap();
    let err = form.click(&mut bow, "logout").unwrap_err();
    assert!(matches!(err, SubmitError::Form(_)));
    assert_eq!(bow.transport().requests.len(), 1);

    let flattened: BrowserError = err.into();
    assert_eq!(
        flattened.to_string(),
        "No button found with name 'logout'."
    );
}

#[test]
fn transport_failures_surface_unchanged() {
    let mut bow = browser();
    let form = bow.form("[name='login']").unwrap();
    bow.transport_mut().go_offline();

    match form.click(&mut bow, "login") {
        Err(SubmitError::Submitter(BrowserError::Net(_))) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(bow.title().as_deref(), Some("Echo Form"));
    assert_eq!(bow.history_len(), 0);
}

#[test]
fn open_resolves_relative_urls_against_the_current_page() {
    let mut bow = browser();
    bow.open("other?x=1").unwrap();
    assert_eq!(
        bow.url().map(|u| u.as_str()),
        Some("http://test.local/other?x=1")
    );
    assert_eq!(bow.history_len(), 1);

    let mut fresh = Browser::with_transport(EchoServer::new(PAGE), BrowserConfig::default());
    assert!(matches!(fresh.open("no scheme"), Err(BrowserError::Net(_))));
}

#[test]
fn history_is_capped() {
    let config = BrowserConfig {
        max_history: 2,
        ..BrowserConfig::default()
    };
    let mut bow = Browser::with_transport(EchoServer::new(PAGE), config);
    for path in ["/a", "/b", "/c", "/d"] {
        bow.open(&format!("http://test.local{path}")).unwrap();
    }
    assert_eq!(bow.history_len(), 2);
    assert!(bow.back());
    assert_eq!(bow.url().map(|u| u.path()), Some("/c"));
}
