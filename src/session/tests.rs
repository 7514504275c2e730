//! Session state machine tests against a scripted transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::*;
use crate::error_handling::TransportError;

const BASE: &str = "https://forum.example.com/";

fn logged_in_page(token: &str) -> String {
    format!(
        r#"<html id="XF" data-logged-in="true"><body>
        <form><input type="hidden" name="_xfToken" value="{token}"></form>
        </body></html>"#
    )
}

fn guest_page(token: &str) -> String {
    format!(
        r#"<html id="XF" data-logged-in="false"><body>
        <input type="hidden" name="_xfToken" value="{token}">
        </body></html>"#
    )
}

fn reply(status: u16, cookies: &[&str], body: &str) -> Result<TransportResponse, TransportError> {
    Ok(TransportResponse {
        status,
        url: BASE.to_string(),
        set_cookies: cookies.to_vec().into(),
        body: body.to_string(),
    })
}

/// Answers requests from a queue and records what it was asked.
#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    fn new(replies: Vec<Result<TransportResponse, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted reply".into())))
    }
}

fn session(replies: Vec<Result<TransportResponse, TransportError>>) -> Session<ScriptedTransport> {
    Session::with_transport(ClientOptions::new(BASE), ScriptedTransport::new(replies)).unwrap()
}

fn form_value<'a>(request: &'a TransportRequest, name: &str) -> Option<&'a str> {
    request
        .form
        .as_ref()?
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

#[test]
fn test_missing_base_url_fails_before_any_request() {
    let result = Session::with_transport(ClientOptions::new(""), ScriptedTransport::default());
    assert!(matches!(result, Err(InitializationError::MissingBaseUrl)));
}

#[tokio::test]
async fn test_login_replaces_cookies_on_see_other() {
    let mut session = session(vec![
        reply(200, &["xf_csrf=guest; path=/"], &guest_page("guest-token")),
        reply(
            303,
            &["xf_user=1%2Cabc; path=/; httponly", "xf_session=s1; path=/"],
            "",
        ),
    ]);
    session.set_cookies(vec!["stale=1"].into());

    let cookies = session.login("alice", "secret").await.unwrap();

    assert_eq!(cookies.len(), 2);
    assert!(cookies.contains("xf_user"));
    assert!(!cookies.contains("stale"));
    assert_eq!(session.cookies(), &cookies);

    let requests = session.transport().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, Method::Get);
    assert!(requests[0].follow_redirects);

    let login = &requests[1];
    assert_eq!(login.method, Method::Post);
    assert!(!login.follow_redirects);
    assert_eq!(
        login.url.as_str(),
        "https://forum.example.com/index.php?login/login/"
    );
    assert_eq!(login.cookie.as_deref(), Some("xf_csrf=guest"));
    assert_eq!(form_value(login, "login"), Some("alice"));
    assert_eq!(form_value(login, "password"), Some("secret"));
    assert_eq!(form_value(login, "remember"), Some("1"));
    assert_eq!(form_value(login, "_xfToken"), Some("guest-token"));
}

#[tokio::test]
async fn test_login_failure_leaves_cookies_unchanged() {
    let mut session = session(vec![
        reply(200, &["xf_csrf=guest"], &guest_page("t")),
        reply(200, &["xf_session=other"], "<html>Incorrect password</html>"),
    ]);
    session.set_cookies(vec!["xf_user=keep"].into());

    let err = session.login("alice", "wrong").await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::AuthenticationFailure { status: 200 }
    ));
    assert_eq!(session.cookies().iter().collect::<Vec<_>>(), vec!["xf_user=keep"]);
}

#[tokio::test]
async fn test_login_front_page_error_is_unexpected_status() {
    let mut session = session(vec![reply(503, &[], "maintenance")]);
    let err = session.login("alice", "secret").await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::UnexpectedStatus { status: 503, .. }
    ));
    assert_eq!(session.transport().requests().len(), 1);
}

#[tokio::test]
async fn test_login_json_serializes_cookie_array() {
    let mut session = session(vec![
        reply(200, &[], &guest_page("t")),
        reply(303, &["xf_user=1"], ""),
    ]);
    let json = session.login_json("alice", "secret").await.unwrap();
    assert_eq!(json, r#"["xf_user=1"]"#);
}

#[tokio::test]
async fn test_check_login_merges_cookies_and_stores_token() {
    let mut session = session(vec![
        reply(400, &["xf_csrf=fresh; path=/"], "bad request"),
        reply(200, &[], &logged_in_page("tok-123")),
    ]);
    let supplied: CookieSet = vec!["xf_user=1", "xf_csrf=old"].into();

    let authenticated = session.check_login(Some(supplied)).await.unwrap();

    let merged: Vec<&str> = authenticated.cookies.iter().collect();
    assert_eq!(merged, vec!["xf_user=1", "xf_csrf=fresh; path=/"]);
    assert_eq!(session.cookies(), &authenticated.cookies);
    assert_eq!(session.token(), Some("tok-123"));
    assert_eq!(authenticated.response.status, 200);

    let requests = session.transport().requests();
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].cookie, None);
    assert_eq!(requests[1].method, Method::Get);
    assert_eq!(
        requests[1].cookie.as_deref(),
        Some("xf_user=1; xf_csrf=fresh")
    );
}

#[tokio::test]
async fn test_check_login_uses_stored_cookies_when_none_supplied() {
    let mut session = session(vec![
        reply(200, &[], ""),
        reply(200, &[], &logged_in_page("t")),
    ]);
    session.set_cookies(vec!["xf_user=stored"].into());

    session.check_login(None).await.unwrap();

    let requests = session.transport().requests();
    assert_eq!(requests[1].cookie.as_deref(), Some("xf_user=stored"));
}

#[tokio::test]
async fn test_check_login_rejected_leaves_draft_empty() {
    let mut session = session(vec![
        reply(400, &[], ""),
        reply(200, &[], &guest_page("guest-token")),
    ]);
    session.with_draft_field("stale", "value");

    let err = session.check_login(Some(vec!["xf_user=expired"].into())).await.unwrap_err();

    assert!(err.is_not_authenticated());
    match err {
        SessionError::NotAuthenticated(details) => {
            assert_eq!(details.code, "NOTAUTHENTICATED");
            assert_eq!(details.errno, -3010);
            assert_eq!(details.host.as_deref(), Some("forum.example.com"));
            assert_eq!(details.status, 200);
            assert_eq!(details.response.body, guest_page("guest-token"));
            assert!(details.response.body.contains(r#"data-logged-in="false""#));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(session.draft().is_empty());
    assert_eq!(session.token(), None);
}

#[tokio::test]
async fn test_check_login_refresh_above_400_is_unexpected_status() {
    let mut session = session(vec![reply(401, &[], "")]);
    let err = session.check_login(None).await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::UnexpectedStatus { status: 401, .. }
    ));
    assert_eq!(session.transport().requests().len(), 1);
}

#[tokio::test]
async fn test_check_login_propagates_transport_error() {
    let mut session = session(vec![Err(TransportError::Other("connection reset".into()))]);
    let err = session.check_login(None).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_post_accepts_only_see_other() {
    let session = session(vec![reply(302, &[], ""), reply(303, &[], "")]);
    let fields = FormDraft::new().with("message", "hi");

    let err = session
        .post("index.php?threads/1/add-reply", &fields, "replied")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::UnexpectedStatus { status: 302, .. }
    ));

    let ok = session
        .post("index.php?threads/1/add-reply", &fields, "replied")
        .await
        .unwrap();
    assert_eq!(ok.status, 303);
}

#[tokio::test]
async fn test_perform_overlays_draft_and_reports() {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    let options = ClientOptions::new(BASE).verbose(move |message| {
        sink.lock().unwrap().push(message.to_string());
    });
    let transport = ScriptedTransport::new(vec![
        reply(400, &["xf_csrf=c"], ""),
        reply(200, &[], &logged_in_page("tok")),
        reply(303, &[], ""),
    ]);
    let mut session = Session::with_transport(options, transport).unwrap();

    session.check_login(Some(vec!["xf_user=1"].into())).await.unwrap();
    session.perform(&Action::react("5", "1001")).await.unwrap();

    let requests = session.transport().requests();
    let post = &requests[2];
    assert_eq!(
        post.url.as_str(),
        "https://forum.example.com/index.php?posts/1001/react"
    );
    assert!(!post.follow_redirects);
    assert_eq!(post.cookie.as_deref(), Some("xf_user=1; xf_csrf=c"));
    assert_eq!(form_value(post, "_xfToken"), Some("tok"));
    assert_eq!(form_value(post, "reaction_id"), Some("5"));

    // Action fields never leak into the draft.
    assert_eq!(session.draft().len(), 1);
    assert_eq!(
        *messages.lock().unwrap(),
        vec![
            "[!] check login: true".to_string(),
            "[!] reacted on post: 1001".to_string()
        ]
    );
}

#[tokio::test]
async fn test_get_follows_redirects_with_cookies() {
    let session = {
        let mut session = session(vec![reply(200, &[], "<html></html>")]);
        session.set_cookies(vec!["xf_user=1; path=/"].into());
        session
    };
    let response = session.get("/index.php?threads/1/").await.unwrap();
    assert_eq!(response.status, 200);

    let requests = session.transport().requests();
    assert!(requests[0].follow_redirects);
    assert_eq!(requests[0].form, None);
    assert_eq!(requests[0].cookie.as_deref(), Some("xf_user=1"));
    assert_eq!(
        requests[0].url.as_str(),
        "https://forum.example.com/index.php?threads/1/"
    );
}

#[tokio::test]
async fn test_anonymous_session_sends_no_cookie_header() {
    let session = session(vec![reply(404, &[], "")]);
    let err = session.get("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(session.transport().requests()[0].cookie, None);
}

#[tokio::test]
async fn test_foreign_origin_never_receives_cookies() {
    let mut session = session(vec![reply(200, &[], ""), reply(303, &[], "")]);
    session.set_cookies(vec!["xf_user=secret"].into());

    for path in [
        "https://evil.example/steal",
        "http://forum.example.com/",
        "https://forum.example.com:8443/",
    ] {
        let err = session.get(path).await.unwrap_err();
        assert!(
            matches!(&err, SessionError::InvalidUrl { path: rejected, .. } if rejected == path),
            "{path} was not rejected: {err:?}"
        );
    }
    let err = session
        .post("https://evil.example/steal", &FormDraft::new(), "posted")
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::InvalidUrl { .. }));
    assert!(session.transport().requests().is_empty());
}

#[tokio::test]
async fn test_absolute_url_on_forum_origin_is_allowed() {
    let mut session = session(vec![reply(200, &[], "ok")]);
    session.set_cookies(vec!["xf_user=1"].into());

    session
        .get("https://forum.example.com/index.php?threads/1/")
        .await
        .unwrap();

    let requests = session.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].cookie.as_deref(), Some("xf_user=1"));
}

#[tokio::test]
async fn test_every_verbosity_message_has_the_same_prefix() {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    let options = ClientOptions::new(BASE).verbose(move |message| {
        sink.lock().unwrap().push(message.to_string());
    });
    let transport = ScriptedTransport::new(vec![
        reply(200, &[], &guest_page("g")),
        reply(303, &["xf_user=1"], ""),
        reply(400, &[], ""),
        reply(200, &[], &logged_in_page("tok")),
        reply(303, &[], ""),
        reply(303, &[], ""),
    ]);
    let mut session = Session::with_transport(options, transport).unwrap();

    session.login("alice", "secret").await.unwrap();
    session.check_login(None).await.unwrap();
    session
        .perform(&Action::Signature {
            signature: "sig".into(),
        })
        .await
        .unwrap();
    session
        .post("index.php?account/signature", &FormDraft::new(), "custom write")
        .await
        .unwrap();

    assert_eq!(
        *messages.lock().unwrap(),
        vec![
            "[!] successfully logged in.".to_string(),
            "[!] check login: true".to_string(),
            "[!] signature edited".to_string(),
            "[!] custom write".to_string(),
        ]
    );
}
