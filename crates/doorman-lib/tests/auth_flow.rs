// crates/doorman-lib/tests/auth_flow.rs

//! End-to-end auth flow tests driving the router directly.
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use doorman_lib::{
    config::Settings,
    router::create_router,
    store::{MemoryUserStore, UserStore},
    AppState,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn build_app() -> (Router, MemoryUserStore) {
    let settings = Settings::default();
    let users = MemoryUserStore::new();
    let state = Arc::new(AppState::new(users.clone(), &settings));
    (create_router(state), users)
}

fn form_post(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_post_with_cookie(path: &str, body: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn get_with_cookie(path: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// The `name=value` pair from the response's Set-Cookie header.
fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response sets a cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response is a redirect")
        .to_str()
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn signup_and_login(app: &Router, username: &str, password: &str) -> String {
    let body = format!("username={username}&password={password}");

    let res = app.clone().oneshot(form_post("/signup", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = app.clone().oneshot(form_post("/login", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    session_cookie(&res)
}

#[tokio::test]
async fn test_full_signup_login_logout_cycle() {
    let (app, users) = build_app();

    // signup stores the user and points at the login form
    let res = app
        .clone()
        .oneshot(form_post("/signup", "username=alice&password=Abcdef1!"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
    assert_eq!(users.len(), 1);

    // the stored record carries a hash, not the plaintext
    let stored = users.find_by_username("alice").await.unwrap();
    assert_ne!(stored.password_hash, "Abcdef1!");
    assert!(stored.password_hash.starts_with("$scrypt$"));

    // login establishes a session and redirects to the profile
    let res = app
        .clone()
        .oneshot(form_post("/login", "username=alice&password=Abcdef1!"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/profile");
    let cookie = session_cookie(&res);

    // the session opens the gated pages
    let res = app
        .clone()
        .oneshot(get_with_cookie("/private", &cookie))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .clone()
        .oneshot(get_with_cookie("/profile", &cookie))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("alice"));

    // logout destroys the session and goes home
    let res = app
        .clone()
        .oneshot(form_post_with_cookie("/logout", "", &cookie))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");

    // the old cookie no longer opens anything
    let res = app
        .clone()
        .oneshot(get_with_cookie("/private", &cookie))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
}

#[tokio::test]
async fn test_weak_password_never_stores_a_user() {
    let (app, users) = build_app();

    for password in [
        "abcdefg1!", // no uppercase
        "ABCDEFG1!", // no lowercase
        "Abcdefgh!", // no digit
        "Abcdefg1",  // no special character
        "Ab1!",      // too short
    ] {
        let body = format!("username=alice&password={password}");
        let res = app.clone().oneshot(form_post("/signup", &body)).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK, "password {password:?} not rejected");
        let text = body_text(res).await;
        assert!(text.contains("Invalid password"), "password {password:?} not flagged");
    }

    assert!(users.is_empty());
}

#[tokio::test]
async fn test_missing_fields_re_render_the_form() {
    let (app, users) = build_app();

    let res = app
        .clone()
        .oneshot(form_post("/signup", "username=alice"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("mandatory"));
    assert!(users.is_empty());

    let res = app
        .clone()
        .oneshot(form_post("/login", "password=Abcdef1!"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("mandatory"));
}

#[tokio::test]
async fn test_duplicate_username_stores_exactly_one_user() {
    let (app, users) = build_app();

    let res = app
        .clone()
        .oneshot(form_post("/signup", "username=alice&password=Abcdef1!"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = app
        .clone()
        .oneshot(form_post("/signup", "username=alice&password=Ghijkl2?"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("already exists"));
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_login_failures_create_no_session() {
    let (app, _users) = build_app();

    let res = app
        .clone()
        .oneshot(form_post("/signup", "username=alice&password=Abcdef1!"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    // unknown user
    let res = app
        .clone()
        .oneshot(form_post("/login", "username=bob&password=Abcdef1!"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(header::SET_COOKIE).is_none());
    assert!(body_text(res).await.contains("not found"));

    // wrong password for an existing user
    let res = app
        .clone()
        .oneshot(form_post("/login", "username=alice&password=Wrong99!x"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(header::SET_COOKIE).is_none());
    assert!(body_text(res).await.contains("Wrong password."));

    // the failed attempts did not open the gate
    let res = app.clone().oneshot(get("/private")).await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
}

#[tokio::test]
async fn test_guards_redirect_by_authentication_state() {
    let (app, _users) = build_app();

    // anonymous requests to gated pages go to the login form
    for path in ["/profile", "/main", "/private"] {
        let res = app.clone().oneshot(get(path)).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{path} not gated");
        assert_eq!(location(&res), "/login");
    }

    // a made-up cookie is not a session
    let res = app
        .clone()
        .oneshot(get_with_cookie("/private", "doorman_session=forged-token"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");

    // anonymous users see the forms and the home page
    for path in ["/", "/signup", "/login"] {
        let res = app.clone().oneshot(get(path)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{path} should render");
    }

    // authenticated users are bounced off the forms
    let cookie = signup_and_login(&app, "carol", "Abcdef1!").await;
    for path in ["/signup", "/login"] {
        let res = app.clone().oneshot(get_with_cookie(path, &cookie)).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{path} open while logged in");
        assert_eq!(location(&res), "/profile");
    }

    // gated pages render for the session holder
    let res = app.clone().oneshot(get_with_cookie("/main", &cookie)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_without_a_session_goes_home() {
    let (app, _users) = build_app();

    // no cookie at all
    let res = app
        .clone()
        .oneshot(form_post("/logout", ""))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");

    // stale cookie: already anonymous, not an error
    let res = app
        .clone()
        .oneshot(form_post_with_cookie("/logout", "", "doorman_session=stale-token"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
}

#[tokio::test]
async fn test_invalid_username_is_rejected_at_signup() {
    let (app, users) = build_app();

    let res = app
        .clone()
        .oneshot(form_post("/signup", "username=a&password=Abcdef1!"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("Invalid"));
    assert!(users.is_empty());
}
