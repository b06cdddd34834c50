use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, User, HTML_PAGE};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reflects_json_body() {
    let resp = app()
        .oneshot(json_request("PATCH", "/echo", r#"{"age":21}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: Value = body_json(resp).await;
    assert_eq!(echoed["method"], "PATCH");
    assert_eq!(echoed["contentType"], "application/json");
    assert_eq!(echoed["body"]["age"], 21);
}

#[tokio::test]
async fn echo_without_body_reports_null() {
    let resp = app()
        .oneshot(Request::builder().uri("/echo").body(String::new()).unwrap())
        .await
        .unwrap();

    let echoed: Value = body_json(resp).await;
    assert_eq!(echoed["method"], "GET");
    assert!(echoed["body"].is_null());
    assert!(echoed["contentType"].is_null());
}

// --- status / html / cookies ---

#[tokio::test]
async fn status_returns_plain_reason() {
    let resp = app()
        .oneshot(Request::builder().uri("/status/500").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "text/plain");
    assert_eq!(&body_bytes(resp).await[..], b"Internal Server Error");
}

#[tokio::test]
async fn status_rejects_out_of_range_codes() {
    let resp = app()
        .oneshot(Request::builder().uri("/status/1000").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn html_is_served_as_text() {
    let resp = app()
        .oneshot(Request::builder().uri("/html").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "text/html");
    assert_eq!(&body_bytes(resp).await[..], HTML_PAGE.as_bytes());
}

#[tokio::test]
async fn cookies_sets_two_headers() {
    let resp = app()
        .oneshot(Request::builder().uri("/cookies").body(String::new()).unwrap())
        .await
        .unwrap();

    let cookies: Vec<_> = resp
        .headers()
        .get_all(http::header::SET_COOKIE)
        .iter()
        .collect();
    assert_eq!(cookies.len(), 2);
}

#[tokio::test]
async fn bytes_serves_exact_length() {
    let resp = app()
        .oneshot(Request::builder().uri("/bytes/1024").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await.len(), 1024);
}

// --- signup ---

#[tokio::test]
async fn signup_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/signup",
            r#"{"username":"Smith","password":"pw","age":21}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: User = body_json(resp).await;
    assert_eq!(user.username, "Smith");
    assert_eq!(user.age, Some(21));
}

#[tokio::test]
async fn signup_without_password_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/signup", r#"{"username":"Smith"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = body_json(resp).await;
    assert_eq!(err["error"], "username and password are required");
}

#[tokio::test]
async fn signup_with_text_age_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/signup",
            r#"{"username":"Smith","password":"pw","age":"twenty-one"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn signup_malformed_json_is_rejected() {
    let resp = app()
        .oneshot(json_request("POST", "/signup", "not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- signup lifecycle ---

#[tokio::test]
async fn signup_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/signup",
            r#"{"username":"Smith","password":"pw","role":"admin"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // same username again
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/signup",
            r#"{"username":"Smith","password":"other"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(Request::builder().uri("/users").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(
        users,
        vec![User {
            username: "Smith".to_string(),
            age: None,
            role: Some("admin".to_string()),
        }]
    );
}
