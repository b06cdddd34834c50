use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub age: Option<u32>,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct Signup {
    pub username: Option<String>,
    pub password: Option<String>,
    pub age: Option<Value>,
    pub role: Option<String>,
}

pub type Db = Arc<RwLock<HashMap<String, User>>>;

pub const HTML_PAGE: &str = "<!DOCTYPE html>\n<html><body><h1>Not JSON</h1></body></html>\n";

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/html", get(html))
        .route("/cookies", get(cookies))
        .route("/bytes/{len}", get(bytes))
        .route("/signup", post(signup))
        .route("/users", get(list_users))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Reflect the method, content type and body back as JSON.
async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let parsed = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(Value::String(body))
    };
    Json(json!({
        "method": method.as_str(),
        "contentType": content_type,
        "body": parsed,
    }))
}

/// Reply with the requested status and its reason phrase as plain text.
async fn status(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) => (
            status,
            [(header::CONTENT_TYPE, "text/plain")],
            status.canonical_reason().unwrap_or("Unknown").to_string(),
        )
            .into_response(),
        Err(_) => (StatusCode::BAD_REQUEST, "invalid status code").into_response(),
    }
}

async fn html() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html")], HTML_PAGE)
}

async fn cookies() -> impl IntoResponse {
    (
        AppendHeaders([
            (header::SET_COOKIE, "session=abc"),
            (header::SET_COOKIE, "theme=dark"),
        ]),
        "ok",
    )
}

/// Plain-text body of exactly `len` bytes.
async fn bytes(Path(len): Path<usize>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "x".repeat(len))
}

async fn signup(
    State(db): State<Db>,
    Json(input): Json<Signup>,
) -> Result<(StatusCode, Json<User>), (StatusCode, Json<Value>)> {
    let (Some(username), Some(_password)) = (input.username, input.password) else {
        return Err(bad_request("username and password are required"));
    };
    let age = match input.age {
        None => None,
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(_) => return Err(bad_request("age must be a number")),
    };

    let mut users = db.write().await;
    if users.contains_key(&username) {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({ "error": "username already taken" })),
        ));
    }
    let user = User {
        username: username.clone(),
        age,
        role: input.role,
    };
    users.insert(username, user.clone());
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let users = db.read().await;
    let mut list: Vec<User> = users.values().cloned().collect();
    list.sort_by(|a, b| a.username.cmp(&b.username));
    Json(list)
}

fn bad_request(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}
