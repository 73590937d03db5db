use api::{auth::generate_jwt, build_app};
use axum::{body::Body, http::Request, response::Response};
use db::models::user::{Model as UserModel, Role};
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use std::convert::Infallible;
use tempfile::TempDir;
use tower::ServiceExt;
use tower::util::BoxCloneService;
use util::{config::AppConfig, state::AppState, test_helpers::setup_test_storage_root};

pub type TestApp = BoxCloneService<Request<Body>, Response, Infallible>;

pub const TEST_JWT_SECRET: &str = "thesis-portal-test-secret";

/// Fresh in-memory database, a temporary storage root and the full
/// application (including trailing-slash normalisation).
///
/// Keep the returned `TempDir` alive for the whole test.
pub async fn make_test_app() -> (TestApp, AppState, TempDir) {
    AppConfig::set_jwt_secret(TEST_JWT_SECRET);
    let tmp = setup_test_storage_root();

    let app_state = AppState::new(setup_test_db().await);
    let app = build_app(app_state.clone()).boxed_clone();

    (app, app_state, tmp)
}

pub async fn create_user(db: &DatabaseConnection, username: &str, role: Role) -> UserModel {
    UserModel::create(
        db,
        username,
        &format!("{username} name"),
        &format!("{username}@example.com"),
        "password123",
        role,
    )
    .await
    .expect("Failed to create user")
}

pub fn bearer(user: &UserModel) -> String {
    let (token, _) = generate_jwt(user.id, user.role);
    format!("Bearer {token}")
}

pub async fn get_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn json_request(method: &str, uri: &str, user: Option<&UserModel>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(user) = user {
        builder = builder.header("Authorization", bearer(user));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, user: Option<&UserModel>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("Authorization", bearer(user));
    }
    builder.body(Body::empty()).unwrap()
}

/// Hand-built `multipart/form-data` body: text parts then an optional file part.
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> (String, Vec<u8>) {
    let boundary = "----ThesisPortalBoundary".to_string();
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend(format!("--{}\r\n", boundary).as_bytes());
        body.extend(
            format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                name, value
            )
            .as_bytes(),
        );
    }

    if let Some((filename, content)) = file {
        body.extend(format!("--{}\r\n", boundary).as_bytes());
        body.extend(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend(content);
        body.extend(b"\r\n");
    }

    body.extend(format!("--{}--\r\n", boundary).as_bytes());
    (boundary, body)
}

pub fn multipart_request(uri: &str, user: &UserModel, boundary: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Authorization", bearer(user))
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Shorthand for `app.clone().oneshot(req)` returning the status and JSON body.
pub async fn send(app: &TestApp, req: Request<Body>) -> (axum::http::StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    (status, get_json_body(response).await)
}
