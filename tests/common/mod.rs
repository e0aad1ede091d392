#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use uuid::Uuid;

use jobboard_backend::AppState;

/// Bring up config, pool, migrations and the full router. Returns `None`
/// (skipping the test) when no database is configured.
pub async fn try_setup() -> Option<(Router, AppState)> {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL is not set; skipping integration test");
        return None;
    }

    std::env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "test_secret_key");
    }
    std::env::set_var(
        "UPLOADS_DIR",
        std::env::temp_dir().join(format!("jobboard-test-uploads-{}", std::process::id())),
    );
    std::env::set_var("PUBLIC_RPS", "10000");
    std::env::set_var("API_RPS", "10000");

    let _ = jobboard_backend::config::init_config();

    let pool = jobboard_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");

    let state = AppState::new(pool);
    let app = jobboard_backend::api_router(state.clone());
    Some((app, state))
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, Uuid::new_v4())
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 8 * 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}

/// Sign up through the API; returns (user id, token).
pub async fn signup(app: &Router, name: &str, email: &str, password: &str) -> (Uuid, String) {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/signup",
            None,
            Some(serde_json::json!({
                "name": name,
                "email": email,
                "password": password
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
    let id = Uuid::parse_str(body["user"]["id"].as_str().unwrap()).unwrap();
    let token = body["token"].as_str().unwrap().to_string();
    (id, token)
}

/// Sign up and promote through the service layer, then log in again so the
/// token is freshly issued for the new role.
pub async fn signup_with_role(
    app: &Router,
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> (Uuid, String) {
    let (id, _) = signup(app, name, email, password).await;
    state.user_service.set_role(id, role).await.expect("set role");
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    (id, body["token"].as_str().unwrap().to_string())
}

pub fn job_payload(company: &str, deadline: &str) -> JsonValue {
    serde_json::json!({
        "title": "Backend Engineer",
        "description": "Build and run the job board services",
        "jobType": "Full-time",
        "location": "Berlin",
        "salary": 85000,
        "deadline": deadline,
        "companyName": company
    })
}

/// Create a job through the API as the given manager; returns the job id.
pub async fn create_job(app: &Router, manager_token: &str, payload: JsonValue) -> Uuid {
    let (status, body) = send(
        app,
        json_request("POST", "/api/jobs", Some(manager_token), Some(payload)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "job create failed: {}", body);
    Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
}

const BOUNDARY: &str = "X-JOBBOARD-TEST-BOUNDARY";

/// Hand-rolled multipart body with a single `resume` file field.
pub fn multipart_resume(filename: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"resume\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    (
        format!("multipart/form-data; boundary={}", BOUNDARY),
        body,
    )
}

/// Multipart body with no file field at all.
pub fn multipart_empty() -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"note\"\r\n\r\n");
    body.extend_from_slice(b"no file attached");
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    (
        format!("multipart/form-data; boundary={}", BOUNDARY),
        body,
    )
}

pub fn apply_request(job_id: Uuid, token: &str, content_type: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/jobs/{}/apply", job_id))
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap()
}

pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.4 minimal test resume".to_vec()
}
