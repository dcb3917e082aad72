//! Shared harness for console integration tests.
//!
//! Spawns two in-process axum servers per test: a mock repair-service
//! backend with its own in-memory data, and the console under test pointed
//! at it. Redirects are never followed so tests can assert on them.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::sync::Mutex;
use url::form_urlencoded;

use climadmin::{App, ClientStore, build_router};

pub const BACKEND_TOKEN: &str = "test-token-1";
pub const PASSWORD: &str = "secret";

pub struct BackendState {
    pub requests: Mutex<Vec<Value>>,
    pub users: Mutex<Vec<Value>>,
    next_id: AtomicI64,
}

type SharedBackend = Arc<BackendState>;

impl BackendState {
    pub fn empty() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(100),
        }
    }

    /// Two requests and two users, enough for every table and dashboard.
    pub fn seeded() -> Self {
        let mut state = Self::empty();
        *state.requests.get_mut() = vec![
            json!({
                "request_id": 1,
                "start_date": "2024-01-10",
                "climate_tech_type": "Кондиционер",
                "climate_tech_model": "Samsung AR09",
                "problem_description": "Не охлаждает",
                "request_status": "Новая заявка",
                "client_id": 42,
            }),
            json!({
                "request_id": 2,
                "start_date": "2024-01-05",
                "completion_date": "2024-01-07",
                "climate_tech_type": "Сплит-система",
                "climate_tech_model": "LG P09EP",
                "problem_description": "Шумит",
                "request_status": "Выполнена",
                "client_id": 42,
                "master_id": 7,
            }),
        ];
        *state.users.get_mut() = vec![
            json!({
                "user_id": 7,
                "full_name": "Мастер Иванов",
                "login": "ivanov",
                "phone": "+7 900 000-00-01",
                "user_type": "Специалист",
            }),
            json!({
                "user_id": 42,
                "full_name": "Оператор Первый",
                "login": "operator",
                "user_type": "Оператор",
            }),
        ];
        state
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {BACKEND_TOKEN}"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "UNAUTHORIZED"})),
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "NOT_FOUND"}))).into_response()
}

/// Fails with a plain-text body, the shape error normalization cannot parse.
async fn backend_broken() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded").into_response()
}

async fn backend_login(Json(body): Json<Value>) -> Response {
    let login = body.get("login").and_then(Value::as_str).unwrap_or_default();
    let password = body
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let known = match login {
        "operator" => Some((42, "Оператор Первый", "Оператор")),
        "manager" => Some((77, "Менеджер Смирнова", "Менеджер")),
        "quality" => Some((91, "Менеджер Качества", "Менеджер по качеству")),
        "customer" => Some((120, "Заказчик Петров", "Заказчик")),
        _ => None,
    };
    match known {
        Some((user_id, full_name, user_type)) if password == PASSWORD => Json(json!({
            "user_id": user_id,
            "login": login,
            "full_name": full_name,
            "user_type": user_type,
            "access_token": BACKEND_TOKEN,
        }))
        .into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "INVALID_CREDENTIALS"})),
        )
            .into_response(),
    }
}

async fn backend_list_requests(State(state): State<SharedBackend>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let requests = state.requests.lock().await.clone();
    Json(json!({"data": requests})).into_response()
}

async fn backend_create_request(
    State(state): State<SharedBackend>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    if let Some(record) = body.as_object_mut() {
        record.insert("request_id".to_string(), json!(id));
    }
    state.requests.lock().await.push(body.clone());
    Json(body).into_response()
}

async fn backend_update_request(
    State(state): State<SharedBackend>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut requests = state.requests.lock().await;
    let Some(existing) = requests
        .iter_mut()
        .find(|record| record.get("request_id").and_then(Value::as_i64) == Some(id))
    else {
        return not_found();
    };
    if let Some(record) = body.as_object_mut() {
        record.insert("request_id".to_string(), json!(id));
    }
    *existing = body.clone();
    Json(body).into_response()
}

async fn backend_delete_request(
    State(state): State<SharedBackend>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut requests = state.requests.lock().await;
    let before = requests.len();
    requests.retain(|record| record.get("request_id").and_then(Value::as_i64) != Some(id));
    if requests.len() == before {
        return not_found();
    }
    Json(json!({"deleted": id})).into_response()
}

async fn backend_list_users(State(state): State<SharedBackend>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let users = state.users.lock().await.clone();
    Json(json!({"data": users})).into_response()
}

// Served as a bare array on purpose; the client accepts both shapes.
async fn backend_list_specialists(
    State(state): State<SharedBackend>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let users = state.users.lock().await;
    let specialists: Vec<Value> = users
        .iter()
        .filter(|user| user.get("user_type").and_then(Value::as_str) == Some("Специалист"))
        .cloned()
        .collect();
    Json(specialists).into_response()
}

async fn backend_create_user(
    State(state): State<SharedBackend>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    if let Some(record) = body.as_object_mut() {
        record.insert("user_id".to_string(), json!(id));
    }
    state.users.lock().await.push(body.clone());
    Json(body).into_response()
}

async fn backend_update_user(
    State(state): State<SharedBackend>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut users = state.users.lock().await;
    let Some(existing) = users
        .iter_mut()
        .find(|record| record.get("user_id").and_then(Value::as_i64) == Some(id))
    else {
        return not_found();
    };
    if let Some(record) = body.as_object_mut() {
        record.insert("user_id".to_string(), json!(id));
    }
    *existing = body.clone();
    Json(body).into_response()
}

fn backend_router(state: SharedBackend) -> Router {
    Router::new()
        .route("/api/auth/login", post(backend_login))
        .route(
            "/api/requests/",
            get(backend_list_requests).post(backend_create_request),
        )
        .route(
            "/api/requests/:id",
            put(backend_update_request).delete(backend_delete_request),
        )
        .route(
            "/api/users",
            get(backend_list_users).post(backend_create_user),
        )
        .route("/api/users/specialists", get(backend_list_specialists))
        .route("/api/users/:id", put(backend_update_user))
        .route("/api/broken", get(backend_broken))
        .with_state(state)
}

pub async fn spawn_backend(state: SharedBackend) -> SocketAddr {
    let router = backend_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind backend");
    let addr = listener.local_addr().expect("backend addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve backend");
    });
    addr
}

/// The console under test plus the backend it talks to.
pub struct TestConsole {
    pub base: String,
    pub http: reqwest::Client,
    pub backend: SharedBackend,
    pub store: ClientStore,
    _data_dir: TempDir,
}

impl TestConsole {
    pub async fn start() -> Self {
        Self::start_with(BackendState::seeded()).await
    }

    pub async fn start_with(backend_state: BackendState) -> Self {
        let backend = Arc::new(backend_state);
        let backend_addr = spawn_backend(backend.clone()).await;

        let data_dir = TempDir::new().expect("data dir");
        let store = ClientStore::with_root(data_dir.path());
        let app = Arc::new(App::new(format!("http://{backend_addr}"), store.clone()));
        let router = build_router(app);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind console");
        let addr = listener.local_addr().expect("console addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve console");
        });

        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("http client");

        TestConsole {
            base: format!("http://{addr}"),
            http,
            backend,
            store,
            _data_dir: data_dir,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http
            .get(format!("{}{path}", self.base))
            .send()
            .await
            .expect("GET")
    }

    pub async fn get_text(&self, path: &str) -> String {
        self.get(path).await.text().await.expect("body")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.http
            .post(format!("{}{path}", self.base))
            .form(form)
            .send()
            .await
            .expect("POST")
    }

    pub async fn login(&self, login: &str, password: &str) -> reqwest::Response {
        self.post_form("/login", &[("login", login), ("password", password)])
            .await
    }

    pub async fn login_as(&self, login: &str) {
        let response = self.login(login, PASSWORD).await;
        assert_eq!(response.status(), 303, "login should redirect");
        assert_eq!(location(&response), "/");
    }
}

pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Percent-encode a toast the same way the console does for `?msg=`.
pub fn msg_query(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}
