//! HTTP client for the repair-service backend.
//!
//! One wrapper around `reqwest` mirrors the backend contract: JSON bodies,
//! a bearer token read from the stored session when one exists, and error
//! normalization to the `error` field of the response body or `HTTP_{status}`.
//! Requests carry no timeout and are never retried; a call resolves or fails
//! and the caller reacts to whichever happens first.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{AdminError, Result};
use crate::storage::ClientStore;
use crate::types::{AuthenticatedUser, Record};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
    store: ClientStore,
}

/// Unwrap a list payload: `{"data": [...]}`, a bare array, or nothing at
/// all. Anything else reads as an empty list, and non-object entries are
/// skipped.
fn unwrap_list(data: Option<Value>) -> Vec<Record> {
    let items = match data {
        Some(Value::Object(mut envelope)) => match envelope.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect()
}

impl ApiClient {
    pub fn new(base: impl Into<String>, store: ClientStore) -> Self {
        Self {
            http: Client::new(),
            base: base.into(),
            store,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Join the base URL and a path, insensitive to slashes on either side.
    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// One backend round trip. Callers may override headers through
    /// `extra_headers`; the bearer token is attached automatically when a
    /// session is stored. `Ok(None)` means a success response with a body
    /// that was empty or not JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<Option<Value>> {
        let url = self.url_for(path);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(extra) = extra_headers {
            for (name, value) in extra.iter() {
                headers.insert(name, value.clone());
            }
        }
        if let Some(token) = self.store.token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                AdminError::Auth("stored token contains invalid characters".to_string())
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        debug!("{} {}", method, url);
        let mut request = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.body(serde_json::to_string(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let data: Option<Value> = serde_json::from_str(&response.text().await?).ok();

        if !status.is_success() {
            let message = data
                .as_ref()
                .and_then(|data| data.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP_{}", status.as_u16()));
            return Err(AdminError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(data)
    }

    /// Authenticate and persist the session. Backend field names map onto
    /// the canonical user shape: `user_id` becomes `id`, `full_name` the
    /// display name, `user_type` the role, `access_token` the token.
    pub async fn login(&self, login: &str, password: &str) -> Result<AuthenticatedUser> {
        let data = self
            .request(
                Method::POST,
                "/api/auth/login",
                Some(&json!({"login": login, "password": password})),
                None,
            )
            .await?
            .ok_or_else(|| AdminError::Auth("login response carried no body".to_string()))?;

        let text =
            |key: &str| data.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
        let user = AuthenticatedUser {
            id: data.get("user_id").and_then(Value::as_i64).unwrap_or_default(),
            login: text("login"),
            full_name: text("full_name"),
            role: text("user_type"),
            token: text("access_token"),
        };
        self.store.save_session(&user)?;
        Ok(user)
    }

    pub async fn fetch_requests(&self) -> Result<Vec<Record>> {
        let data = self.request(Method::GET, "/api/requests/", None, None).await?;
        Ok(unwrap_list(data))
    }

    pub async fn create_request(&self, payload: &Record) -> Result<Option<Value>> {
        self.request(
            Method::POST,
            "/api/requests/",
            Some(&Value::Object(payload.clone())),
            None,
        )
        .await
    }

    pub async fn update_request(&self, id: &str, payload: &Record) -> Result<Option<Value>> {
        self.request(
            Method::PUT,
            &format!("/api/requests/{id}"),
            Some(&Value::Object(payload.clone())),
            None,
        )
        .await
    }

    pub async fn delete_request(&self, id: &str) -> Result<Option<Value>> {
        self.request(Method::DELETE, &format!("/api/requests/{id}"), None, None)
            .await
    }

    pub async fn fetch_users(&self) -> Result<Vec<Record>> {
        let data = self.request(Method::GET, "/api/users", None, None).await?;
        Ok(unwrap_list(data))
    }

    /// Users with the specialist role, offered by the backend for
    /// assignment pickers.
    pub async fn fetch_specialists(&self) -> Result<Vec<Record>> {
        let data = self
            .request(Method::GET, "/api/users/specialists", None, None)
            .await?;
        Ok(unwrap_list(data))
    }

    pub async fn create_user(&self, payload: &Record) -> Result<Option<Value>> {
        self.request(
            Method::POST,
            "/api/users",
            Some(&Value::Object(payload.clone())),
            None,
        )
        .await
    }

    pub async fn update_user(&self, id: &str, payload: &Record) -> Result<Option<Value>> {
        self.request(
            Method::PUT,
            &format!("/api/users/{id}"),
            Some(&Value::Object(payload.clone())),
            None,
        )
        .await
    }
}
