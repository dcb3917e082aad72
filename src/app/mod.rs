//! Console controller: session state, per-tab data loading, and the save
//! and delete flows behind the web handlers.
//!
//! Tab content is produced from the entity registry. Table tabs fetch fresh
//! records on every visit; dashboard tabs reuse the in-memory request cache
//! when it is warm and fetch otherwise. Fetched requests are also written
//! through to the client store so a restarted console can draw dashboards
//! before the first backend round trip.

use std::collections::HashMap;

use serde_json::{Value, json};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::access::can_access;
use crate::api::ApiClient;
use crate::dashboard::{Dashboard, render_quality};
use crate::error::{AdminError, Result};
use crate::fieldmap::{canonicalize_record, denormalize_payload};
use crate::render::render_table;
use crate::schema::{EntitySchema, entities, entity};
use crate::storage::ClientStore;
use crate::types::{AuthenticatedUser, Record, record_id, value_display};

pub struct App {
    api: ApiClient,
    store: ClientStore,
    cache: RwLock<HashMap<&'static str, Vec<Record>>>,
}

/// Collect submitted form values into a canonical record, one entry per
/// schema field. Parsing follows the field type, so numeric fields arrive
/// as numbers and blank numerics as nulls.
pub fn form_to_record(schema: &EntitySchema, form: &HashMap<String, String>) -> Record {
    let mut record = Record::new();
    for field in schema.fields() {
        let raw = form.get(field.key).map(String::as_str).unwrap_or_default();
        record.insert(field.key.to_string(), field.field_type.parse_input_value(raw));
    }
    record
}

fn require_text(payload: &Record, key: &str, message: &str) -> Result<()> {
    let present = payload
        .get(key)
        .and_then(value_display)
        .is_some_and(|text| !text.trim().is_empty());
    if present {
        Ok(())
    } else {
        Err(AdminError::Validation(message.to_string()))
    }
}

/// Toast text for a failed operation.
pub fn notice_for(error: &AdminError) -> String {
    match error {
        AdminError::AccessDenied(_) => "Нет доступа".to_string(),
        AdminError::UnknownRenderer(_) => "Неизвестная вкладка".to_string(),
        AdminError::UnknownEntity(_) => "Неизвестная сущность".to_string(),
        AdminError::MissingId(_) => "Не найден ID заявки".to_string(),
        other => other.to_string(),
    }
}

/// Toast text for a failed operation, or `fallback` when the backend error
/// carried no text at all.
pub fn notice_or(error: &AdminError, fallback: &str) -> String {
    let notice = notice_for(error);
    if notice.trim().is_empty() {
        fallback.to_string()
    } else {
        notice
    }
}

/// Inline placeholder for a tab that failed to load.
pub fn failure_placeholder(error: &AdminError) -> &'static str {
    match error {
        AdminError::AccessDenied(_) => "Доступ запрещён",
        _ => "Ошибка загрузки",
    }
}

impl App {
    /// The persisted request cache, when present, seeds the in-memory one.
    pub fn new(api_base: impl Into<String>, store: ClientStore) -> Self {
        let mut cache = HashMap::new();
        let cached = store.load_cached_requests();
        if !cached.is_empty() {
            cache.insert("requests", cached);
        }
        Self {
            api: ApiClient::new(api_base, store.clone()),
            store,
            cache: RwLock::new(cache),
        }
    }

    pub fn session(&self) -> Option<AuthenticatedUser> {
        self.store.load_session()
    }

    pub fn current_role(&self) -> Option<String> {
        self.session()
            .map(|user| user.role)
            .filter(|role| !role.is_empty())
    }

    /// Tabs the current session may open, in registry order.
    pub fn visible_tabs(&self) -> Vec<&'static EntitySchema> {
        let role = self.current_role();
        entities()
            .iter()
            .filter(|schema| can_access(schema, role.as_deref()))
            .collect()
    }

    pub async fn login(&self, login: &str, password: &str) -> Result<AuthenticatedUser> {
        if login.is_empty() || password.is_empty() {
            return Err(AdminError::Validation("Введите логин и пароль".to_string()));
        }
        let user = self.api.login(login, password).await?;
        self.cache.write().await.clear();
        info!("signed in as {} ({})", user.login, user.role);
        Ok(user)
    }

    pub async fn logout(&self) {
        self.store.clear_session();
        self.cache.write().await.clear();
        info!("signed out");
    }

    pub async fn invalidate(&self, key: &str) {
        if self.cache.write().await.remove(key).is_some() {
            debug!("invalidated the '{key}' cache");
        }
    }

    /// Render the body of one tab. Access is re-checked here so a direct
    /// URL cannot reach a tab the session's role does not allow.
    pub async fn tab_content(&self, key: &str) -> Result<String> {
        let schema = entity(key).ok_or_else(|| AdminError::UnknownEntity(key.to_string()))?;
        let role = self.current_role();
        if !can_access(schema, role.as_deref()) {
            return Err(AdminError::AccessDenied(schema.label.to_string()));
        }

        if let Some(render_function) = schema.render_function() {
            let requests = self.cached_or_fetch_requests().await?;
            return match render_function {
                "renderStatistics" => Ok(Dashboard::new().render_statistics(&requests)),
                "renderQuality" => Ok(render_quality()),
                other => Err(AdminError::UnknownRenderer(other.to_string())),
            };
        }

        let records = match key {
            "requests" => self.fetch_requests_canonical().await?,
            "users" => self.fetch_users_canonical().await?,
            _ => Vec::new(),
        };
        let can_delete = key == "requests";
        Ok(render_table(schema, &records, can_delete))
    }

    /// Look up the record an edit URL points at, by primary key compared
    /// as text. Falls back to a fetch when the tab has not been loaded in
    /// this process yet.
    pub async fn edit_record(&self, key: &str, id: &str) -> Result<Record> {
        let schema = entity(key).ok_or_else(|| AdminError::UnknownEntity(key.to_string()))?;
        let pk = schema
            .primary_key()
            .ok_or_else(|| AdminError::MissingId(key.to_string()))?;

        let cached = match self.cache.read().await.get(key) {
            Some(records) => records.clone(),
            None => Vec::new(),
        };
        let records = if cached.is_empty() {
            match key {
                "requests" => self.fetch_requests_canonical().await?,
                "users" => self.fetch_users_canonical().await?,
                _ => Vec::new(),
            }
        } else {
            cached
        };

        records
            .into_iter()
            .find(|record| record_id(record, pk).as_deref() == Some(id))
            .ok_or_else(|| AdminError::Other("Запись не найдена".to_string()))
    }

    /// Persist a submitted form. Request payloads are normalized for the
    /// backend (blank values dropped, `client_id` taken from the session)
    /// and validated; user payloads go through as entered.
    pub async fn save_from_form(
        &self,
        key: &str,
        existing_id: Option<&str>,
        form: &HashMap<String, String>,
    ) -> Result<&'static str> {
        let schema = entity(key).ok_or_else(|| AdminError::UnknownEntity(key.to_string()))?;
        match key {
            "requests" => {
                let user = self
                    .session()
                    .ok_or_else(|| AdminError::Auth("no active session".to_string()))?;

                let record = form_to_record(schema, form);
                let mut payload = denormalize_payload(key, &record);
                payload.retain(|_, value| !matches!(value, Value::String(text) if text.is_empty()));
                payload.insert("client_id".to_string(), json!(user.id));

                require_text(&payload, "climate_tech_type", "Укажите тип техники")?;
                require_text(&payload, "climate_tech_model", "Укажите модель")?;
                require_text(&payload, "problem_description", "Опишите проблему")?;

                let message = if let Some(id) = existing_id {
                    self.api.update_request(id, &payload).await?;
                    "Заявка обновлена"
                } else {
                    payload.remove("request_id");
                    self.api.create_request(&payload).await?;
                    "Заявка создана"
                };
                self.invalidate(key).await;
                Ok(message)
            }
            "users" => {
                let payload = form_to_record(schema, form);
                let message = if let Some(id) = existing_id {
                    self.api.update_user(id, &payload).await?;
                    "Пользователь обновлён"
                } else {
                    self.api.create_user(&payload).await?;
                    "Пользователь создан"
                };
                self.invalidate(key).await;
                Ok(message)
            }
            _ => Err(AdminError::UnknownEntity(key.to_string())),
        }
    }

    /// Delete a record. Only repair requests support deletion; other keys
    /// are a quiet no-op, matching the table markup that only offers the
    /// button there.
    pub async fn delete_record(&self, key: &str, id: Option<&str>) -> Result<Option<&'static str>> {
        if key != "requests" {
            return Ok(None);
        }
        let id = id.ok_or_else(|| AdminError::MissingId(key.to_string()))?;
        self.api.delete_request(id).await?;
        self.invalidate(key).await;
        Ok(Some("Заявка удалена"))
    }

    async fn cached_or_fetch_requests(&self) -> Result<Vec<Record>> {
        if let Some(records) = self.cache.read().await.get("requests") {
            debug!("dashboard uses {} cached requests", records.len());
            return Ok(records.clone());
        }
        self.fetch_requests_canonical().await
    }

    async fn fetch_requests_canonical(&self) -> Result<Vec<Record>> {
        let raw = self.api.fetch_requests().await?;
        let records: Vec<Record> = raw
            .iter()
            .map(|record| canonicalize_record("requests", record))
            .collect();
        self.cache.write().await.insert("requests", records.clone());
        if let Err(error) = self.store.save_cached_requests(&records) {
            warn!("failed to persist the request cache: {error}");
        }
        Ok(records)
    }

    async fn fetch_users_canonical(&self) -> Result<Vec<Record>> {
        let raw = self.api.fetch_users().await?;
        let records: Vec<Record> = raw
            .iter()
            .map(|record| canonicalize_record("users", record))
            .collect();
        self.cache.write().await.insert("users", records.clone());
        Ok(records)
    }
}
