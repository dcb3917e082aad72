use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::AdminError;

/// One entity record with canonical snake_case keys.
pub type Record = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RequestStatus {
    #[default]
    #[serde(rename = "Новая заявка")]
    New,
    #[serde(rename = "В процессе ремонта")]
    InRepair,
    #[serde(rename = "Готова к выдаче")]
    ReadyForPickup,
    #[serde(rename = "Ожидание комплектующих")]
    AwaitingParts,
    #[serde(rename = "Выполнена")]
    Completed,
}

impl RequestStatus {
    /// Statuses counted as finished work on the dashboard.
    pub fn is_done(&self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::ReadyForPickup)
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, RequestStatus::InRepair)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::New => write!(f, "Новая заявка"),
            RequestStatus::InRepair => write!(f, "В процессе ремонта"),
            RequestStatus::ReadyForPickup => write!(f, "Готова к выдаче"),
            RequestStatus::AwaitingParts => write!(f, "Ожидание комплектующих"),
            RequestStatus::Completed => write!(f, "Выполнена"),
        }
    }
}

impl FromStr for RequestStatus {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Новая заявка" => Ok(RequestStatus::New),
            "В процессе ремонта" => Ok(RequestStatus::InRepair),
            "Готова к выдаче" => Ok(RequestStatus::ReadyForPickup),
            "Ожидание комплектующих" => Ok(RequestStatus::AwaitingParts),
            "Выполнена" => Ok(RequestStatus::Completed),
            _ => Err(AdminError::InvalidStatus(s.to_string())),
        }
    }
}

/// Status values offered by the request form, in display order.
pub const VALID_REQUEST_STATUSES: &[&str] = &[
    "Новая заявка",
    "В процессе ремонта",
    "Готова к выдаче",
    "Ожидание комплектующих",
    "Выполнена",
];

/// Session user as returned by the login endpoint, with backend field
/// names already mapped to the canonical client shape.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub login: String,
    #[serde(alias = "name")]
    pub full_name: String,
    #[serde(alias = "user_type")]
    pub role: String,
    pub token: String,
}

impl AuthenticatedUser {
    /// Name shown in the header bar.
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.login
        } else {
            &self.full_name
        }
    }
}

impl fmt::Debug for AuthenticatedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedUser")
            .field("id", &self.id)
            .field("login", &self.login)
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Text shown for a JSON value in the UI, `None` for null or structured
/// values the tables have no rendering for.
pub fn value_display(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        _ => None,
    }
}

/// Record field as display text.
pub fn field_display(record: &Record, key: &str) -> Option<String> {
    record.get(key).and_then(value_display)
}

/// Primary-key value of a record as a string, used for row lookup and
/// action URLs.
pub fn record_id(record: &Record, primary_key: &str) -> Option<String> {
    field_display(record, primary_key).filter(|id| !id.is_empty())
}
