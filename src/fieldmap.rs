//! Reconciliation between the two backend key-naming conventions.
//!
//! Depending on the endpoint, the backend spells record fields either
//! snake_case (`request_id`) or flattened lowercase (`requestid`). One alias
//! table per table entity, derived from its schema, feeds exactly two
//! boundary functions: [`canonicalize_record`] on every inbound record and
//! [`denormalize_payload`] on every outbound payload. Internal code only
//! ever sees the snake_case names.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::schema::{self, EntityKind};
use crate::types::Record;

/// `(snake_case, flattened)` key pairs per table entity.
static ALIASES: Lazy<HashMap<&'static str, Vec<(&'static str, String)>>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for entity in schema::entities() {
        if let EntityKind::Table { fields, .. } = &entity.kind {
            let pairs = fields
                .iter()
                .map(|field| (field.key, field.key.replace('_', "")))
                .collect();
            map.insert(entity.key, pairs);
        }
    }
    map
});

fn alias_pairs(entity_key: &str) -> &'static [(&'static str, String)] {
    ALIASES
        .get(entity_key)
        .map(|pairs| pairs.as_slice())
        .unwrap_or(&[])
}

/// Null values count as absent so the other spelling can still win.
fn non_null<'a>(value: Option<&'a Value>) -> Option<&'a Value> {
    value.filter(|v| !v.is_null())
}

/// Inbound record to canonical snake_case keys. The flattened spelling wins
/// when both are present, keys outside the entity schema are dropped, and a
/// field missing under both spellings stays absent.
pub fn canonicalize_record(entity_key: &str, raw: &Record) -> Record {
    let mut canonical = Record::new();
    for (snake, flat) in alias_pairs(entity_key) {
        let value = non_null(raw.get(flat.as_str())).or_else(|| non_null(raw.get(*snake)));
        if let Some(value) = value {
            canonical.insert((*snake).to_string(), value.clone());
        }
    }
    canonical
}

/// Outbound payload keyed snake_case only. The snake_case spelling wins when
/// both are present; fields absent under both spellings are omitted rather
/// than sent as null.
pub fn denormalize_payload(entity_key: &str, record: &Record) -> Record {
    let mut payload = Record::new();
    for (snake, flat) in alias_pairs(entity_key) {
        let value = non_null(record.get(*snake)).or_else(|| non_null(record.get(flat.as_str())));
        if let Some(value) = value {
            payload.insert((*snake).to_string(), value.clone());
        }
    }
    payload
}
