//! Generic table renderer for table entities.

use crate::schema::EntitySchema;
use crate::types::{Record, record_id};

use super::escape_html;

/// CSS width of the actions column.
const ACTIONS_WIDTH: &str = "140px";

fn encode_segment(raw: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(raw.as_bytes()).collect();
    encoded.replace('+', "%20")
}

fn js_single_quoted(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Render the list view of a table entity: heading, create button, and one
/// row per record with edit and (optionally) delete actions. Rows carry
/// their primary-key value in `data-id`; a record without one gets an edit
/// link back to the tab and a delete action that reports the missing id.
pub fn render_table(schema: &EntitySchema, records: &[Record], can_delete: bool) -> String {
    let columns: Vec<_> = schema.table_fields().collect();

    let mut head = String::new();
    for field in &columns {
        head.push_str(&format!(
            "<th scope=\"col\">{}</th>",
            escape_html(field.label)
        ));
    }
    head.push_str(&format!(
        "<th scope=\"col\" style=\"width: {ACTIONS_WIDTH};\">Действия</th>"
    ));

    let mut body = String::new();
    if records.is_empty() {
        body.push_str(&format!(
            "<tr><td class=\"empty\" colspan=\"{}\">Нет данных</td></tr>",
            columns.len() + 1
        ));
    } else {
        let primary_key = schema.primary_key().unwrap_or_default();
        for record in records {
            let id = record_id(record, primary_key);

            let mut row = String::new();
            row.push_str(&format!(
                "<tr data-id=\"{}\">",
                escape_html(id.as_deref().unwrap_or_default())
            ));
            for field in &columns {
                row.push_str(&format!(
                    "<td>{}</td>",
                    field.field_type.render_display(record.get(field.key))
                ));
            }

            let edit_href = match &id {
                Some(id) => format!("/tab/{}/edit/{}", schema.key, encode_segment(id)),
                None => format!("/tab/{}", schema.key),
            };
            row.push_str(&format!(
                "<td class=\"col-actions\"><a class=\"btn btn--ghost btn-edit\" \
                 href=\"{edit_href}\" title=\"Редактировать\">✏️</a>"
            ));
            if can_delete {
                let delete_action = match &id {
                    Some(id) => format!("/tab/{}/delete/{}", schema.key, encode_segment(id)),
                    None => format!("/tab/{}/delete", schema.key),
                };
                let confirm = format!(
                    "return confirm({})",
                    js_single_quoted(&format!(
                        "Удалить заявку #{}?",
                        id.as_deref().unwrap_or_default()
                    ))
                );
                row.push_str(&format!(
                    "<form class=\"inline\" method=\"post\" action=\"{}\" onsubmit=\"{}\">\
                     <button class=\"btn btn--ghost btn-del\" type=\"submit\" \
                     title=\"Удалить\">🗑️</button></form>",
                    delete_action,
                    escape_html(&confirm)
                ));
            }
            row.push_str("</td></tr>");
            body.push_str(&row);
        }
    }

    format!(
        "<div class=\"card card--inner\">\
         <div class=\"cardhead\">\
         <h2 class=\"h2\">{label}</h2>\
         <a class=\"btn btn--primary\" id=\"btnCreate\" href=\"/tab/{key}/new\">Создать</a>\
         </div>\
         <div class=\"tableWrap\">\
         <table class=\"table\" aria-label=\"{label}\">\
         <thead><tr>{head}</tr></thead>\
         <tbody>{body}</tbody>\
         </table>\
         </div>\
         </div>",
        label = escape_html(schema.label),
        key = schema.key,
        head = head,
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::entity;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_table_shows_placeholder_row() {
        let schema = entity("requests").unwrap();
        let html = render_table(schema, &[], true);
        // Five visible columns plus the actions column
        assert!(html.contains("colspan=\"6\">Нет данных"));
        assert!(html.contains("href=\"/tab/requests/new\">Создать</a>"));
    }

    #[test]
    fn test_rows_carry_id_and_actions() {
        let schema = entity("requests").unwrap();
        let rows = [record(json!({
            "request_id": 7,
            "start_date": "2024-01-15",
            "climate_tech_type": "Кондиционер",
            "climate_tech_model": "AUX-09",
            "request_status": "Новая заявка"
        }))];
        let html = render_table(schema, &rows, true);
        assert!(html.contains("data-id=\"7\""));
        assert!(html.contains("href=\"/tab/requests/edit/7\""));
        assert!(html.contains("action=\"/tab/requests/delete/7\""));
        assert!(html.contains("Удалить заявку #7?"));
    }

    #[test]
    fn test_date_cells_use_russian_format() {
        let schema = entity("requests").unwrap();
        let rows = [record(json!({"request_id": 1, "start_date": "2024-01-15"}))];
        let html = render_table(schema, &rows, false);
        assert!(html.contains("<td>15.01.2024</td>"));
    }

    #[test]
    fn test_missing_values_render_dash() {
        let schema = entity("users").unwrap();
        let rows = [record(json!({"user_id": 2, "full_name": "Анна К."}))];
        let html = render_table(schema, &rows, false);
        assert!(html.contains("<td>—</td>"));
    }

    #[test]
    fn test_record_content_is_escaped() {
        let schema = entity("requests").unwrap();
        let rows = [record(json!({
            "request_id": 1,
            "climate_tech_model": "<script>alert(1)</script>"
        }))];
        let html = render_table(schema, &rows, true);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_delete_action_is_optional() {
        let schema = entity("users").unwrap();
        let rows = [record(json!({"user_id": 2, "full_name": "Анна К."}))];
        let html = render_table(schema, &rows, false);
        assert!(html.contains("btn-edit"));
        assert!(!html.contains("btn-del"));
    }

    #[test]
    fn test_record_without_id_degrades() {
        let schema = entity("requests").unwrap();
        let rows = [record(json!({"climate_tech_model": "AUX-09"}))];
        let html = render_table(schema, &rows, true);
        assert!(html.contains("data-id=\"\""));
        // Edit falls back to the tab itself, delete reports the missing id
        assert!(html.contains("href=\"/tab/requests\""));
        assert!(html.contains("action=\"/tab/requests/delete\""));
    }

    #[test]
    fn test_header_follows_schema_order() {
        let schema = entity("requests").unwrap();
        let html = render_table(schema, &[], true);
        let date = html.find("<th scope=\"col\">Дата</th>").unwrap();
        let status = html.find("<th scope=\"col\">Статус</th>").unwrap();
        let actions = html.find("Действия").unwrap();
        assert!(date < status && status < actions);
        assert!(html.contains(&format!("width: {ACTIONS_WIDTH};")));
    }
}
