//! Field kinds and their rendering behavior.

use serde_json::Value;

use crate::render::escape_html;
use crate::types::value_display;
use crate::utils::{date_input_value, format_date_ru};

use super::FieldSpec;

/// Closed set of field kinds the console can draw. Each kind knows how to
/// show a value in a table cell, how to draw its form control, and how to
/// turn a submitted string back into a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Textarea,
    Date,
    Number,
    Tel,
    Password,
    Select,
}

impl FieldType {
    /// Name used as the HTML input `type` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Date => "date",
            FieldType::Number => "number",
            FieldType::Tel => "tel",
            FieldType::Password => "password",
            FieldType::Select => "select",
        }
    }

    /// Table-cell text for a raw record value. Dates render as
    /// `dd.mm.yyyy`, missing and null values as a dash, and everything is
    /// HTML-escaped.
    pub fn render_display(&self, value: Option<&Value>) -> String {
        let text = value.and_then(value_display);
        let text = match (self, text) {
            (FieldType::Date, Some(raw)) => format_date_ru(&raw),
            (_, Some(raw)) => raw,
            (_, None) => "—".to_string(),
        };
        escape_html(&text)
    }

    /// Form control markup for this kind. `readonly` only takes effect when
    /// an existing record is being edited; creation forms leave every field
    /// writable.
    pub fn render_input(&self, field: &FieldSpec, value: &str, editing: bool) -> String {
        let required = if field.required { " required" } else { "" };
        let readonly = if field.readonly && editing { " readonly" } else { "" };

        match self {
            FieldType::Select => {
                let mut options = String::new();
                for option in field.options {
                    let selected = if *option == value { " selected" } else { "" };
                    options.push_str(&format!(
                        "<option value=\"{0}\"{1}>{0}</option>",
                        escape_html(option),
                        selected
                    ));
                }
                format!(
                    "<select name=\"{}\" class=\"select\"{}{}>{}</select>",
                    escape_html(field.key),
                    required,
                    readonly,
                    options
                )
            }
            FieldType::Textarea => format!(
                "<textarea name=\"{}\" class=\"textarea\" rows=\"3\"{}{}>{}</textarea>",
                escape_html(field.key),
                required,
                readonly,
                escape_html(value)
            ),
            _ => {
                let value = if *self == FieldType::Date {
                    date_input_value(value)
                } else {
                    value.to_string()
                };
                format!(
                    "<input type=\"{}\" name=\"{}\" class=\"input\" value=\"{}\"{}{}>",
                    self.as_str(),
                    escape_html(field.key),
                    escape_html(&value),
                    required,
                    readonly
                )
            }
        }
    }

    /// Submitted form string as a canonical JSON value. Number fields parse
    /// to JSON numbers; an empty or non-numeric entry becomes null so it can
    /// be dropped from payloads. All other kinds stay strings.
    pub fn parse_input_value(&self, raw: &str) -> Value {
        match self {
            FieldType::Number => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Value::Null;
                }
                if let Ok(n) = trimmed.parse::<i64>() {
                    return Value::from(n);
                }
                match trimmed.parse::<f64>() {
                    Ok(f) => serde_json::Number::from_f64(f)
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                    Err(_) => Value::Null,
                }
            }
            _ => Value::String(raw.to_string()),
        }
    }
}
