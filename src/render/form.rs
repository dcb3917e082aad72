//! Generic form renderer for table entities.

use crate::schema::{EntitySchema, FieldType};
use crate::types::{Record, field_display};

use super::escape_html;

/// Presentation tweaks applied on top of the schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormOptions<'a> {
    /// Keys rendered but visually hidden.
    pub hidden: &'a [&'a str],
    /// Fallback values for fields the record leaves empty, used to prefill
    /// creation forms.
    pub prefill: &'a [(&'a str, &'a str)],
    /// An existing record is being edited; readonly fields lock.
    pub editing: bool,
}

/// Render the field grid of an entity form. Every schema field appears in
/// declaration order; `values` carries canonical snake_case keys.
pub fn render_form(schema: &EntitySchema, values: Option<&Record>, opts: &FormOptions) -> String {
    let mut fields_html = String::new();

    for field in schema.fields() {
        let value = values
            .and_then(|record| field_display(record, field.key))
            .or_else(|| {
                opts.prefill
                    .iter()
                    .find(|(key, _)| *key == field.key)
                    .map(|(_, value)| (*value).to_string())
            })
            .unwrap_or_default();

        let control = field.field_type.render_input(field, &value, opts.editing);

        let mut classes = String::from("field");
        if field.field_type == FieldType::Textarea {
            classes.push_str(" grid__full");
        }
        let style = if opts.hidden.contains(&field.key) {
            " style=\"display: none;\""
        } else {
            ""
        };

        fields_html.push_str(&format!(
            "<label class=\"{classes}\"{style}>\
             <span class=\"field__label\">{}</span>{control}</label>",
            escape_html(field.label)
        ));
    }

    format!("<div class=\"grid grid--2\" id=\"modalFields\">{fields_html}</div>")
}
