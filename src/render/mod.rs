//! HTML rendering for the generic CRUD views.
//!
//! Renderers build markup as plain strings. Every interpolated value goes
//! through [`escape_html`] first; record content is untrusted.

pub mod form;
pub mod table;

pub use form::{FormOptions, render_form};
pub use table::render_table;

/// Escape text for interpolation into element content or a double-quoted
/// attribute.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Placeholder body shown in place of a tab that failed to render.
pub fn render_placeholder(text: &str) -> String {
    format!(
        "<div class=\"card card--inner\"><p class=\"muted\">{}</p></div>",
        escape_html(text)
    )
}
