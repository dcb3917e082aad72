//! Page shells around the rendered tab content.
//!
//! Every response is a full document: header with the user bar, the tab
//! strip, one content region, and the toast element. The toast text rides
//! along as a `msg` query parameter across redirects and hides itself a
//! moment after the page loads.

use crate::render::escape_html;
use crate::schema::{APP_NAME, EntitySchema};
use crate::types::AuthenticatedUser;

const STYLES: &str = r#"
:root { color-scheme: dark; }
* { box-sizing: border-box; }
body {
  margin: 0; min-height: 100vh; background: #0b1f1a; color: #eafff6;
  font: 15px/1.5 "Segoe UI", system-ui, sans-serif;
}
.container { max-width: 1100px; margin: 0 auto; padding: 24px 16px 48px; }
.topbar { display: flex; align-items: center; justify-content: space-between; gap: 16px; margin-bottom: 20px; }
.h1 { font-size: 22px; margin: 0; }
.h2 { font-size: 18px; margin: 0 0 12px; }
.h3 { font-size: 15px; margin: 0 0 8px; }
.muted { color: #bfe8d8cc; }
.card { background: #10302a; border: 1px solid #1e5b46; border-radius: 12px; padding: 20px; }
.card--inner { background: #0d2823; margin-top: 16px; }
.cardhead { display: flex; align-items: center; justify-content: space-between; margin-bottom: 12px; }
.userbar { display: flex; align-items: center; gap: 12px; }
.tabs { display: flex; flex-wrap: wrap; gap: 8px; border-bottom: 1px solid #1e5b46; padding-bottom: 12px; }
.tab {
  display: inline-block; padding: 8px 14px; border-radius: 8px; border: 1px solid transparent;
  color: #bfe8d8cc; text-decoration: none; background: none; cursor: pointer;
}
.tab.is-active { color: #eafff6; border-color: #1e5b46; background: #0d2823; }
.btn {
  display: inline-block; border: 1px solid #1e5b46; border-radius: 8px; background: #0d2823;
  color: #eafff6; padding: 8px 14px; cursor: pointer; text-decoration: none; font: inherit;
}
.btn--primary { background: #10b981; border-color: #10b981; color: #06231c; font-weight: 600; }
.btn--ghost { border-color: transparent; background: none; }
.tableWrap { overflow-x: auto; }
.table { width: 100%; border-collapse: collapse; }
.table th, .table td { text-align: left; padding: 8px 10px; border-bottom: 1px solid #1e5b46; }
.table th { color: #bfe8d8cc; font-weight: 500; }
.table td.empty { text-align: center; color: #bfe8d8cc; padding: 24px 0; }
.col-actions form { display: inline; }
.grid { display: grid; gap: 14px; }
.grid--2 { grid-template-columns: repeat(2, minmax(0, 1fr)); }
.grid--3 { grid-template-columns: repeat(3, minmax(0, 1fr)); }
.grid__full { grid-column: 1 / -1; }
.field { display: flex; flex-direction: column; gap: 6px; }
.field__label { color: #bfe8d8cc; font-size: 13px; }
.input, .select, .textarea {
  background: #0b1f1a; color: #eafff6; border: 1px solid #1e5b46; border-radius: 8px;
  padding: 8px 10px; font: inherit;
}
.kpi-card { padding: 14px; }
.kpi__label { font-size: 13px; color: #bfe8d8cc; }
.kpi__flex { display: flex; align-items: center; justify-content: space-between; gap: 10px; }
.kpi__value { font-size: 26px; font-weight: 700; }
.kpi__chart { min-width: 100px; }
.kpi__hint { font-size: 12px; color: #bfe8d8cc; }
.alert { border: 1px solid #1e5b46; border-radius: 8px; padding: 12px; }
.alert--info { background: #0d2823; }
.qrBlock img { border-radius: 8px; background: #fff; padding: 8px; }
.formActions { display: flex; gap: 10px; margin-top: 16px; }
.toast {
  position: fixed; right: 20px; bottom: 20px; background: #10302a; border: 1px solid #30d6a0;
  border-radius: 10px; padding: 12px 16px; max-width: 340px; transition: opacity .3s;
}
@media (max-width: 720px) { .grid--2, .grid--3 { grid-template-columns: 1fr; } }
"#;

// Mirrors the client-side toast timing: visible for 2.6s, then a short fade.
const TOAST_SCRIPT: &str = r#"(function () {
  var toast = document.getElementById('toast');
  if (!toast || toast.hidden) return;
  setTimeout(function () {
    toast.style.opacity = '0';
    setTimeout(function () { toast.hidden = true; }, 300);
  }, 2600);
})();"#;

fn toast_element(toast: Option<&str>) -> String {
    match toast {
        Some(text) => format!(
            r#"<div id="toast" class="toast" role="status">{}</div>"#,
            escape_html(text)
        ),
        None => r#"<div id="toast" class="toast" role="status" hidden></div>"#.to_string(),
    }
}

/// Full HTML document around a body fragment.
pub fn document(body: &str, toast: Option<&str>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<script src="https://cdn.jsdelivr.net/npm/apexcharts"></script>
<style>{styles}</style>
</head>
<body>
<div class="container">
{body}
</div>
{toast}
<script>{toast_script}</script>
</body>
</html>"#,
        title = escape_html(APP_NAME),
        styles = STYLES,
        body = body,
        toast = toast_element(toast),
        toast_script = TOAST_SCRIPT,
    )
}

pub fn login_page(toast: Option<&str>) -> String {
    let body = format!(
        r#"<section id="view-login" class="view active">
  <div class="card" style="max-width: 420px; margin: 10vh auto 0;">
    <h1 class="h1" id="appTitle">{app}</h1>
    <p class="muted">Вход для сотрудников сервиса</p>
    <form id="loginForm" method="post" action="/login">
      <div class="grid">
        <label class="field"><span class="field__label">Логин</span><input class="input" name="login" autocomplete="username"></label>
        <label class="field"><span class="field__label">Пароль</span><input class="input" type="password" name="password" autocomplete="current-password"></label>
      </div>
      <div class="formActions"><button class="btn btn--primary" type="submit">Войти</button></div>
    </form>
  </div>
</section>"#,
        app = escape_html(APP_NAME),
    );
    document(&body, toast)
}

fn nav_tabs(tabs: &[&'static EntitySchema], active: &str) -> String {
    tabs.iter()
        .map(|schema| {
            let is_active = schema.key == active;
            format!(
                r#"<a class="tab{active_class}" role="tab" aria-selected="{selected}" data-entity="{key}" href="/tab/{key}">{label}</a>"#,
                active_class = if is_active { " is-active" } else { "" },
                selected = is_active,
                key = schema.key,
                label = escape_html(schema.label),
            )
        })
        .collect()
}

/// The signed-in shell: header with user bar, tab strip, tab content.
pub fn main_page(
    user: &AuthenticatedUser,
    tabs: &[&'static EntitySchema],
    active: &str,
    content: &str,
    toast: Option<&str>,
) -> String {
    let body = format!(
        r#"<header class="topbar">
  <h1 class="h1" id="appTitle">{app}</h1>
  <div class="userbar" id="userbar">
    <span id="userName">{name}</span>
    <span class="muted" id="userRole">{role}</span>
    <form method="post" action="/logout"><button id="logoutBtn" class="btn btn--ghost" type="submit">Выйти</button></form>
  </div>
</header>
<section id="view-app" class="view active">
  <div class="card">
    <nav id="navTabs" class="tabs" role="tablist">{tabs}</nav>
    <main id="tabContent">{content}</main>
  </div>
</section>"#,
        app = escape_html(APP_NAME),
        name = escape_html(user.display_name()),
        role = escape_html(&user.role),
        tabs = nav_tabs(tabs, active),
        content = content,
    );
    document(&body, toast)
}

/// Create/edit form as a card; lands inside the signed-in shell.
pub fn form_card(title: &str, action: &str, fields: &str, cancel_href: &str) -> String {
    format!(
        r#"<div class="card card--inner">
  <h2 class="h2" id="modalTitle">{title}</h2>
  <form id="dynamicForm" method="post" action="{action}">
    {fields}
    <div class="formActions">
      <button class="btn btn--primary" type="submit">Сохранить</button>
      <a class="btn btn--ghost" href="{cancel}">Отмена</a>
    </div>
  </form>
</div>"#,
        title = escape_html(title),
        action = escape_html(action),
        fields = fields,
        cancel = escape_html(cancel_href),
    )
}
