//! Axum router and handlers.
//!
//! The console is plain server-rendered HTML over a handful of routes: tabs
//! are GET pages, saves and deletes are POST forms, and outcome toasts ride
//! redirects as a `msg` query parameter. Every handler re-reads the session
//! from the client store, so a restart or an external logout takes effect on
//! the next request.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use url::form_urlencoded;

use crate::app::{App, failure_placeholder, form_to_record, notice_for, notice_or};
use crate::dashboard::FEEDBACK_FORM_URL;
use crate::error::AdminError;
use crate::render::{FormOptions, render_form, render_placeholder};
use crate::schema::entity;
use crate::utils::today_iso;

pub mod layout;

type SharedApp = Arc<App>;

pub fn build_router(app: SharedApp) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/tab/:key", get(show_tab))
        .route("/tab/:key/new", get(new_form))
        .route("/tab/:key/edit/:id", get(edit_form))
        .route("/tab/:key/save", post(save_new))
        .route("/tab/:key/save/:id", post(save_existing))
        .route("/tab/:key/delete", post(delete_without_id))
        .route("/tab/:key/delete/:id", post(delete_record))
        .route("/qr/feedback", get(feedback_qr))
        .with_state(app)
}

fn encode_query(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

fn redirect_with(path: &str, notice: &str) -> Response {
    Redirect::to(&format!("{path}?msg={}", encode_query(notice))).into_response()
}

async fn index(
    State(app): State<SharedApp>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let toast = query.get("msg").map(String::as_str);
    let Some(user) = app.session() else {
        return Html(layout::login_page(toast)).into_response();
    };

    let tabs = app.visible_tabs();
    match tabs.first() {
        Some(first) => Redirect::to(&format!("/tab/{}", first.key)).into_response(),
        None => {
            let content = render_placeholder("Нет доступа к разделам");
            let page =
                layout::main_page(&user, &tabs, "", &content, Some("Нет доступных разделов"));
            Html(page).into_response()
        }
    }
}

async fn login(
    State(app): State<SharedApp>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let login = form.get("login").map(String::as_str).unwrap_or_default();
    let password = form.get("password").map(String::as_str).unwrap_or_default();
    match app.login(login, password).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(error @ AdminError::Validation(_)) => redirect_with("/", &notice_for(&error)),
        Err(error) => redirect_with("/", &format!("Ошибка входа: {}", notice_for(&error))),
    }
}

async fn logout(State(app): State<SharedApp>) -> Response {
    app.logout().await;
    Redirect::to("/").into_response()
}

async fn show_tab(
    State(app): State<SharedApp>,
    Path(key): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let Some(user) = app.session() else {
        return Redirect::to("/").into_response();
    };
    let tabs = app.visible_tabs();
    match app.tab_content(&key).await {
        Ok(content) => {
            let toast = query.get("msg").map(String::as_str);
            Html(layout::main_page(&user, &tabs, &key, &content, toast)).into_response()
        }
        Err(error) => {
            let content = render_placeholder(failure_placeholder(&error));
            let notice = notice_or(&error, "Ошибка загрузки");
            Html(layout::main_page(&user, &tabs, &key, &content, Some(&notice))).into_response()
        }
    }
}

async fn new_form(State(app): State<SharedApp>, Path(key): Path<String>) -> Response {
    let Some(user) = app.session() else {
        return Redirect::to("/").into_response();
    };
    let Some(schema) = entity(&key) else {
        return Redirect::to(&format!("/tab/{key}")).into_response();
    };

    // Creation of a request hides the server-assigned id and the client
    // binding, and suggests today as the start date.
    let today = today_iso();
    let (hidden, prefill): (&[&str], Vec<(&str, &str)>) = if key == "requests" {
        (
            &["request_id", "client_id"],
            vec![("start_date", today.as_str())],
        )
    } else {
        (&[], Vec::new())
    };
    let opts = FormOptions {
        hidden,
        prefill: &prefill,
        editing: false,
    };
    let fields = render_form(schema, None, &opts);
    let content = layout::form_card(
        &format!("Создание: {}", schema.label),
        &format!("/tab/{key}/save"),
        &fields,
        &format!("/tab/{key}"),
    );
    Html(layout::main_page(&user, &app.visible_tabs(), &key, &content, None)).into_response()
}

async fn edit_form(
    State(app): State<SharedApp>,
    Path((key, id)): Path<(String, String)>,
) -> Response {
    let Some(user) = app.session() else {
        return Redirect::to("/").into_response();
    };
    let Some(schema) = entity(&key) else {
        return Redirect::to(&format!("/tab/{key}")).into_response();
    };
    match app.edit_record(&key, &id).await {
        Ok(record) => {
            let opts = FormOptions {
                editing: true,
                ..FormOptions::default()
            };
            let fields = render_form(schema, Some(&record), &opts);
            let content = layout::form_card(
                &format!("Редактирование: {}", schema.label),
                &format!("/tab/{key}/save/{id}"),
                &fields,
                &format!("/tab/{key}"),
            );
            Html(layout::main_page(&user, &app.visible_tabs(), &key, &content, None))
                .into_response()
        }
        Err(error) => redirect_with(&format!("/tab/{key}"), &notice_for(&error)),
    }
}

async fn save_new(
    State(app): State<SharedApp>,
    Path(key): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    save(app, key, None, form).await
}

async fn save_existing(
    State(app): State<SharedApp>,
    Path((key, id)): Path<(String, String)>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    save(app, key, Some(id), form).await
}

async fn save(
    app: SharedApp,
    key: String,
    id: Option<String>,
    form: HashMap<String, String>,
) -> Response {
    let Some(user) = app.session() else {
        return Redirect::to("/").into_response();
    };
    match app.save_from_form(&key, id.as_deref(), &form).await {
        Ok(message) => redirect_with(&format!("/tab/{key}"), message),
        Err(AdminError::Validation(message)) => {
            // The form stays open with what was entered.
            let Some(schema) = entity(&key) else {
                return redirect_with(&format!("/tab/{key}"), &message);
            };
            let record = form_to_record(schema, &form);
            let editing = id.is_some();
            let hidden: &[&str] = if !editing && key == "requests" {
                &["request_id", "client_id"]
            } else {
                &[]
            };
            let opts = FormOptions {
                hidden,
                prefill: &[],
                editing,
            };
            let fields = render_form(schema, Some(&record), &opts);
            let (title, action) = match &id {
                Some(id) => (
                    format!("Редактирование: {}", schema.label),
                    format!("/tab/{key}/save/{id}"),
                ),
                None => (
                    format!("Создание: {}", schema.label),
                    format!("/tab/{key}/save"),
                ),
            };
            let content = layout::form_card(&title, &action, &fields, &format!("/tab/{key}"));
            let page =
                layout::main_page(&user, &app.visible_tabs(), &key, &content, Some(&message));
            Html(page).into_response()
        }
        Err(error) => {
            redirect_with(&format!("/tab/{key}"), &notice_or(&error, "Ошибка сохранения"))
        }
    }
}

async fn delete_without_id(State(app): State<SharedApp>, Path(key): Path<String>) -> Response {
    delete(app, key, None).await
}

async fn delete_record(
    State(app): State<SharedApp>,
    Path((key, id)): Path<(String, String)>,
) -> Response {
    delete(app, key, Some(id)).await
}

async fn delete(app: SharedApp, key: String, id: Option<String>) -> Response {
    if app.session().is_none() {
        return Redirect::to("/").into_response();
    }
    match app.delete_record(&key, id.as_deref()).await {
        Ok(Some(message)) => redirect_with(&format!("/tab/{key}"), message),
        Ok(None) => Redirect::to(&format!("/tab/{key}")).into_response(),
        Err(error) => {
            redirect_with(&format!("/tab/{key}"), &notice_or(&error, "Ошибка удаления"))
        }
    }
}

/// The quality tab embeds `/qr/feedback` as an image; rendering is handed
/// to an external QR service pointed at the feedback form.
async fn feedback_qr() -> Redirect {
    Redirect::temporary(&format!(
        "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data={}",
        encode_query(FEEDBACK_FORM_URL)
    ))
}
