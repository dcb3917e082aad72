pub mod access;
pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fieldmap;
pub mod render;
pub mod schema;
pub mod storage;
pub mod types;
pub mod utils;
pub mod web;

pub use api::ApiClient;
pub use app::App;
pub use config::Config;
pub use error::{AdminError, Result};
pub use schema::{APP_NAME, EntityKind, EntitySchema, FieldSpec, entities, entity};
pub use storage::ClientStore;
pub use types::{AuthenticatedUser, Record, RequestStatus, VALID_REQUEST_STATUSES};
pub use web::build_router;
