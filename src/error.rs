use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx backend response. The message is already normalized to the
    /// `error` field of the response body, or `HTTP_{status}` when the body
    /// carries none.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("access denied for '{0}'")]
    AccessDenied(String),

    /// Form input rejected before any backend call. The message is the
    /// user-facing notice text.
    #[error("{0}")]
    Validation(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("unknown entity '{0}'")]
    UnknownEntity(String),

    #[error("unknown render function '{0}'")]
    UnknownRenderer(String),

    #[error("missing record id for '{0}'")]
    MissingId(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AdminError>;
