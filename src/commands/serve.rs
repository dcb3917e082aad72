//! The `serve` command: bind the console and hand requests to the router.

use std::sync::Arc;

use owo_colors::OwoColorize;
use tokio::net::TcpListener;
use tracing::info;

use crate::app::App;
use crate::config::Config;
use crate::error::{AdminError, Result};
use crate::storage::ClientStore;
use crate::web::build_router;

pub struct ServeOptions {
    pub listen: Option<String>,
    pub api_base: Option<String>,
}

/// Start the console. Flags win over environment variables, which win over
/// the config file; a missing backend address is a hard error since every
/// tab needs it.
pub async fn cmd_serve(options: ServeOptions) -> Result<()> {
    let config = Config::load()?;

    let api_base = options
        .api_base
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| config.api_base());
    if api_base.is_empty() {
        return Err(AdminError::Config(
            "backend address is not set. Pass --api-base, export CLIMADMIN_API_BASE, \
             or run `climadmin config set api_base <url>`"
                .to_string(),
        ));
    }

    let listen = options
        .listen
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| config.listen());

    let store = ClientStore::new();
    let app = Arc::new(App::new(api_base.clone(), store));
    let router = build_router(app);

    let listener = TcpListener::bind(&listen).await.map_err(|e| {
        AdminError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to bind {listen}: {e}"),
        ))
    })?;

    info!("console listening on {listen}, backend {api_base}");
    println!(
        "{} {}",
        "Console:".green().bold(),
        format!("http://{listen}").cyan()
    );
    println!("{} {}", "Backend:".dimmed(), api_base);

    axum::serve(listener, router).await?;
    Ok(())
}
