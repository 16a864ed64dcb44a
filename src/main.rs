use clap::{Arg, Command};
use color_eyre::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod adapters;
mod application;
mod domain;
mod ports;

use adapters::{
    config::FileConfigStore,
    session::MemorySessionProvider,
    store::MemoryStore,
    web::{router, AppState},
};
use application::{CommentService, TaskService};
use ports::ConfigStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize color-eyre for better error reporting
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taskboard=info,tower_http=info")),
        )
        .init();

    // Parse command line arguments
    let matches = Command::new("taskboard")
        .version("0.1.0")
        .about("A small task-sharing web application")
        .long_about(
            "Serves a task panel where signed-in users register tasks, share \
             public ones via a link, and visitors comment on shared tasks.",
        )
        .arg(
            Arg::new("bind")
                .long("bind")
                .value_name("ADDR")
                .help("Address to bind (can also be set via TASKBOARD_BIND env var)"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Public base URL for share links (can also be set via TASKBOARD_BASE_URL)"),
        )
        .get_matches();

    // Load configuration
    let config_store = Arc::new(FileConfigStore::new()?);
    let mut config = config_store.load_config().await?;

    // Override with command line arguments or environment variables
    if let Some(bind) = matches.get_one::<String>("bind") {
        config.bind_addr = bind.clone();
    } else if let Ok(bind) = std::env::var("TASKBOARD_BIND") {
        config.bind_addr = bind;
    }

    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.base_url = base_url.clone();
    } else if let Ok(base_url) = std::env::var("TASKBOARD_BASE_URL") {
        config.base_url = base_url;
    }

    // Persist the merged config so overrides stick across restarts
    config_store.save_config(&config).await?;

    // Create dependencies: one store handle for the process, injected
    // everywhere it is needed.
    let store = Arc::new(MemoryStore::new());
    let task_service = Arc::new(TaskService::new(store.clone()));
    let comment_service = Arc::new(CommentService::new(store));
    let sessions = Arc::new(MemorySessionProvider::new());

    let state = AppState {
        tasks: task_service,
        comments: comment_service,
        sessions,
        base_url: config.base_url.trim_end_matches('/').to_string(),
    };

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "taskboard listening");
    axum::serve(listener, app).await?;

    Ok(())
}
