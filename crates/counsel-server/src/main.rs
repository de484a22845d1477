use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use counsel_core::config::Config;
use counsel_core::model::ModelBackend;
use counsel_core::store::{FileStore, Store};
use counsel_model::{GeminiBackend, OllamaBackend};
use counsel_server::AppState;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counsel_server=info,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    std::fs::create_dir_all(&config.data_dir)?;
    let store = Store::new(Arc::new(FileStore::new(&config.data_dir)));
    info!(data_dir = %config.data_dir, "document store ready");

    // Select the model backend based on BACKEND (gemini default).
    let backend: Arc<dyn ModelBackend> = match config.backend.as_str() {
        "ollama" => Arc::new(
            OllamaBackend::new(&config.ollama_base_url, &config.ollama_model)
                .with_timeout(config.model_timeout_s),
        ),
        _ => Arc::new(
            GeminiBackend::new(&config.gemini_api_key, &config.model)
                .with_timeout(config.model_timeout_s),
        ),
    };
    info!(backend = %config.backend, model = %config.model, "model backend selected");

    let state = Arc::new(AppState { store, backend });

    let mut app = counsel_server::router(state);

    // Static UI bundle, when one has been built
    if std::path::Path::new(&config.ui_dist_dir).is_dir() {
        let serve_dir = ServeDir::new(&config.ui_dist_dir).fallback(ServeFile::new(format!(
            "{}/index.html",
            config.ui_dist_dir
        )));
        app = app.fallback_service(serve_dir);
    }

    let app = app
        .layer(DefaultBodyLimit::max((config.max_upload_mb * 1024 * 1024) as usize))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.web_bind, config.web_port);
    info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
