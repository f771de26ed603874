use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pmstandards::app;
use pmstandards::config::{Cli, Config, default_config_dir, default_config_path};
use pmstandards::content::ContentPayload;
use pmstandards::db::Database;
use pmstandards::documents::DocumentRegistry;
use pmstandards::handler::AppState;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    // With --config, data (database, content, pdfs) lives next to the config file.
    // Otherwise everything lives under ~/.pmstandards/
    let (config_path, data_dir) = match args.config_path {
        Some(path) => {
            let path = PathBuf::from(path);
            let dir = path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
            (path, dir)
        }
        None => (default_config_path(), default_config_dir()),
    };

    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("failed to create data directory {:?}: {}", data_dir, e);
        std::process::exit(1);
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().json().with_env_filter(env_filter).init();
    tracing::info!("pmstandards.svc starting");

    let cfg = Config::new(&config_path).unwrap_or_else(|e| {
        tracing::error!(error = %e, path = ?config_path, "failed to load config file");
        std::process::exit(1);
    });
    let db = Arc::new(Database::new(&cfg, &data_dir).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup database");
        std::process::exit(1);
    }));
    let content = Arc::new(ContentPayload::load_or_default(&cfg.app.content_path(&data_dir)).await);
    let documents = Arc::new(DocumentRegistry::with_offsets(&cfg.offsets()));

    let pdf_dir = cfg.app.pdf_dir(&data_dir);
    if !pdf_dir.is_dir() {
        tracing::warn!(path = ?pdf_dir, "pdf directory not found, viewer pages will not load documents");
    }

    let app = app::router(
        AppState {
            db,
            content,
            documents,
        },
        &pdf_dir,
    );

    let address = format!("0.0.0.0:{}", cfg.app.get_port());
    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    let cancellation_token = CancellationToken::new();
    let signal_token = cancellation_token.clone();
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl+c");
            return;
        }
        tracing::info!("ctrl+c signal received, preparing to shutdown");
        signal_token.cancel();
    });

    tracing::info!("pmstandards.svc running on {}", &address);
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(cancellation_token.cancelled_owned())
        .await
    {
        tracing::error!(error = %err, "server error");
        std::process::exit(1);
    }

    tracing::info!("pmstandards.svc going off, graceful shutdown complete");
}
