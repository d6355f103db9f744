use std::sync::Arc;

use axum::http::Method;
use axum::{Router, routing::get};
use clap::Parser;
use glitter::commentary;
use glitter::config::{Cli, Config, default_config_dir, default_config_path};
use glitter::db::Database;
use glitter::google::GoogleClient;
use glitter::handler::{AppState, healthcheck};
use glitter::lists;
use glitter::places;
use glitter::search;
use glitter::users;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    dotenvy::dotenv().ok();

    // Determine config path and data directory
    // If --config is provided, use its parent directory for data (database, etc.)
    // Otherwise use ~/.glitter/ for both
    let (config_path, data_dir) = match args.config_path {
        Some(path) => {
            let path = std::path::PathBuf::from(path);
            let dir = path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| std::path::PathBuf::from("."));
            (path, dir)
        }
        None => {
            let dir = default_config_dir();
            (default_config_path(), dir)
        }
    };

    // Ensure data directory exists
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("failed to create data directory {:?}: {}", data_dir, e);
        std::process::exit(1);
    }

    tracing_subscriber::fmt().json().init();
    tracing::info!("glitter.svc starting");

    let cfg = Config::new(config_path.to_str().unwrap()).unwrap_or_else(|e| {
        tracing::error!(error = %e, path = ?config_path, "failed to load config file");
        std::process::exit(1);
    });
    let db = Arc::new(Database::new(&cfg, &data_dir).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup database");
        std::process::exit(1);
    }));
    let google = Arc::new(GoogleClient::new(&cfg));

    let address = format!("0.0.0.0:{}", cfg.app.get_port().to_string());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api = Router::new()
        .merge(places::routes())
        .merge(lists::routes())
        .merge(users::routes())
        .merge(commentary::routes())
        .merge(search::routes());

    let app = Router::new()
        .route("/", get(healthcheck))
        .nest("/api", api)
        .layer(cors)
        .with_state(AppState { db, google });

    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    tracing::info!("glitter.svc running on {}", &address);
    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(err) = result {
                tracing::error!(error = %err, "server exited with error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            tracing::info!("ctrl+c signal received, shutting down");
        }
    }

    tracing::info!("glitter.svc going off, graceful shutdown complete");
}
