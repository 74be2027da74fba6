use std::process;
use std::sync::Arc;

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use songs_backend::db::{replace_collection, MongoStore};
use songs_backend::secrets::Settings;
use songs_backend::seed::load_seed;
use songs_backend::{app, AppState};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_target(false)
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let store = match MongoStore::new(&settings.mongodb_url()).await {
        Ok(store) => {
            info!(
                "Connected to MongoDB at {}:{}",
                settings.mongodb_service, settings.mongodb_port
            );
            store
        }
        Err(e) => {
            error!("Error connecting to MongoDB: {}", e);
            process::exit(1);
        }
    };

    // Destructive reload of the songs collection before serving traffic
    let seeds = load_seed(&settings.songs_data);
    if let Err(e) = replace_collection(&store, &seeds).await {
        error!("Failed to load seed songs into MongoDB: {}", e);
        process::exit(1);
    }

    let state = AppState::new(Arc::new(store));
    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", settings.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind 0.0.0.0:{}: {}", settings.port, e);
            process::exit(1);
        }
    };

    info!("🎵 Songs service listening on 0.0.0.0:{}", settings.port);

    if let Err(e) = axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        process::exit(1);
    }
}
