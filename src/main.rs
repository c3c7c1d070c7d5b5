use bursar_engine::api::{create_router, AppState};
use bursar_engine::config::{ConfigLoader, ServerConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let server = ServerConfig::from_env();

    tracing_subscriber::fmt()
        .with_max_level(server.log_level)
        .with_target(false)
        .init();

    let loaded = ConfigLoader::load(&server.config_dir).and_then(|c| c.into_repository());
    let repository = match loaded {
        Ok(repository) => repository,
        Err(e) => {
            error!(
                config_dir = %server.config_dir.display(),
                error = %e,
                "Failed to load configuration"
            );
            std::process::exit(1);
        }
    };

    let app = create_router(AppState::new(repository));

    let listener = match tokio::net::TcpListener::bind(&server.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %server.addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %server.addr, "Server starting...");
    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
