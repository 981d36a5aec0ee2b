use std::net::SocketAddr;

use smis_server::config::{establish_connection, AppConfig};
use smis_server::domain::health::init_start_time;
use smis_server::state::AppState;
use smis_server::utils::logging::init_logging;

#[tokio::main]
async fn main() {
    // 1. Load environment variables
    dotenvy::dotenv().ok();

    // 2. Initialize logging (guard must outlive the server)
    let _guard = init_logging();

    init_start_time();

    // 3. Load configuration
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // 4. Connect to the database
    let db = match establish_connection(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to the database: {}", e);
            std::process::exit(1);
        }
    };

    let server_port = config.server_port;
    let state = AppState {
        db: std::sync::Arc::new(db),
        config,
    };

    // 5. Build the router and serve
    let app = smis_server::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    tracing::info!("Server listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
