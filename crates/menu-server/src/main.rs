use std::net::{IpAddr, SocketAddr};

use anyhow::Result;
use tracing::info;

use menu_server::config::Settings;
use menu_server::utils::logger::init_logger;
use menu_server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::load()?;

    // Initialize logging
    init_logger(&settings.logging)?;
    info!("Starting menu server...");

    let state = AppState::new(settings.clone());

    // Creates data/menu.json on first start
    let menu = state.menu_service.load_menu().await?;
    info!(
        "Menu loaded from {} ({} categories)",
        settings.storage.menu_path.display(),
        menu.len()
    );

    let app = build_router(state);

    let addr = SocketAddr::from((settings.server.host.parse::<IpAddr>()?, settings.server.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
