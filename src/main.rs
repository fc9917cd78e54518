use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pc_control_server::api::{routes::create_router, state::AppState};
use pc_control_server::config::{Config, DriverKind};
use pc_control_server::desktop::{Drivers, VirtualDesktop};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();

    let drivers = match config.driver {
        DriverKind::Native => Drivers::native(),
        DriverKind::Virtual => Drivers::from_virtual(Arc::new(VirtualDesktop::new())),
    };

    let addr = config.bind_addr();
    tracing::info!("PC control server starting on http://{}", addr);
    tracing::info!(
        "Auth: {}",
        if config.auth_enabled() { "enabled" } else { "disabled" }
    );
    tracing::info!("Driver: {}", config.driver.as_str());
    match drivers.display.screen_size() {
        Ok((width, height)) => tracing::info!("Screen size: {}x{}", width, height),
        Err(e) => tracing::warn!("Could not read screen size: {}", e),
    }

    let state = Arc::new(AppState::new(config, drivers));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
