use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use blog_repurposer::{
    config::Config,
    api::routes::create_router,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,blog_repurposer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let server_addr = config.server_addr;

    // Requests fail with a configuration error until these are set
    if config.firecrawl_api_key.is_none() {
        warn!("FIRECRAWL_API_KEY is not set");
    }
    if config.gemini_api_key.is_none() {
        warn!("GOOGLE_GEMINI_API_KEY is not set");
    }

    let app_state = AppState::new(config)?;
    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    info!(%server_addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
