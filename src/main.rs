use pagesmith::build_router;
use pagesmith::config::Config;
use pagesmith::state::AppState;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::load()?;
    tracing::info!("Configuration loaded");

    let state = AppState::new(config.clone())?;
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("pagesmith listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - POST /api/v1/layouts");
    tracing::info!("  - POST /api/v1/layouts/export");
    tracing::info!("  - GET  /api/v1/layouts/:id");
    tracing::info!("  - POST /api/v1/articles");
    tracing::info!("  - GET  /api/v1/articles");
    tracing::info!("  - GET  /api/v1/articles/:slug");
    tracing::info!("  - POST /api/v1/images");
    tracing::info!("  - GET  /health");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pagesmith=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
