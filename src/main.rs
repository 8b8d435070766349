use anyhow::Context;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tutoring_backend::{app::create_router, app_state::AppState, config::Config, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    let pool = db::init_pool(&config.database)
        .await
        .context("Failed to initialize the database")?;

    let addr = config.server_addr();
    let app_name = config.app.name.clone();
    let state = AppState::new(pool, config);
    let app = create_router(state);

    info!("{} listening on {}", app_name, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Failed to serve application")?;

    Ok(())
}
