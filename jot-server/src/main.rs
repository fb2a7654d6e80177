use anyhow::Result;

use jot_auth::{password, TokenOptions, TokenService};
use jot_server::config::AppConfig;
use jot_server::state::AppState;
use jot_store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env();

    // Schema and seed data are in place before the listener opens.
    let store = Store::open(&config.database_path)?;
    store.seed_demo_data(&password::hash("password")?)?;

    let tokens = TokenService::new(TokenOptions {
        secret: config.jwt_secret.clone(),
        expires_in: config.token_ttl,
    });

    let router = jot_server::build(AppState::new(store, tokens));

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
