use tracing_subscriber::{EnvFilter, fmt};
use weather_core::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = Config::load()?;
    config.apply_env()?;

    weather_server::serve(config).await
}
