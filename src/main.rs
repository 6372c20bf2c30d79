use demo_localization::{build_app, config::AppConfig, AppError};
use poem::{listener::TcpListener, Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("poem=debug,demo_localization=debug")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        addr = config.get_listen_addr(),
        environment = %config.get_environment(),
        "starting server"
    );

    let app = build_app(&config)?;
    Server::new(TcpListener::bind(config.get_listen_addr().to_string()))
        .name("demo-localization")
        .run(app)
        .await?;
    Ok(())
}
