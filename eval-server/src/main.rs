use eval_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_environment();
    print_banner();

    let config = Config::from_env()?;
    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Configuration loaded"
    );

    let state = ServerState::initialize(&config).await?;
    Server::with_state(config, state).run().await?;

    tracing::info!("Server stopped");
    Ok(())
}
