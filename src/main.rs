use chat_chunk_writer::{api, config::ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_chunk_writer=info".into()),
        )
        .init();

    api::init().map_err(|error| format!("Could not initialize chat stream api: {error}"))?;

    let config = ServerConfig::from_env();
    let bind_address = config.bind_address.clone();
    let app = api::router(config);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{bind_address}");

    axum::serve(listener, app).await?;
    Ok(())
}
