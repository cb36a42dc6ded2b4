pub mod chat_stream_api;

use crate::component;
use crate::config::ServerConfig;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub fn init() -> crate::Result<()> {
    tracing::info!("Initializing chat stream api");
    component::init()?;
    Ok(())
}

pub fn router(config: ServerConfig) -> Router {
    Router::new()
        .route("/chat-stream", post(chat_stream_api::chat_stream))
        .route("/health", get(chat_stream_api::health))
        .with_state(Arc::new(config))
}
