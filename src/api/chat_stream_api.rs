use crate::component::repro_workflow_component::ReproWorkflow;
use crate::config::ServerConfig;
use crate::stream::{ChunkStreamReader, SharedChunkStream};

use async_stream::stream;
use axum::{
    Json,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStreamRequest {
    pub content: String,
    pub message_id: Option<String>,
}

/// Runs the repro workflow on a fresh stream and relays its chunks as NDJSON.
pub async fn chat_stream(
    State(config): State<Arc<ServerConfig>>,
    Json(request): Json<ChatStreamRequest>,
) -> impl IntoResponse {
    let message_id = match request.message_id {
        Some(id) if id.is_empty() => {
            return (StatusCode::BAD_REQUEST, "messageId must not be empty").into_response();
        }
        Some(id) => id,
        None => Uuid::new_v4().to_string(),
    };

    let stream = SharedChunkStream::new(config.stream_capacity);
    let mut reader = stream.reader();
    let workflow = ReproWorkflow::new(config.fake_parts);
    let content = request.content;

    tokio::spawn(async move {
        if let Err(error) = workflow.run(&stream, &content, &message_id).await {
            tracing::error!(message_id = %message_id, "Repro workflow failed: {error}");
            // The stream belongs to this handler; end the response body.
            stream.close();
        }
    });

    let response_stream = stream! {
        loop {
            match reader.read_chunk().await {
                Ok(Some(chunk)) => match serde_json::to_vec(&chunk) {
                    Ok(mut line) => {
                        line.push(b'\n');
                        yield Ok::<Bytes, std::io::Error>(Bytes::from(line));
                    }
                    Err(error) => {
                        tracing::error!("Could not serialize {} chunk: {error}", chunk.kind());
                        yield Err(std::io::Error::other(error));
                        break;
                    }
                },
                Ok(None) => {
                    tracing::debug!("Chat stream complete");
                    break;
                }
                Err(error) => {
                    tracing::error!("Chat stream ended before finish: {error}");
                    yield Err(std::io::Error::other(error));
                    break;
                }
            }
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/x-ndjson"),
    );
    headers.insert("X-Accel-Buffering", HeaderValue::from_static("no"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    (headers, Body::from_stream(response_stream)).into_response()
}

pub async fn health() -> &'static str {
    "ok"
}
