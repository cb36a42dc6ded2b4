//! Workflow steps that write single chunks to the chat stream.
//!
//! Each step takes the writer, writes one chunk and gives the writer back.
//! The marker and fake-part steps release through [`WriterGuard`], so the
//! stream can be re-acquired even after a failed write. The close step
//! releases only after a successful write; a failed finish write leaves the
//! stream locked.

use crate::error::{ChunkWriterError, Result};
use crate::logic::writer_guard::WriterGuard;
use crate::stream::WritableChunkStream;
use crate::types::UiMessageChunk;

/// Content of the secondary chunk written by [`write_fake_data_part`].
pub const FAKE_PART_CONTENT: &str = "This second write triggers duplication";

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Writes a `user-message` marker so the client can rebuild the user turn on replay.
pub async fn write_user_message_marker(
    stream: &dyn WritableChunkStream,
    content: &str,
    message_id: &str,
) -> Result<()> {
    if message_id.is_empty() {
        return Err(ChunkWriterError::EmptyMessageId);
    }

    let mut guard = WriterGuard::acquire(stream)?;
    let chunk = UiMessageChunk::user_message(
        message_id.to_string(),
        content.to_string(),
        now_millis(),
    );
    guard.write(chunk).await?;
    tracing::debug!(message_id, "Wrote user message marker");
    Ok(())
}

/// Writes a second data chunk ahead of the assistant `start` chunk.
///
/// Two or more data chunks before `start` make the client duplicate the
/// assistant message when `start` rewrites its id.
pub async fn write_fake_data_part(stream: &dyn WritableChunkStream) -> Result<()> {
    let mut guard = WriterGuard::acquire(stream)?;
    guard
        .write(UiMessageChunk::extra_data(
            FAKE_PART_CONTENT.to_string(),
            now_millis(),
        ))
        .await?;
    tracing::debug!("Wrote fake data part");
    Ok(())
}

/// Writes the terminal `finish` chunk.
pub async fn write_stream_close(stream: &dyn WritableChunkStream) -> Result<()> {
    let mut writer = stream.get_writer()?;
    if let Err(error) = writer.write(UiMessageChunk::Finish).await {
        // No guard here: the handle is dropped unreleased.
        tracing::warn!("Finish write failed, stream writer stays locked: {error}");
        return Err(error.into());
    }
    writer.release_lock();
    tracing::debug!("Wrote finish chunk");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StreamError;
    use crate::stream::SharedChunkStream;
    use crate::types::{FakePartData, WorkflowData};
    use serde_json::json;

    fn marker_parts(chunk: &UiMessageChunk) -> (String, String, i64) {
        match chunk {
            UiMessageChunk::DataWorkflow {
                data:
                    WorkflowData::UserMessage {
                        id,
                        content,
                        timestamp,
                    },
            } => (id.clone(), content.clone(), *timestamp),
            other => panic!("expected marker chunk, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn marker_carries_id_and_content() {
        let stream = SharedChunkStream::default();
        let before = now_millis();
        write_user_message_marker(&stream, "Hello", "m1").await.unwrap();

        let chunks = stream.unread_chunks();
        assert_eq!(chunks.len(), 1);
        let (id, content, timestamp) = marker_parts(&chunks[0]);
        assert_eq!(id, "m1");
        assert_eq!(content, "Hello");
        assert!(timestamp >= before);

        let value = serde_json::to_value(&chunks[0]).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "data-workflow",
                "data": { "type": "user-message", "id": "m1", "content": "Hello", "timestamp": timestamp }
            })
        );
        assert!(!stream.is_locked());
    }

    #[tokio::test]
    async fn marker_timestamps_do_not_decrease() {
        let stream = SharedChunkStream::default();
        for index in 0..5 {
            write_user_message_marker(&stream, "turn", &format!("m{index}"))
                .await
                .unwrap();
        }

        let timestamps: Vec<i64> = stream
            .unread_chunks()
            .iter()
            .map(|chunk| marker_parts(chunk).2)
            .collect();
        assert!(timestamps.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[tokio::test]
    async fn empty_message_id_is_rejected_without_writing() {
        let stream = SharedChunkStream::default();
        let result = write_user_message_marker(&stream, "Hello", "").await;
        assert_eq!(result, Err(ChunkWriterError::EmptyMessageId));
        assert!(stream.unread_chunks().is_empty());
        assert!(!stream.is_locked());
    }

    #[tokio::test]
    async fn marker_releases_writer_on_write_failure() {
        let stream = SharedChunkStream::default();
        stream.close();

        let result = write_user_message_marker(&stream, "Hello", "m1").await;
        assert_eq!(result, Err(ChunkWriterError::Stream(StreamError::Closed)));
        assert!(!stream.is_locked());
        assert!(stream.get_writer().is_ok());
    }

    #[tokio::test]
    async fn fake_part_releases_writer_on_write_failure() {
        let stream = SharedChunkStream::default();
        stream.close();

        let result = write_fake_data_part(&stream).await;
        assert_eq!(result, Err(ChunkWriterError::Stream(StreamError::Closed)));
        assert!(stream.get_writer().is_ok());
    }

    #[tokio::test]
    async fn close_keeps_writer_locked_on_write_failure() {
        let stream = SharedChunkStream::default();
        stream.close();

        let result = write_stream_close(&stream).await;
        assert_eq!(result, Err(ChunkWriterError::Stream(StreamError::Closed)));
        assert!(stream.is_locked());
        assert_eq!(stream.get_writer().err(), Some(StreamError::Locked));
    }

    #[tokio::test]
    async fn close_releases_writer_on_success() {
        let stream = SharedChunkStream::default();
        write_stream_close(&stream).await.unwrap();
        assert!(!stream.is_locked());
        assert_eq!(stream.unread_chunks(), vec![UiMessageChunk::Finish]);
    }

    #[tokio::test]
    async fn steps_fail_on_locked_stream() {
        let stream = SharedChunkStream::default();
        let held = stream.get_writer().unwrap();

        let locked = Err(ChunkWriterError::Stream(StreamError::Locked));
        assert_eq!(write_user_message_marker(&stream, "Hello", "m1").await, locked);
        assert_eq!(write_fake_data_part(&stream).await, locked);
        assert_eq!(write_stream_close(&stream).await, locked);
        assert!(stream.unread_chunks().is_empty());

        held.release_lock();
        assert!(!stream.is_locked());
    }

    #[tokio::test]
    async fn two_fake_parts_in_a_row() {
        let stream = SharedChunkStream::default();
        write_fake_data_part(&stream).await.unwrap();
        write_fake_data_part(&stream).await.unwrap();

        let chunks = stream.unread_chunks();
        assert_eq!(chunks.len(), 2);
        for chunk in &chunks {
            match chunk {
                UiMessageChunk::DataFakePart {
                    data: FakePartData::ExtraData { content, .. },
                } => assert_eq!(content, FAKE_PART_CONTENT),
                other => panic!("expected fake part, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn sequential_steps_keep_call_order() {
        let stream = SharedChunkStream::default();
        write_user_message_marker(&stream, "first", "m1").await.unwrap();
        write_fake_data_part(&stream).await.unwrap();
        write_user_message_marker(&stream, "second", "m2").await.unwrap();
        write_stream_close(&stream).await.unwrap();

        let kinds: Vec<&str> = stream
            .unread_chunks()
            .iter()
            .map(UiMessageChunk::kind)
            .collect();
        assert_eq!(kinds, vec!["data-workflow", "data-fakePart", "data-workflow", "finish"]);
        assert_eq!(stream.unread_chunks().last(), Some(&UiMessageChunk::Finish));
    }
}
