use crate::error::Result;
use crate::logic::chunk_writer_logic::{
    write_fake_data_part, write_stream_close, write_user_message_marker,
};
use crate::stream::WritableChunkStream;

/// Runs the chat steps that reproduce the duplicated-message bug:
/// user marker, secondary data chunks, then finish.
pub struct ReproWorkflow {
    fake_parts: usize,
}

impl Default for ReproWorkflow {
    fn default() -> Self {
        Self { fake_parts: 1 }
    }
}

impl ReproWorkflow {
    pub fn new(fake_parts: usize) -> Self {
        Self { fake_parts }
    }

    pub async fn run(
        &self,
        stream: &dyn WritableChunkStream,
        content: &str,
        message_id: &str,
    ) -> Result<()> {
        tracing::info!(message_id, fake_parts = self.fake_parts, "Starting repro workflow");
        write_user_message_marker(stream, content, message_id).await?;
        for _ in 0..self.fake_parts {
            write_fake_data_part(stream).await?;
        }
        write_stream_close(stream).await?;
        tracing::info!(message_id, "Repro workflow finished");
        Ok(())
    }
}
