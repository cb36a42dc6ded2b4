use crate::error::StreamError;
use crate::stream::{ChunkStreamWriter, WritableChunkStream};
use crate::types::UiMessageChunk;

/// Holds a stream writer and releases it when dropped, whatever the exit path.
pub struct WriterGuard {
    /// Always `Some` until `drop` takes it to release
    writer: Option<Box<dyn ChunkStreamWriter>>,
}

impl WriterGuard {
    pub fn acquire(stream: &dyn WritableChunkStream) -> Result<Self, StreamError> {
        Ok(Self {
            writer: Some(stream.get_writer()?),
        })
    }

    pub async fn write(&mut self, chunk: UiMessageChunk) -> Result<(), StreamError> {
        self.writer
            .as_mut()
            .expect("writer is held until the guard is dropped")
            .write(chunk)
            .await
    }
}

impl Drop for WriterGuard {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.take() {
            writer.release_lock();
        }
    }
}
