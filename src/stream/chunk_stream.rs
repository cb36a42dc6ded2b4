use crate::error::StreamError;
use crate::types::UiMessageChunk;

use async_trait::async_trait;

/// A single-writer stream of chunks owned by the caller.
pub trait WritableChunkStream: Send + Sync {
    /// Takes the exclusive write lock. Fails with [`StreamError::Locked`]
    /// while another writer holds it.
    fn get_writer(&self) -> Result<Box<dyn ChunkStreamWriter>, StreamError>;
}

/// Exclusive write access to a [`WritableChunkStream`].
///
/// Dropping a writer without calling [`ChunkStreamWriter::release_lock`]
/// keeps the stream locked.
#[async_trait]
pub trait ChunkStreamWriter: Send {
    async fn write(&mut self, chunk: UiMessageChunk) -> Result<(), StreamError>;
    fn release_lock(self: Box<Self>);
}

#[async_trait]
pub trait ChunkStreamReader: Send {
    async fn read_chunk(&mut self) -> Result<Option<UiMessageChunk>, StreamError>;
}
