pub mod chunk_stream;
pub mod shared_stream;

pub use chunk_stream::{ChunkStreamReader, ChunkStreamWriter, WritableChunkStream};
pub use shared_stream::{SharedChunkReader, SharedChunkStream};
