//! Writes typed chat chunks to a single-writer stream: user-turn markers,
//! secondary data parts and the terminal `finish` chunk.

pub mod api;
pub mod component;
pub mod config;
pub mod error;
pub mod logic;
pub mod stream;
pub mod types;

pub use error::{ChunkWriterError, Result, StreamError};
pub use logic::chunk_writer_logic::{
    FAKE_PART_CONTENT, write_fake_data_part, write_stream_close, write_user_message_marker,
};
pub use types::UiMessageChunk;
