use crate::error::StreamError;
use crate::stream::chunk_stream::{ChunkStreamReader, ChunkStreamWriter, WritableChunkStream};
use crate::types::UiMessageChunk;

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

pub const DEFAULT_CAPACITY: usize = 16;

/// Chunks written but not yet read. `closed` lives under the same lock so a
/// push and a close are always seen in the order they happened.
struct ChunkBuffer {
    unread: VecDeque<UiMessageChunk>,
    closed: bool,
}

/// State shared by the stream handle, its writer and its reader.
struct SharedStreamState {
    buffer: Mutex<ChunkBuffer>,
    /// Maximum number of unread chunks before writes wait
    capacity: usize,
    /// Whether a writer currently holds the lock
    locked: AtomicBool,
    /// Wakes readers on new chunks and writers on freed capacity or close
    notify: Notify,
}

impl SharedStreamState {
    fn lock_buffer(&self) -> MutexGuard<'_, ChunkBuffer> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_closed(&self) -> bool {
        self.lock_buffer().closed
    }

    fn close(&self) {
        let was_closed = std::mem::replace(&mut self.lock_buffer().closed, true);
        if !was_closed {
            tracing::debug!("Chunk stream closed by consumer");
        }
        self.notify.notify_waiters();
    }
}

/// In-memory single-writer chunk stream with one consumer.
///
/// Cloning yields another handle to the same stream.
#[derive(Clone)]
pub struct SharedChunkStream {
    state: Arc<SharedStreamState>,
}

impl SharedChunkStream {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Arc::new(SharedStreamState {
                buffer: Mutex::new(ChunkBuffer {
                    unread: VecDeque::new(),
                    closed: false,
                }),
                capacity: capacity.max(1),
                locked: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    /// Consumer side of the stream. Dropping the reader closes the stream.
    pub fn reader(&self) -> SharedChunkReader {
        SharedChunkReader {
            state: self.state.clone(),
            done: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state.locked.load(Ordering::Acquire)
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    /// Cancels the stream from the consumer side; later writes fail.
    pub fn close(&self) {
        self.state.close();
    }

    /// Chunks written and not yet handed to the reader, oldest first.
    pub fn unread_chunks(&self) -> Vec<UiMessageChunk> {
        self.state.lock_buffer().unread.iter().cloned().collect()
    }
}

impl Default for SharedChunkStream {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl WritableChunkStream for SharedChunkStream {
    fn get_writer(&self) -> Result<Box<dyn ChunkStreamWriter>, StreamError> {
        self.state
            .locked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| StreamError::Locked)?;
        Ok(Box::new(SharedChunkWriter {
            state: self.state.clone(),
        }))
    }
}

pub struct SharedChunkWriter {
    state: Arc<SharedStreamState>,
}

#[async_trait]
impl ChunkStreamWriter for SharedChunkWriter {
    async fn write(&mut self, chunk: UiMessageChunk) -> Result<(), StreamError> {
        loop {
            let notified = self.state.notify.notified();
            tokio::pin!(notified);
            // Register before checking so a wake between check and await is not lost
            notified.as_mut().enable();

            {
                let mut buffer = self.state.lock_buffer();
                if buffer.closed {
                    return Err(StreamError::Closed);
                }
                if buffer.unread.len() < self.state.capacity {
                    tracing::trace!("Writing {} chunk", chunk.kind());
                    buffer.unread.push_back(chunk);
                    drop(buffer);
                    self.state.notify.notify_waiters();
                    return Ok(());
                }
            }

            notified.await;
        }
    }

    fn release_lock(self: Box<Self>) {
        self.state.locked.store(false, Ordering::Release);
    }
}

pub struct SharedChunkReader {
    state: Arc<SharedStreamState>,
    /// Set once the finish chunk has been handed out
    done: bool,
}

#[async_trait]
impl ChunkStreamReader for SharedChunkReader {
    /// Yields chunks in write order and `None` once `finish` has been read.
    /// A stream closed before its `finish` chunk is drained first, then
    /// reported as [`StreamError::Closed`].
    async fn read_chunk(&mut self) -> Result<Option<UiMessageChunk>, StreamError> {
        if self.done {
            return Ok(None);
        }

        loop {
            let notified = self.state.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let (next, closed) = {
                let mut buffer = self.state.lock_buffer();
                (buffer.unread.pop_front(), buffer.closed)
            };

            if let Some(chunk) = next {
                // Capacity freed for a waiting writer
                self.state.notify.notify_waiters();
                if chunk.is_finish() {
                    self.done = true;
                }
                return Ok(Some(chunk));
            }

            if closed {
                return Err(StreamError::Closed);
            }

            notified.await;
        }
    }
}

impl Drop for SharedChunkReader {
    fn drop(&mut self) {
        self.state.close();
    }
}
