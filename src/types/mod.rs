pub mod chunk;

pub use chunk::{FakePartData, UiMessageChunk, WorkflowData};
