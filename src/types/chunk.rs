use serde::{Deserialize, Serialize};

/// A single chunk written to the outbound chat stream.
///
/// The set is closed on purpose: the chat client keys its replay logic on the
/// `type` tag, so every shape the writer can produce lives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiMessageChunk {
    /// Marks a prior user turn so the client can rebuild it on replay.
    #[serde(rename = "data-workflow")]
    DataWorkflow { data: WorkflowData },
    /// Secondary data chunk placed ahead of the assistant `start` chunk.
    #[serde(rename = "data-fakePart")]
    DataFakePart { data: FakePartData },
    /// End of stream.
    #[serde(rename = "finish")]
    Finish,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkflowData {
    #[serde(rename = "user-message")]
    UserMessage {
        id: String,
        content: String,
        timestamp: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FakePartData {
    #[serde(rename = "extra-data")]
    ExtraData { content: String, timestamp: i64 },
}

impl UiMessageChunk {
    pub fn user_message(id: String, content: String, timestamp: i64) -> Self {
        UiMessageChunk::DataWorkflow {
            data: WorkflowData::UserMessage {
                id,
                content,
                timestamp,
            },
        }
    }

    pub fn extra_data(content: String, timestamp: i64) -> Self {
        UiMessageChunk::DataFakePart {
            data: FakePartData::ExtraData { content, timestamp },
        }
    }

    /// Wire tag of the outer chunk, handy for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            UiMessageChunk::DataWorkflow { .. } => "data-workflow",
            UiMessageChunk::DataFakePart { .. } => "data-fakePart",
            UiMessageChunk::Finish => "finish",
        }
    }

    pub fn is_finish(&self) -> bool {
        matches!(self, UiMessageChunk::Finish)
    }
}
