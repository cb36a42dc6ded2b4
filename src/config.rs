use crate::stream::shared_stream::DEFAULT_CAPACITY;

static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_FAKE_PARTS: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Unread chunks a stream buffers before writes wait on the client
    pub stream_capacity: usize,
    /// Secondary chunks written between the marker and the finish chunk
    pub fake_parts: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            stream_capacity: DEFAULT_CAPACITY,
            fake_parts: DEFAULT_FAKE_PARTS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_address: lookup("CHUNK_STREAM_BIND_ADDRESS").unwrap_or(defaults.bind_address),
            stream_capacity: parse_count(
                &lookup,
                "CHUNK_STREAM_CAPACITY",
                defaults.stream_capacity,
            ),
            fake_parts: parse_count(&lookup, "CHUNK_STREAM_FAKE_PARTS", defaults.fake_parts),
        }
    }
}

fn parse_count(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> usize {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|error| {
            tracing::warn!("Ignoring {key}={raw:?}: {error}, using {default}");
            default
        }),
        None => default,
    }
}
