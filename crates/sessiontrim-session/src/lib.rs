//! Claude Code session transcripts: record model, JSONL I/O and path resolution

mod error;
mod io;
mod paths;
mod tokens;
mod types;

pub use error::SessionError;
pub use io::{atomic_write, read_events, write_events};
pub use paths::Paths;
pub use tokens::{estimate_tokens, CHARS_PER_TOKEN};
pub use types::{Block, Content, Event, EventKind, FilteredEvent, TOOL_USE_RESULT_FIELD};
