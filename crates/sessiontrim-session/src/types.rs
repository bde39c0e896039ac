//! Transcript record types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field carrying the structured copy of a tool result on user records
pub const TOOL_USE_RESULT_FIELD: &str = "toolUseResult";

/// Record kind, taken from the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Assistant,
    User,
    Other,
}

impl EventKind {
    fn from_type(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("assistant") => EventKind::Assistant,
            Some("user") => EventKind::User,
            _ => EventKind::Other,
        }
    }
}

/// One content unit inside a message
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text {
        content: String,
    },
    ToolInvocation {
        id: String,
        name: String,
        payload: Value,
    },
    ToolOutcome {
        invocation_id: String,
        payload: Value,
    },
    /// Thinking, images and anything else; kept opaque
    Other,
}

impl Block {
    /// Decode one content item of a `kind` record
    ///
    /// Only assistant records must give every `tool_use` a string id; a
    /// stray one elsewhere is kept opaque.
    fn from_value(kind: EventKind, value: &Value) -> Result<Self, String> {
        let Some(obj) = value.as_object() else {
            return Ok(Block::Other);
        };

        let block = match obj.get("type").and_then(Value::as_str) {
            Some("text") => Block::Text {
                content: obj
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            },
            Some("tool_use") => {
                let id = match (obj.get("id").and_then(Value::as_str), kind) {
                    (Some(id), _) => id,
                    (None, EventKind::Assistant) => {
                        return Err("tool_use block without a string id".to_string())
                    }
                    (None, _) => return Ok(Block::Other),
                };
                Block::ToolInvocation {
                    id: id.to_string(),
                    name: obj
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown")
                        .to_string(),
                    payload: obj
                        .get("input")
                        .cloned()
                        .unwrap_or_else(|| Value::Object(Map::new())),
                }
            }
            Some("tool_result") => match obj.get("tool_use_id").and_then(Value::as_str) {
                Some(id) => Block::ToolOutcome {
                    invocation_id: id.to_string(),
                    payload: obj
                        .get("content")
                        .cloned()
                        .unwrap_or_else(|| Value::String(String::new())),
                },
                // Nothing to correlate it with
                None => Block::Other,
            },
            _ => Block::Other,
        };
        Ok(block)
    }

    /// Byte length of a tool invocation's payload in compact JSON encoding
    pub fn encoded_len(payload: &Value) -> usize {
        payload.to_string().len()
    }

    /// Byte length of a tool outcome rendered as text
    ///
    /// String content is measured as-is, structured content by its compact
    /// JSON encoding, null as empty.
    pub fn rendered_len(payload: &Value) -> usize {
        match payload {
            Value::String(s) => s.len(),
            Value::Null => 0,
            other => other.to_string().len(),
        }
    }
}

/// Typed view of `message.content`
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Blocks(Vec<Block>),
}

/// One transcript line
///
/// The decoded record is kept whole so fields the compactor does not know
/// about survive a rewrite. Events read from disk also keep their source
/// line, which is written back verbatim when the event is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    kind: EventKind,
    record: Map<String, Value>,
    content: Option<Content>,
    line: Option<String>,
}

/// Result of dropping blocks from an event
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredEvent {
    pub event: Event,
    pub removed: usize,
}

impl Event {
    /// Decode one JSONL line
    pub fn from_line(line: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(line).map_err(|e| e.to_string())?;
        let mut event = Self::from_value(value)?;
        event.line = Some(line.to_string());
        Ok(event)
    }

    /// Build an event from an already decoded record
    pub fn from_value(value: Value) -> Result<Self, String> {
        let Value::Object(record) = value else {
            return Err("record is not a JSON object".to_string());
        };

        let kind = EventKind::from_type(record.get("type"));
        let content = match kind {
            EventKind::Assistant | EventKind::User => parse_content(kind, &record)?,
            EventKind::Other => None,
        };

        Ok(Self {
            kind,
            record,
            content,
            line: None,
        })
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    /// Content blocks, empty unless the content is a block list
    pub fn blocks(&self) -> &[Block] {
        match &self.content {
            Some(Content::Blocks(blocks)) => blocks,
            _ => &[],
        }
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.record.contains_key(key)
    }

    /// Encode as a single JSONL line (without the trailing newline)
    pub fn to_line(&self) -> serde_json::Result<String> {
        match &self.line {
            Some(line) => Ok(line.clone()),
            None => serde_json::to_string(&self.record),
        }
    }

    /// Keep only the blocks accepted by `keep`
    ///
    /// Returns `None` when nothing would be dropped, so callers can pass
    /// the original event through. The returned event may hold zero blocks.
    pub fn filter_blocks<F>(&self, mut keep: F) -> Option<FilteredEvent>
    where
        F: FnMut(&Block) -> bool,
    {
        let Some(Content::Blocks(blocks)) = &self.content else {
            return None;
        };
        let raw = self
            .record
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(Value::as_array)?;

        let mut kept_blocks = Vec::with_capacity(blocks.len());
        let mut kept_raw = Vec::with_capacity(blocks.len());
        for (block, value) in blocks.iter().zip(raw) {
            if keep(block) {
                kept_blocks.push(block.clone());
                kept_raw.push(value.clone());
            }
        }

        let removed = blocks.len() - kept_blocks.len();
        if removed == 0 {
            return None;
        }

        let mut record = self.record.clone();
        if let Some(Value::Object(message)) = record.get_mut("message") {
            message.insert("content".to_string(), Value::Array(kept_raw));
        }

        Some(FilteredEvent {
            event: Self {
                kind: self.kind,
                record,
                content: Some(Content::Blocks(kept_blocks)),
                line: None,
            },
            removed,
        })
    }

    /// Drop a top-level field
    pub fn without_field(mut self, key: &str) -> Self {
        if self.record.shift_remove(key).is_some() {
            self.line = None;
        }
        self
    }
}

fn parse_content(kind: EventKind, record: &Map<String, Value>) -> Result<Option<Content>, String> {
    let content = record.get("message").and_then(|m| m.get("content"));
    match content {
        Some(Value::String(text)) => Ok(Some(Content::Text(text.clone()))),
        Some(Value::Array(items)) => {
            let blocks = items
                .iter()
                .map(|item| Block::from_value(kind, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(Content::Blocks(blocks)))
        }
        _ => Ok(None),
    }
}
