//! Tool invocation / outcome pairing

use sessiontrim_session::{Block, Event, EventKind};
use std::collections::HashMap;

/// What the index knows about one tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRecord {
    pub name: String,
    /// Compact JSON length of the input, in bytes
    pub payload_size: usize,
    /// Index of the owning event in the transcript
    pub position: usize,
}

/// Invocations and outcomes of one transcript, joined by invocation id
#[derive(Debug, Clone, Default)]
pub struct PairIndex {
    pub invocations: HashMap<String, InvocationRecord>,
    /// Outcome size in bytes, keyed by the invocation id it answers
    pub outcomes: HashMap<String, usize>,
    /// Invocation ids in encounter order
    pub invocation_order: Vec<String>,
}

impl PairIndex {
    /// Index a transcript in one forward pass
    ///
    /// Duplicate ids are tolerated: the last record wins.
    pub fn build(events: &[Event]) -> Self {
        let mut index = Self::default();

        for (position, event) in events.iter().enumerate() {
            match event.kind() {
                EventKind::Assistant => {
                    for block in event.blocks() {
                        if let Block::ToolInvocation { id, name, payload } = block {
                            let record = InvocationRecord {
                                name: name.clone(),
                                payload_size: Block::encoded_len(payload),
                                position,
                            };
                            if index.invocations.insert(id.clone(), record).is_some() {
                                tracing::warn!(id = %id, position, "duplicate tool invocation id");
                            }
                            index.invocation_order.push(id.clone());
                        }
                    }
                }
                EventKind::User => {
                    for block in event.blocks() {
                        if let Block::ToolOutcome {
                            invocation_id,
                            payload,
                        } = block
                        {
                            let size = Block::rendered_len(payload);
                            if index.outcomes.insert(invocation_id.clone(), size).is_some() {
                                tracing::warn!(id = %invocation_id, position, "duplicate tool result id");
                            }
                        }
                    }
                }
                EventKind::Other => {}
            }
        }

        tracing::debug!(
            invocations = index.invocations.len(),
            outcomes = index.outcomes.len(),
            "indexed tool pairs"
        );
        index
    }

    /// Outcomes whose invocation never appears in the transcript
    pub fn orphan_outcomes(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .keys()
            .filter(|id| !self.invocations.contains_key(*id))
            .map(String::as_str)
    }
}
