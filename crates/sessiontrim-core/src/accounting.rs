//! Approximate token accounting per content category

use serde::{Deserialize, Serialize};
use sessiontrim_session::{estimate_tokens, Block, Content, Event, EventKind};

/// Estimated tokens per content category
///
/// Values come from [`estimate_tokens`] (bytes / 4), so they are only
/// useful for comparing two versions of the same transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBreakdown {
    pub tool_results: usize,
    pub tool_inputs: usize,
    pub assistant_text: usize,
    pub user_text: usize,
}

impl TokenBreakdown {
    /// Scan every event once and estimate each category
    ///
    /// Assistant text is only counted from text blocks; a plain-string
    /// assistant body contributes nothing. User text counts either shape.
    pub fn measure(events: &[Event]) -> Self {
        let mut tool_results = 0usize;
        let mut tool_inputs = 0usize;
        let mut assistant_text = 0usize;
        let mut user_text = 0usize;

        for event in events {
            match (event.kind(), event.content()) {
                (EventKind::Assistant, Some(Content::Blocks(blocks))) => {
                    for block in blocks {
                        match block {
                            Block::Text { content } => assistant_text += content.len(),
                            Block::ToolInvocation { payload, .. } => {
                                tool_inputs += Block::encoded_len(payload)
                            }
                            _ => {}
                        }
                    }
                }
                (EventKind::User, Some(Content::Text(text))) => user_text += text.len(),
                (EventKind::User, Some(Content::Blocks(blocks))) => {
                    for block in blocks {
                        match block {
                            Block::Text { content } => user_text += content.len(),
                            Block::ToolOutcome { payload, .. } => {
                                tool_results += Block::rendered_len(payload)
                            }
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }

        Self {
            tool_results: estimate_tokens(tool_results),
            tool_inputs: estimate_tokens(tool_inputs),
            assistant_text: estimate_tokens(assistant_text),
            user_text: estimate_tokens(user_text),
        }
    }

    pub fn total(&self) -> usize {
        self.tool_results + self.tool_inputs + self.assistant_text + self.user_text
    }

    /// Categories in display order
    pub fn categories(&self) -> [(&'static str, usize); 4] {
        [
            ("tool_results", self.tool_results),
            ("tool_inputs", self.tool_inputs),
            ("assistant_text", self.assistant_text),
            ("user_text", self.user_text),
        ]
    }
}
