//! Transcript rewriting

use sessiontrim_session::{Block, Event, EventKind, TOOL_USE_RESULT_FIELD};
use std::collections::HashSet;

/// Rewritten transcript plus what was dropped from it
#[derive(Debug, Clone, Default)]
pub struct Rewrite {
    pub events: Vec<Event>,
    pub removed_invocations: usize,
    pub removed_outcomes: usize,
    /// Events omitted because no block survived
    pub dropped_events: usize,
}

/// Drop every invocation and outcome block whose id is in `removed`
///
/// Surviving events and blocks keep their relative order. Events left with
/// no blocks are omitted, and a user event that lost an outcome also loses
/// its `toolUseResult` copy.
pub fn rewrite(events: &[Event], removed: &HashSet<String>) -> Rewrite {
    let mut out = Rewrite {
        events: Vec::with_capacity(events.len()),
        ..Rewrite::default()
    };

    for event in events {
        let filtered = match event.kind() {
            EventKind::Assistant => event.filter_blocks(|block| {
                !matches!(block, Block::ToolInvocation { id, .. } if removed.contains(id))
            }),
            EventKind::User => event.filter_blocks(|block| {
                !matches!(block, Block::ToolOutcome { invocation_id, .. } if removed.contains(invocation_id))
            }),
            EventKind::Other => None,
        };

        let Some(filtered) = filtered else {
            out.events.push(event.clone());
            continue;
        };

        match event.kind() {
            EventKind::Assistant => out.removed_invocations += filtered.removed,
            EventKind::User => out.removed_outcomes += filtered.removed,
            EventKind::Other => {}
        }

        if filtered.event.blocks().is_empty() {
            out.dropped_events += 1;
            continue;
        }

        let rewritten = match event.kind() {
            EventKind::User => filtered.event.without_field(TOOL_USE_RESULT_FIELD),
            _ => filtered.event,
        };
        out.events.push(rewritten);
    }

    tracing::debug!(
        kept = out.events.len(),
        dropped = out.dropped_events,
        removed_invocations = out.removed_invocations,
        removed_outcomes = out.removed_outcomes,
        "rewrote transcript"
    );
    out
}
