//! Compaction entry points

use crate::accounting::TokenBreakdown;
use crate::config::CompactConfig;
use crate::guard;
use crate::index::PairIndex;
use crate::policy::RetentionDecision;
use crate::report::CompactionReport;
use crate::rewrite::rewrite;
use crate::CompactError;
use sessiontrim_session::{read_events, Paths};
use std::path::Path;

/// Compact a session transcript by removing old, large tool pairs
///
/// Only pairs that are both old (outside the last `keep_last_n` per tool
/// name) and large (input or result at or above its threshold) are removed,
/// and always as a pair.
///
/// In live mode the original is copied to `<name>.bak` before it is
/// overwritten. A transcript with no records is left alone. No locking is
/// done: the caller must make sure nothing appends to the file while this
/// runs.
pub fn compact(path: &Path, config: &CompactConfig) -> Result<CompactionReport, CompactError> {
    let events = read_events(path)?;
    tracing::debug!(path = %path.display(), records = events.len(), "loaded session");

    let index = PairIndex::build(&events);
    let decision = RetentionDecision::decide(&index, config);
    let rewritten = rewrite(&events, &decision.removed);

    let before = TokenBreakdown::measure(&events);
    let after = TokenBreakdown::measure(&rewritten.events);
    let mut report = CompactionReport::new(
        path,
        &decision,
        &rewritten,
        before,
        after,
        config.dry_run,
    );

    if config.dry_run {
        return Ok(report);
    }
    if events.is_empty() {
        tracing::debug!(path = %path.display(), "empty session, nothing to write");
        return Ok(report);
    }

    report.backup = Some(guard::persist(path, &rewritten.events)?);
    Ok(report)
}

/// Compact the transcript of `session_id` started in `cwd`
pub fn compact_session(
    paths: &Paths,
    session_id: &str,
    cwd: &Path,
    config: &CompactConfig,
) -> Result<CompactionReport, CompactError> {
    let sessions_dir = paths.project_dir_for(cwd);
    if !sessions_dir.is_dir() {
        return Err(CompactError::SessionsDirNotFound { path: sessions_dir });
    }

    let session_file = paths.session_file(cwd, session_id);
    if !session_file.exists() {
        return Err(CompactError::NotFound { path: session_file });
    }

    compact(&session_file, config)
}
