//! Compaction report and its markdown rendering

use crate::accounting::TokenBreakdown;
use crate::policy::RetentionDecision;
use crate::rewrite::Rewrite;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Outcome of one compaction run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionReport {
    /// Old ids whose result crossed the result-size threshold
    pub truncated_results: usize,
    /// Old ids whose input crossed the input-size threshold
    pub truncated_inputs: usize,
    /// Tool invocation blocks removed from the transcript
    pub removed_invocations: usize,
    /// Tool result blocks removed from the transcript
    pub removed_outcomes: usize,
    /// Records omitted entirely because nothing was left in them
    pub dropped_events: usize,
    pub before_breakdown: TokenBreakdown,
    pub after_breakdown: TokenBreakdown,
    pub before_total: usize,
    pub after_total: usize,
    pub tokens_saved: usize,
    pub file: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<PathBuf>,
    #[serde(default)]
    pub dry_run: bool,
}

impl CompactionReport {
    pub fn new(
        file: &Path,
        decision: &RetentionDecision,
        rewrite: &Rewrite,
        before: TokenBreakdown,
        after: TokenBreakdown,
        dry_run: bool,
    ) -> Self {
        let before_total = before.total();
        let after_total = after.total();
        Self {
            truncated_results: decision.result_triggered.len(),
            truncated_inputs: decision.input_triggered.len(),
            removed_invocations: rewrite.removed_invocations,
            removed_outcomes: rewrite.removed_outcomes,
            dropped_events: rewrite.dropped_events,
            before_breakdown: before,
            after_breakdown: after,
            before_total,
            after_total,
            tokens_saved: before_total.saturating_sub(after_total),
            file: file.to_path_buf(),
            backup: None,
            dry_run,
        }
    }

    /// True when a live run would rewrite the file without changing it
    pub fn is_noop(&self) -> bool {
        self.removed_invocations == 0 && self.removed_outcomes == 0
    }
}

/// Render a report as a markdown table of estimated tokens per category
pub fn format_summary(report: &CompactionReport) -> String {
    let before = report.before_total;
    let after = report.after_total;

    let header = if report.dry_run {
        "## Compaction Preview (dry run)"
    } else {
        "## Session Compacted"
    };
    let mut lines = vec![
        header.to_string(),
        String::new(),
        "| Category | Before | After |".to_string(),
        "|----------|-------:|------:|".to_string(),
    ];

    let after_categories = report.after_breakdown.categories();
    for ((name, b), (_, a)) in report
        .before_breakdown
        .categories()
        .into_iter()
        .zip(after_categories)
    {
        if b > 0 || a > 0 {
            lines.push(format!(
                "| {} | {} | {} |",
                title_case(name),
                pct(b, before),
                pct(a, after)
            ));
        }
    }

    lines.push(format!(
        "| **Total** | **{}** | **{}** |",
        thousands(before),
        thousands(after)
    ));

    lines.join("\n")
}

fn pct(val: usize, total: usize) -> String {
    if total == 0 {
        return format!("{} (0%)", thousands(val));
    }
    format!("{} ({}%)", thousands(val), val * 100 / total)
}

fn title_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
