//! Retention policy: drop pairs that are both old and large

use crate::config::CompactConfig;
use crate::index::PairIndex;
use std::collections::{HashMap, HashSet};

/// Which invocation ids a run keeps and removes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionDecision {
    /// Most recent `keep_last_n` invocations per tool name
    pub recent: HashSet<String>,
    /// Old ids whose result reached the result-size threshold
    pub result_triggered: HashSet<String>,
    /// Old ids whose input reached the input-size threshold
    pub input_triggered: HashSet<String>,
    /// Union of both triggers; every id here loses invocation and result alike
    pub removed: HashSet<String>,
}

impl RetentionDecision {
    pub fn decide(index: &PairIndex, config: &CompactConfig) -> Self {
        let thresholds = config.thresholds();

        let mut per_name: HashMap<&str, usize> = HashMap::new();
        let mut recent = HashSet::new();
        for id in index.invocation_order.iter().rev() {
            let name = index
                .invocations
                .get(id)
                .map(|record| record.name.as_str())
                .unwrap_or("unknown");
            let seen = per_name.entry(name).or_default();
            if *seen < config.keep_last_n {
                recent.insert(id.clone());
                *seen += 1;
            }
        }

        let result_triggered: HashSet<String> = index
            .outcomes
            .iter()
            .filter(|(id, &size)| !recent.contains(*id) && size >= thresholds.min_result_size)
            .map(|(id, _)| id.clone())
            .collect();

        let input_triggered: HashSet<String> = index
            .invocations
            .iter()
            .filter(|(id, record)| {
                !recent.contains(*id) && record.payload_size >= thresholds.min_input_size
            })
            .map(|(id, _)| id.clone())
            .collect();

        let removed = result_triggered.union(&input_triggered).cloned().collect();

        tracing::debug!(
            recent = recent.len(),
            result_triggered = result_triggered.len(),
            input_triggered = input_triggered.len(),
            ?thresholds,
            "retention decided"
        );

        Self {
            recent,
            result_triggered,
            input_triggered,
            removed,
        }
    }

    pub fn is_removed(&self, id: &str) -> bool {
        self.removed.contains(id)
    }
}
