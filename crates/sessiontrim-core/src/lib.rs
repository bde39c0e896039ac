//! Session compaction: drop old, large tool pairs from a transcript

mod accounting;
mod compact;
mod config;
mod error;
pub mod guard;
mod index;
mod policy;
mod report;
mod rewrite;

pub use accounting::TokenBreakdown;
pub use compact::{compact, compact_session};
pub use config::{CompactConfig, Thresholds, AGGRESSIVE_INPUT_SIZE, AGGRESSIVE_RESULT_SIZE};
pub use error::CompactError;
pub use index::{InvocationRecord, PairIndex};
pub use policy::RetentionDecision;
pub use report::{format_summary, CompactionReport};
pub use rewrite::{rewrite, Rewrite};
