//! Configuration for session compaction

use crate::CompactError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result-size ceiling applied in aggressive mode
pub const AGGRESSIVE_RESULT_SIZE: usize = 500;

/// Input-size ceiling applied in aggressive mode
pub const AGGRESSIVE_INPUT_SIZE: usize = 1000;

/// Compaction configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactConfig {
    /// Most recent invocations kept per tool name, regardless of size
    pub keep_last_n: usize,

    /// Tool results smaller than this (bytes) are kept regardless of age
    pub min_result_size: usize,

    /// Tool inputs smaller than this (bytes) are kept regardless of age
    pub min_input_size: usize,

    /// Lower both size thresholds to the aggressive ceilings
    pub aggressive: bool,

    /// Report only; never write
    pub dry_run: bool,
}

/// Size thresholds after aggressive clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub min_result_size: usize,
    pub min_input_size: usize,
}

impl CompactConfig {
    pub fn new() -> Self {
        Self {
            keep_last_n: 5,
            min_result_size: 1000,
            min_input_size: 2000,
            aggressive: false,
            dry_run: false,
        }
    }

    /// Load defaults from a JSON file; a missing file yields the built-in defaults
    pub fn load(path: &Path) -> Result<Self, CompactError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path).map_err(|source| CompactError::Io {
            action: "read",
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CompactError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Thresholds actually compared against; aggressive mode only ever lowers them
    pub fn thresholds(&self) -> Thresholds {
        if self.aggressive {
            Thresholds {
                min_result_size: self.min_result_size.min(AGGRESSIVE_RESULT_SIZE),
                min_input_size: self.min_input_size.min(AGGRESSIVE_INPUT_SIZE),
            }
        } else {
            Thresholds {
                min_result_size: self.min_result_size,
                min_input_size: self.min_input_size,
            }
        }
    }
}

impl Default for CompactConfig {
    fn default() -> Self {
        Self::new()
    }
}
