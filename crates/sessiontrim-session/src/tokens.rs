//! Token estimation utilities

/// Characters per token assumed by [`estimate_tokens`]
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate a token count from a byte length
///
/// This is a flat chars/4 heuristic, not a tokenizer. It is only meant for
/// before/after comparisons of the same transcript.
pub fn estimate_tokens(len: usize) -> usize {
    len / CHARS_PER_TOKEN
}
