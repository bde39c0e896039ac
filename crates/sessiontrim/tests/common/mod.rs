#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// `{"data":""}` framing around the padding in [`input_of_size`]
const INPUT_FRAMING: usize = 11;

/// A tool input whose compact JSON encoding is exactly `bytes` long
pub fn input_of_size(bytes: usize) -> Value {
    assert!(bytes >= INPUT_FRAMING, "input must be at least {INPUT_FRAMING} bytes");
    json!({"data": "x".repeat(bytes - INPUT_FRAMING)})
}

/// Builds session transcripts line by line
#[derive(Default)]
pub struct SessionBuilder {
    records: Vec<Value>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_text(mut self, text: &str) -> Self {
        let n = self.records.len();
        self.records.push(json!({
            "type": "user",
            "n": n,
            "message": {"role": "user", "content": text}
        }));
        self
    }

    /// Assistant record with one tool call of `input_bytes`
    pub fn tool_call(self, id: &str, name: &str, input_bytes: usize) -> Self {
        self.tool_calls(&[(id, name, input_bytes)])
    }

    /// Assistant record with a text block followed by several tool calls
    pub fn tool_calls(mut self, calls: &[(&str, &str, usize)]) -> Self {
        let n = self.records.len();
        let mut content = vec![json!({"type": "text", "text": "Let me check."})];
        for (id, name, input_bytes) in calls {
            content.push(json!({
                "type": "tool_use",
                "id": id,
                "name": name,
                "input": input_of_size(*input_bytes)
            }));
        }
        self.records.push(json!({
            "type": "assistant",
            "n": n,
            "message": {"role": "assistant", "content": content}
        }));
        self
    }

    /// User record answering `id` with `result_bytes` of output
    pub fn tool_result(mut self, id: &str, result_bytes: usize) -> Self {
        let n = self.records.len();
        let output = "r".repeat(result_bytes);
        self.records.push(json!({
            "type": "user",
            "n": n,
            "message": {"role": "user", "content": [
                {"type": "tool_result", "tool_use_id": id, "content": output}
            ]},
            "toolUseResult": {"stdout": output}
        }));
        self
    }

    /// Call plus its result
    pub fn pair(self, id: &str, name: &str, input_bytes: usize, result_bytes: usize) -> Self {
        self.tool_call(id, name, input_bytes)
            .tool_result(id, result_bytes)
    }

    pub fn raw(mut self, record: Value) -> Self {
        self.records.push(record);
        self
    }

    pub fn write(&self, dir: &Path) -> PathBuf {
        let path = dir.join("session.jsonl");
        let content: String = self
            .records
            .iter()
            .map(|r| format!("{r}\n"))
            .collect();
        std::fs::write(&path, content).unwrap();
        path
    }
}

pub fn read_records(path: &Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn block_ids(records: &[Value], record_type: &str, block_type: &str, key: &str) -> Vec<String> {
    records
        .iter()
        .filter(|r| r["type"] == record_type)
        .filter_map(|r| r["message"]["content"].as_array())
        .flatten()
        .filter(|b| b["type"] == block_type)
        .filter_map(|b| b[key].as_str().map(String::from))
        .collect()
}

pub fn tool_use_ids(records: &[Value]) -> Vec<String> {
    block_ids(records, "assistant", "tool_use", "id")
}

pub fn tool_result_ids(records: &[Value]) -> Vec<String> {
    block_ids(records, "user", "tool_result", "tool_use_id")
}

/// `n` markers of the surviving records, in file order
pub fn record_numbers(records: &[Value]) -> Vec<u64> {
    records.iter().filter_map(|r| r["n"].as_u64()).collect()
}
