use chrono::{DateTime, Local};
use sessiontrim_session::Paths;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

struct SessionFile {
    path: PathBuf,
    modified: SystemTime,
    bytes: u64,
}

fn discover_session_files(project_dir: &Path) -> Vec<SessionFile> {
    let dir_entries = match std::fs::read_dir(project_dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut files = Vec::new();
    for file_entry in dir_entries.flatten() {
        let path = file_entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("jsonl") || !path.is_file() {
            continue;
        }
        let Ok(meta) = file_entry.metadata() else {
            continue;
        };
        files.push(SessionFile {
            path,
            modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            bytes: meta.len(),
        });
    }

    // Newest first
    files.sort_by(|a, b| b.modified.cmp(&a.modified));
    files
}

fn count_records(path: &Path) -> usize {
    std::fs::read_to_string(path)
        .map(|c| c.lines().filter(|l| !l.trim().is_empty()).count())
        .unwrap_or(0)
}

pub fn run(cwd: Option<&Path>) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let project_dir = match cwd {
        Some(dir) => paths.project_dir_for(dir),
        None => paths.project_dir()?,
    };

    let files = discover_session_files(&project_dir);
    if files.is_empty() {
        println!("No session files found in {}", project_dir.display());
        return Ok(());
    }

    println!("Sessions in {}", project_dir.display());
    println!("==================");
    for file in &files {
        let id = file
            .path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        let modified: DateTime<Local> = file.modified.into();
        println!(
            "  {}  {}  {} KB  {} records",
            id,
            modified.format("%Y-%m-%d %H:%M"),
            file.bytes / 1024,
            count_records(&file.path)
        );
    }
    Ok(())
}
