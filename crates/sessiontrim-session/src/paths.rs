//! Path resolution for session transcripts

use std::path::{Path, PathBuf};

/// Resolves standard paths under `~/.claude`
#[derive(Debug, Clone)]
pub struct Paths {
    pub home_claude: PathBuf,
}

impl Paths {
    /// Create a resolver rooted at the user's home directory
    pub fn new() -> std::io::Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;
        Ok(Self::with_home(&home))
    }

    /// Create a resolver rooted at an explicit home directory
    pub fn with_home(home: &Path) -> Self {
        Self {
            home_claude: home.join(".claude"),
        }
    }

    /// Directory holding one sub-directory of transcripts per project
    pub fn projects_dir(&self) -> PathBuf {
        self.home_claude.join("projects")
    }

    /// Transcript directory for a project rooted at `cwd`
    pub fn project_dir_for(&self, cwd: &Path) -> PathBuf {
        let hash = cwd.to_string_lossy().replace(['/', '.'], "-");
        self.projects_dir().join(hash)
    }

    /// Transcript directory for the current working directory
    pub fn project_dir(&self) -> std::io::Result<PathBuf> {
        let cwd = std::env::current_dir()?;
        Ok(self.project_dir_for(&cwd))
    }

    /// Transcript file for a session started in `cwd`
    pub fn session_file(&self, cwd: &Path, session_id: &str) -> PathBuf {
        self.project_dir_for(cwd).join(format!("{session_id}.jsonl"))
    }

    /// Optional compactor defaults
    pub fn config_file(&self) -> PathBuf {
        self.home_claude.join("sessiontrim.json")
    }
}
