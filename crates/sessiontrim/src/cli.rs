use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sessiontrim")]
#[command(version)]
#[command(about = "Compact Claude Code session transcripts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove old, large tool calls from a session transcript
    Compact(CompactArgs),

    /// List session transcripts for a project
    Sessions {
        /// Project directory (defaults to the current directory)
        #[arg(long)]
        cwd: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

#[derive(Args, Debug, Default)]
pub struct CompactArgs {
    /// Session id, resolved under ~/.claude/projects
    #[arg(required_unless_present = "file")]
    pub session: Option<String>,

    /// Path to a session JSONL, instead of a session id
    #[arg(short, long, conflicts_with = "session")]
    pub file: Option<PathBuf>,

    /// Project directory the session belongs to (defaults to the current directory)
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Config file (defaults to ~/.claude/sessiontrim.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep the last N calls of each tool regardless of size
    #[arg(long)]
    pub keep_last: Option<usize>,

    /// Only remove tool results at least this many bytes
    #[arg(long)]
    pub min_result_size: Option<usize>,

    /// Only remove tool inputs at least this many bytes
    #[arg(long)]
    pub min_input_size: Option<usize>,

    /// Lower the size thresholds to 500/1000 bytes
    #[arg(long)]
    pub aggressive: bool,

    /// Show what would be removed without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
