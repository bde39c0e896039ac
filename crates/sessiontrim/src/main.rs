mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compact(args) => commands::compact::run(&args),
        Commands::Sessions { cwd } => commands::sessions::run(cwd.as_deref()),
        Commands::Version => commands::version::run(),
    }
}
