use crate::cli::CompactArgs;
use sessiontrim_core::{compact, compact_session, format_summary, CompactConfig, CompactionReport};
use sessiontrim_session::Paths;

/// Built-in defaults, then the config file, then command-line flags
fn resolve_config(args: &CompactArgs, paths: &Paths) -> anyhow::Result<CompactConfig> {
    let config_path = args.config.clone().unwrap_or_else(|| paths.config_file());
    let mut config = CompactConfig::load(&config_path)?;

    if let Some(n) = args.keep_last {
        config.keep_last_n = n;
    }
    if let Some(size) = args.min_result_size {
        config.min_result_size = size;
    }
    if let Some(size) = args.min_input_size {
        config.min_input_size = size;
    }
    config.aggressive |= args.aggressive;
    config.dry_run |= args.dry_run;

    Ok(config)
}

fn render(report: &CompactionReport, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let mut out = format_summary(report);
    out.push_str(&format!(
        "\n\nRemoved {} tool calls and {} tool results ({} records dropped), ~{} tokens saved",
        report.removed_invocations,
        report.removed_outcomes,
        report.dropped_events,
        report.tokens_saved
    ));
    if let Some(backup) = &report.backup {
        out.push_str(&format!("\nBackup: {}", backup.display()));
    }
    Ok(out)
}

pub fn run(args: &CompactArgs) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let config = resolve_config(args, &paths)?;

    let result = match &args.file {
        Some(file) => compact(file, &config),
        None => {
            let Some(session) = args.session.as_deref() else {
                anyhow::bail!("a session id or --file is required");
            };
            let cwd = match &args.cwd {
                Some(cwd) => cwd.clone(),
                None => std::env::current_dir()?,
            };
            compact_session(&paths, session, &cwd, &config)
        }
    };

    let report = match result {
        Ok(report) => report,
        Err(e) if e.is_not_found() => {
            println!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", render(&report, args.json)?);
    Ok(())
}
