pub fn run() -> anyhow::Result<()> {
    println!("sessiontrim {}", env!("CARGO_PKG_VERSION"));
    println!("Removes old, large tool calls from Claude Code session transcripts");
    Ok(())
}
