use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ctrl_channels::{group_channels, load_channel_names, DEFAULT_PREFIX};

/// Group control-expression channel names into base categories and write
/// the category → channel-index map as JSON.
#[derive(Parser)]
#[command(name = "ctrl-channels", version, about)]
struct Cli {
    /// Channel list: a JSON string array (.json) or one name per line.
    #[arg(long)]
    input: PathBuf,

    /// Output JSON file mapping category name to channel indices.
    #[arg(long)]
    output: PathBuf,

    /// Prefix a channel name must carry to participate.
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let names = load_channel_names(&cli.input)?;
    let groups = group_channels(&names, &cli.prefix);
    let grouped: usize = groups.values().map(|indices| indices.len()).sum();
    tracing::info!(
        channels = names.len(),
        grouped,
        categories = groups.len(),
        "Grouped channel names"
    );

    let file = std::fs::File::create(&cli.output)
        .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", cli.output.display()))?;
    serde_json::to_writer_pretty(file, &groups)?;
    tracing::info!(output = %cli.output.display(), "Wrote category index map");

    Ok(())
}
