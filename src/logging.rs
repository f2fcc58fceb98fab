use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "drumkit.log";
pub const LOG_ENV: &str = "DRUMKIT_LOG";

// The terminal belongs to the tui while we run, so logs go to a file in the
// kit dir. Filter comes from DRUMKIT_LOG (e.g. "drumkit=debug"), default info.
pub fn init(kit_dir: &Path) -> anyhow::Result<()> {
    let path = kit_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(())
}
