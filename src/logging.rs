use anyhow::Context;
use flexi_logger::Logger;

use crate::config;

pub fn init_logging() -> anyhow::Result<()> {
    // One-shot CLI: everything goes to stderr, stdout stays clean for
    // whoever wraps us in a script. RUST_LOG overrides the default level.
    Logger::try_with_env_or_str(config::logging::DEFAULT_LOG_SPEC)?
        .format(flexi_logger::detailed_format)
        .start()
        .context("failed to start logger")?;

    log::info!(
        "projector_export v{} starting on {}",
        config::TOOL_VERSION,
        std::env::consts::OS
    );

    Ok(())
}
