//! Logging setup for the pipeline commands.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// Defaults to `info`, which reports per-stage progress (rows loaded, dedup
/// counts, extraction totals); `RUST_LOG=lexiscope=debug` additionally
/// surfaces the per-sentence keyword diagnostics.
pub fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_level(true)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(fmt_layer).init();
    Ok(())
}
