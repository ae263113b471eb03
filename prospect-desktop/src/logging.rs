use anyhow::Result;
use prospect_core::config::LoggingSettings;
use prospect_infrastructure::paths::ProspectPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Sends logs to a daily rolling file under the logs directory.
///
/// `RUST_LOG` wins over the configured level. The terminal stays free of log
/// lines because it is the user interface. Keep the returned guard alive
/// until exit so buffered lines get flushed.
pub fn init(paths: &ProspectPaths, settings: &LoggingSettings) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&settings.level))?;

    let logs_dir = paths.logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;
    let appender = tracing_appender::rolling::daily(&logs_dir, "prospect.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("[Main] Logging to {:?}", logs_dir);
    Ok(guard)
}
