use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub struct Logging;

impl Logging {
    /// Installs the global subscriber: console output plus a daily-rolled
    /// file in `log_dir`. The returned guard must be held for the process
    /// lifetime or buffered file output is lost. Intended for embedding
    /// applications; the library itself never installs a subscriber.
    pub fn initialize(log_dir: impl AsRef<Path>) -> WorkerGuard {
        let file_appender = tracing_appender::rolling::daily(log_dir, "dropvault.log");
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .with(fmt::layer())
            .with(fmt::layer().with_writer(file_writer).with_ansi(false))
            .init();

        guard
    }
}
