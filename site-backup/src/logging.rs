//! Process-wide tracing setup: console output plus a size-bounded log file
//!
//! Logging comes up in two steps. [`init_console_logging`] installs the
//! subscriber before anything else runs, so configuration loading is already
//! visible on the console. Once the `[logging]` section is known,
//! [`LogFileHandle::attach`] adds the file layer to the running subscriber.

use anyhow::{anyhow, Result};
use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::{Identity, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::config::LoggingConfig;

type FileLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Slot for the file layer in the global subscriber
pub struct LogFileHandle {
    handle: reload::Handle<FileLayer, Registry>,
}

/// Install the global subscriber with console output only
pub fn init_console_logging() -> Result<LogFileHandle> {
    let (file_slot, handle) = reload::Layer::new(Box::new(Identity::new()) as FileLayer);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("site_backup=info".parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("lettre=warn".parse()?);

    tracing_subscriber::registry()
        .with(file_slot)
        .with(env_filter)
        .with(fmt::layer())
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(LogFileHandle { handle })
}

impl LogFileHandle {
    /// Start writing every console line to the rotating log file as well.
    ///
    /// The returned guard flushes the file writer on drop and must be held
    /// for the lifetime of the process.
    pub fn attach(&self, config: &LoggingConfig) -> Result<WorkerGuard> {
        let (file_writer, guard) = tracing_appender::non_blocking(rotating_writer(config)?);

        let layer: FileLayer = fmt::layer()
            .with_ansi(false)
            .with_writer(file_writer)
            .boxed();
        self.handle
            .reload(layer)
            .map_err(|e| anyhow!("Failed to attach log file: {}", e))?;

        Ok(guard)
    }
}

/// `{directory}/{file_name}`, rotated to `.1`, `.2`, ... once it reaches `max_bytes`
pub fn rotating_writer(config: &LoggingConfig) -> Result<FileRotate<AppendCount>> {
    std::fs::create_dir_all(&config.directory)
        .map_err(|e| anyhow!("Failed to create log directory {}: {}", config.directory, e))?;

    let path = Path::new(&config.directory).join(&config.file_name);
    Ok(FileRotate::new(
        path,
        AppendCount::new(config.backup_count),
        ContentLimit::Bytes(config.max_bytes.max(1)),
        Compression::None,
        #[cfg(unix)]
        None,
    ))
}
