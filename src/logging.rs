//! Log setup
//!
//! The UI owns the terminal, so log records go to a file instead of stderr.
//! `KEYS_CHECK_LOG` takes `env_logger` filter syntax and overrides the
//! configured level.

use crate::config::LoggingConfig;
use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "KEYS_CHECK_LOG";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Could not determine log directory")]
    NoLogDir,
    #[error("Cannot open log file {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

/// Default log file location
pub fn default_log_path() -> Result<PathBuf, LoggingError> {
    Ok(dirs::cache_dir()
        .ok_or(LoggingError::NoLogDir)?
        .join("keys-check")
        .join("keys-check.log"))
}

fn open_log_file(path: &Path) -> Result<fs::File, LoggingError> {
    let open = || -> io::Result<fs::File> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    };
    open().map_err(|source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Build a logger writing timestamped records to `target`
fn builder(config: &LoggingConfig, target: Box<dyn Write + Send>) -> Builder {
    let mut builder = Builder::from_env(Env::default().filter_or(LOG_ENV, &config.level));
    builder
        .target(Target::Pipe(target))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        });
    builder
}

/// Install the global logger. Returns the file being written to.
pub fn init(config: &LoggingConfig) -> Result<PathBuf, LoggingError> {
    let path = match &config.file {
        Some(path) => path.clone(),
        None => default_log_path()?,
    };
    let file = open_log_file(&path)?;
    builder(config, Box::new(file)).try_init()?;
    Ok(path)
}
