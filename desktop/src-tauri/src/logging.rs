//! Tracing output for the desktop app.
//!
//! Everything goes to stderr and to a daily file under `<log root>/logs`.
//! `RUST_LOG` replaces the default filter when set.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

const FILE_PREFIX: &str = "ark-desktop";
const FILE_SUFFIX: &str = "log";
const RETAINED_FILES: usize = 7;
const DEFAULT_DIRECTIVES: &str = "info,ark_shell=debug";

/// Location and naming of the rolling log files.
pub struct LogFiles {
    dir: PathBuf,
}

impl LogFiles {
    pub fn new(log_root: &Path) -> Self {
        Self {
            dir: log_root.join("logs"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File written today. The appender dates files in UTC.
    pub fn today(&self) -> PathBuf {
        let date = chrono::Utc::now().format("%Y-%m-%d");
        self.dir.join(format!("{FILE_PREFIX}.{date}.{FILE_SUFFIX}"))
    }

    /// Daily appender that prunes anything past the retention count.
    pub fn appender(&self) -> Result<RollingFileAppender, InitError> {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .max_log_files(RETAINED_FILES)
            .filename_prefix(FILE_PREFIX)
            .filename_suffix(FILE_SUFFIX)
            .build(&self.dir)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber. Fails if one is already set.
pub fn setup_logging(log_root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let files = LogFiles::new(log_root);
    std::fs::create_dir_all(files.dir())?;

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_thread_names(true)
        .with_writer(files.appender()?);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

pub fn logs_dir(log_root: &Path) -> PathBuf {
    LogFiles::new(log_root).dir().to_path_buf()
}

pub fn current_log_path(log_root: &Path) -> PathBuf {
    LogFiles::new(log_root).today()
}
