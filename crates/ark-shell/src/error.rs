use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error(
        "Cannot find the standalone web server (looked in: {}). Run `pnpm build` before packaging. {location}",
        display_paths(.candidates)
    )]
    EntryPointNotFound {
        candidates: Vec<PathBuf>,
        location: ErrorLocation,
    },

    #[error("Failed to spawn server process {program}: {source} {location}")]
    ProcessSpawn {
        program: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to signal server process {pid}: {message} {location}")]
    ProcessSignal {
        pid: u32,
        message: String,
        location: ErrorLocation,
    },

    #[error("Server process {pid} is already running {location}")]
    ServerAlreadyRunning { pid: u32, location: ErrorLocation },

    #[error("Invalid target URL {url}: {message} {location}")]
    InvalidTarget {
        url: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Configuration invalid: {message} {location}")]
    ConfigInvalid {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to parse config at {path}: {source} {location}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
        location: ErrorLocation,
    },

    #[error("Transport error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server at {target} did not respond after {attempts} attempts: {last_error} {location}")]
    ReadinessExhausted {
        target: String,
        attempts: u32,
        last_error: String,
        location: ErrorLocation,
    },

    #[error("Display error: {message} {location}")]
    Display {
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error: {source} {location}")]
    Io {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl ShellError {
    /// Whether this error is recoverable via retry
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::ReadinessExhausted { .. })
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::EntryPointNotFound { .. } => {
                "The web server build is missing. \
                   Run `pnpm build` before packaging the desktop app."
            }
            Self::ProcessSpawn { .. } => {
                "Unable to start the web server. \
                   Check that Node.js is installed or set ARK_NODE_BINARY."
            }
            Self::ServerAlreadyRunning { .. } => {
                "The web server is already running. \
                   Restart it from the tray menu instead."
            }
            Self::ReadinessExhausted { .. } => {
                "The web server did not answer in time. \
                   Try Restart Server from the tray or check the logs."
            }
            Self::InvalidTarget { .. } | Self::ConfigInvalid { .. } | Self::ConfigParse { .. } => {
                "Configuration has invalid settings. \
                   Check shell.toml and the ARK_* / NEXT_* environment variables."
            }
            _ => "An unexpected error occurred. Please check the logs for details.",
        }
    }

    /// Creates EntryPointNotFound error at caller location.
    #[track_caller]
    pub fn entry_point_not_found(candidates: Vec<PathBuf>) -> Self {
        Self::EntryPointNotFound {
            candidates,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates ProcessSpawn error at caller location.
    #[track_caller]
    pub fn process_spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::ProcessSpawn {
            program: program.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates ProcessSignal error at caller location.
    #[track_caller]
    pub fn process_signal(pid: u32, message: impl Into<String>) -> Self {
        Self::ProcessSignal {
            pid,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates ServerAlreadyRunning error at caller location.
    #[track_caller]
    pub fn server_already_running(pid: u32) -> Self {
        Self::ServerAlreadyRunning {
            pid,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates InvalidTarget error at caller location.
    #[track_caller]
    pub fn invalid_target(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            url: url.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates ConfigInvalid error at caller location.
    #[track_caller]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Transport error at caller location.
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates ReadinessExhausted error at caller location.
    #[track_caller]
    pub fn readiness_exhausted(
        target: impl Into<String>,
        attempts: u32,
        last_error: impl Into<String>,
    ) -> Self {
        Self::ReadinessExhausted {
            target: target.into(),
            attempts,
            last_error: last_error.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Display error at caller location.
    #[track_caller]
    pub fn display(message: impl Into<String>) -> Self {
        Self::Display {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<std::io::Error> for ShellError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;
