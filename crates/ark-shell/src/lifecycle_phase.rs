use crate::ShellError;

/// Where the application is in its startup/shutdown sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecyclePhase {
    Idle,
    /// Deciding between development passthrough and server startup
    ModeCheck,
    /// Development mode, no server is spawned or probed
    DevPassthrough,
    ServerStarting,
    ServerReady,
    /// Readiness was never confirmed; the app stays up without content
    ServerFailed { error: String, recovery_hint: String },
    /// A surface is loading the target URL
    WindowOpen,
    Running,
    ShuttingDown,
    Terminated,
}

impl LifecyclePhase {
    pub fn server_failed(error: &ShellError) -> Self {
        Self::ServerFailed {
            error: error.to_string(),
            recovery_hint: error.recovery_hint().to_string(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ModeCheck => "mode_check",
            Self::DevPassthrough => "dev_passthrough",
            Self::ServerStarting => "server_starting",
            Self::ServerReady => "server_ready",
            Self::ServerFailed { .. } => "server_failed",
            Self::WindowOpen => "window_open",
            Self::Running => "running",
            Self::ShuttingDown => "shutting_down",
            Self::Terminated => "terminated",
        }
    }
}
