use crate::{LaunchMode, LifecyclePhase};

use serde::Serialize;

/// Snapshot of the shell for the tray and diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ShellStatus {
    pub phase: String,
    pub mode: LaunchMode,
    pub target_url: String,
    pub server_pid: Option<u32>,
    pub error: Option<String>,
    pub recovery_hint: Option<String>,
}

impl ShellStatus {
    pub fn new(
        phase: &LifecyclePhase,
        mode: LaunchMode,
        target_url: String,
        server_pid: Option<u32>,
    ) -> Self {
        let (error, recovery_hint) = match phase {
            LifecyclePhase::ServerFailed {
                error,
                recovery_hint,
            } => (Some(error.clone()), Some(recovery_hint.clone())),
            _ => (None, None),
        };

        Self {
            phase: phase.label().into(),
            mode,
            target_url,
            server_pid,
            error,
            recovery_hint,
        }
    }

    /// One-line summary for menus and tooltips.
    pub fn summary(&self) -> String {
        match (&self.error, self.server_pid) {
            (Some(error), _) => format!("Failed: {error}"),
            (None, Some(pid)) => format!("{} (server pid {pid})", self.phase),
            (None, None) => self.phase.clone(),
        }
    }
}
