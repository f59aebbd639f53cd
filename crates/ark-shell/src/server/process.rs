//! Spawning and signalling the standalone server process.

use crate::{LaunchSpec, ShellError, ShellResult};

use std::process::{Child, Command, Stdio};

use tracing::{info, warn};

/// Starts server processes. Injected into the controller so tests never fork.
pub trait ServerSpawner: Send + Sync {
    fn spawn(&self, spec: &LaunchSpec) -> ShellResult<Box<dyn ServerProcess>>;
}

/// A spawned server process.
pub trait ServerProcess: Send {
    fn pid(&self) -> u32;

    /// Whether the process has not exited yet.
    fn is_alive(&mut self) -> bool;

    /// Ask the process to terminate. No drain handshake, no waiting.
    fn terminate(&mut self) -> ShellResult<()>;
}

/// Spawns the standalone server with the configured Node.js runtime.
///
/// The child's stdio is inherited, so the server logs straight to the
/// shell's console.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeSpawner;

impl ServerSpawner for NodeSpawner {
    fn spawn(&self, spec: &LaunchSpec) -> ShellResult<Box<dyn ServerProcess>> {
        info!(
            "Spawning {} {} in {}",
            spec.program,
            spec.args.join(" "),
            spec.working_dir.display()
        );

        let child = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.working_dir)
            .envs(spec.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| ShellError::process_spawn(spec.program.clone(), e))?;

        info!("Spawned standalone server with PID: {}", child.id());

        Ok(Box::new(ChildProcess::new(child)))
    }
}

struct ChildProcess {
    pid: u32,
    /// Taken once the process has been signalled and handed to the reaper
    child: Option<Child>,
}

impl ChildProcess {
    fn new(child: Child) -> Self {
        Self {
            pid: child.id(),
            child: Some(child),
        }
    }
}

impl ServerProcess for ChildProcess {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn is_alive(&mut self) -> bool {
        self.child
            .as_mut()
            .is_some_and(|child| matches!(child.try_wait(), Ok(None)))
    }

    fn terminate(&mut self) -> ShellResult<()> {
        let pid = self.pid;
        let Some(child) = self.child.take() else {
            return Ok(());
        };

        #[cfg(unix)]
        {
            use nix::sys::signal::{Signal, kill};
            use nix::unistd::Pid;

            info!("Sending SIGTERM to pid {pid}");
            if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
                self.child = Some(child);
                return Err(ShellError::process_signal(pid, e.to_string()));
            }
        }

        #[cfg(not(unix))]
        let child = {
            let mut child = child;
            info!("Killing pid {pid}");
            if let Err(e) = child.kill() {
                self.child = Some(child);
                return Err(ShellError::process_signal(pid, e.to_string()));
            }
            child
        };

        reap(pid, child);

        Ok(())
    }
}

/// Wait for a signalled child on a background thread so it does not linger
/// as a zombie after a restart.
fn reap(pid: u32, mut child: Child) {
    let spawned = std::thread::Builder::new()
        .name(format!("reap-{pid}"))
        .spawn(move || match child.wait() {
            Ok(status) => info!("Server process {pid} exited: {status}"),
            Err(e) => warn!("Failed to wait for server process {pid}: {e}"),
        });

    if let Err(e) = spawned {
        warn!("Failed to start reaper for server process {pid}: {e}");
    }
}
