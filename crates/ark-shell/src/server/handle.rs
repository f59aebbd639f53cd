use crate::{LaunchSpec, ServerProcess, ServerSpawner, ServerState, ShellError, ShellResult};

use tracing::info;

/// The controller's single server slot.
///
/// Lifecycle: `Uninitialized -> Running -> Terminated`, and back to
/// `Running` only through an explicit restart. At most one process is live.
pub struct ServerHandle {
    process: Option<Box<dyn ServerProcess>>,
    state: ServerState,
}

impl Default for ServerHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerHandle {
    pub fn new() -> Self {
        Self {
            process: None,
            state: ServerState::Uninitialized,
        }
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    pub fn pid(&self) -> Option<u32> {
        self.process.as_ref().map(|p| p.pid())
    }

    /// Whether a spawned process is held and has not exited.
    pub fn is_live(&mut self) -> bool {
        self.process.as_mut().is_some_and(|p| p.is_alive())
    }

    /// Spawn the server. Fails if a live process is already held.
    pub fn start(&mut self, spawner: &dyn ServerSpawner, spec: &LaunchSpec) -> ShellResult<u32> {
        if let Some(process) = self.process.as_mut()
            && process.is_alive()
        {
            return Err(ShellError::server_already_running(process.pid()));
        }

        let process = spawner.spawn(spec)?;
        let pid = process.pid();

        self.process = Some(process);
        self.state = ServerState::Running { pid };

        Ok(pid)
    }

    /// Signal the held process to terminate and clear the slot.
    ///
    /// Returns `false` when there was nothing to stop. The slot is cleared
    /// before signalling, so a second call is always a no-op.
    pub fn terminate(&mut self) -> ShellResult<bool> {
        let Some(mut process) = self.process.take() else {
            return Ok(false);
        };
        self.state = ServerState::Terminated;

        let pid = process.pid();
        if process.is_alive() {
            process.terminate()?;
            info!("Server process {pid} signalled to terminate");
        } else {
            info!("Server process {pid} had already exited");
        }

        Ok(true)
    }
}
