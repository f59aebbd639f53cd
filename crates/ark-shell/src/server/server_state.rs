/// Lifecycle of the single server handle owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// No process has been spawned yet
    Uninitialized,
    /// Process spawned and not yet signalled
    Running { pid: u32 },
    /// Process was signalled to terminate
    Terminated,
}
