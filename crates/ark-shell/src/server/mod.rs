mod entry_point;
mod handle;
mod launch_spec;
mod process;
mod server_state;

pub use entry_point::EntryPointResolver;
pub use handle::ServerHandle;
pub use launch_spec::LaunchSpec;
pub use process::{NodeSpawner, ServerProcess, ServerSpawner};
pub use server_state::ServerState;
