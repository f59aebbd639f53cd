//! Server lifecycle and readiness protocol for the Ark Nova companion desktop shell.
//!
//! The windowing runtime is reached only through [`DisplayHost`], so everything in
//! this crate runs under plain Tokio and is tested without a webview.

mod config;
mod display;
mod error;
mod launch_mode;
mod lifecycle;
mod lifecycle_phase;
mod platform;
mod probe;
mod probe_settings;
mod server;
mod server_settings;
mod shell_status;
mod window_settings;

#[cfg(test)]
mod tests;

pub use config::ShellConfig;
pub use display::{DisplayHost, DisplaySurface, SurfaceSpec};
pub use error::{Result as ShellResult, ShellError};
pub use launch_mode::LaunchMode;
pub use lifecycle::{LifecycleController, WindowsClosedAction};
pub use lifecycle_phase::LifecyclePhase;
pub use platform::{HostPlatform, PlatformConvention, PlatformQuery};
pub use probe::{
    HttpTransport, ProbeOutcome, ProbePolicy, ProbeScheme, ProbeTarget, ProbeTransport,
    ReadinessProber,
};
pub use probe_settings::ProbeSettings;
pub use server::{
    EntryPointResolver, LaunchSpec, NodeSpawner, ServerHandle, ServerProcess, ServerSpawner,
    ServerState,
};
pub use server_settings::ServerSettings;
pub use shell_status::ShellStatus;
pub use window_settings::WindowSettings;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_NODE_BINARY: &str = "node";
const DEFAULT_PROBE_MAX_ATTEMPTS: u32 = 30;
const DEFAULT_PROBE_RETRY_DELAY_MS: u64 = 500;
const DEFAULT_PROBE_ATTEMPT_TIMEOUT_MS: u64 = 2000;
const DEFAULT_WINDOW_TITLE: &str = "Ark Nova Companion";
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 800;

const CONFIG_FILENAME: &str = "shell.toml";
const MAIN_SURFACE_LABEL: &str = "main";
