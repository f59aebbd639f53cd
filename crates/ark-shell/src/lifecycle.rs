//! Application lifecycle: server startup, readiness gating, windows, teardown.

use crate::{
    DisplayHost, DisplaySurface, EntryPointResolver, HostPlatform, LaunchMode, LaunchSpec,
    LifecyclePhase, MAIN_SURFACE_LABEL, NodeSpawner, PlatformConvention, PlatformQuery,
    ProbeTarget, ReadinessProber, ServerHandle, ServerSpawner, ShellConfig, ShellResult,
    ShellStatus, SurfaceSpec,
};

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, warn};
use url::Url;

/// Pause between terminating the old server and spawning its replacement,
/// so the old listener can release the port.
const RESTART_GRACE: Duration = Duration::from_millis(500);

/// What the host should do after its last window closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowsClosedAction {
    /// The controller asked the host to quit
    Quit,
    /// Keep the process alive without windows
    StayResident,
}

/// Owns the server handle and drives the shell through its phases.
///
/// Responsibilities:
/// - Spawn the standalone server in packaged mode (once, at startup)
/// - Gate every surface load on a confirmed readiness probe
/// - React to host lifecycle hooks (activate, all windows closed, before quit)
///
/// The host runtime keeps the controller in shared state and calls the hook
/// methods; nothing here is module-level.
pub struct LifecycleController {
    mode: LaunchMode,
    config: ShellConfig,
    target_url: Url,
    probe_target: ProbeTarget,
    resolver: EntryPointResolver,
    host: Arc<dyn DisplayHost>,
    spawner: Arc<dyn ServerSpawner>,
    prober: ReadinessProber,
    platform: Arc<dyn PlatformQuery>,
    server: Mutex<ServerHandle>,
    surfaces_opened: AtomicU32,
    phase_tx: watch::Sender<LifecyclePhase>,
    phase_rx: watch::Receiver<LifecyclePhase>,
}

impl LifecycleController {
    /// Create a controller with the production spawner, HTTP prober and host platform.
    pub fn new(
        mode: LaunchMode,
        config: ShellConfig,
        resolver: EntryPointResolver,
        host: Arc<dyn DisplayHost>,
    ) -> ShellResult<Self> {
        let target_url = config.target_url()?;
        let probe_target = ProbeTarget::from_url(&target_url)?;
        let (phase_tx, phase_rx) = watch::channel(LifecyclePhase::Idle);

        Ok(Self {
            mode,
            config,
            target_url,
            probe_target,
            resolver,
            host,
            spawner: Arc::new(NodeSpawner),
            prober: ReadinessProber::http()?,
            platform: Arc::new(HostPlatform),
            server: Mutex::new(ServerHandle::new()),
            surfaces_opened: AtomicU32::new(0),
            phase_tx,
            phase_rx,
        })
    }

    pub fn with_spawner(mut self, spawner: Arc<dyn ServerSpawner>) -> Self {
        self.spawner = spawner;
        self
    }

    pub fn with_prober(mut self, prober: ReadinessProber) -> Self {
        self.prober = prober;
        self
    }

    pub fn with_platform(mut self, platform: Arc<dyn PlatformQuery>) -> Self {
        self.platform = platform;
        self
    }

    // === Host lifecycle hooks ===

    /// Startup entry point. Called once by the host when it is ready.
    ///
    /// In packaged mode the server is spawned before any window exists; a
    /// missing build artifact fails here without creating a window.
    pub async fn on_ready(&self) -> ShellResult<DisplaySurface> {
        self.set_phase(LifecyclePhase::ModeCheck);

        match self.mode {
            LaunchMode::Development => {
                info!("Development mode, expecting a dev server at {}", self.target_url);
                self.set_phase(LifecyclePhase::DevPassthrough);
            }
            LaunchMode::Packaged => {
                self.set_phase(LifecyclePhase::ServerStarting);

                let started = {
                    let mut server = self.server.lock().await;
                    self.launch_spec()
                        .and_then(|spec| server.start(self.spawner.as_ref(), &spec))
                };

                match started {
                    Ok(pid) => info!("Standalone server started (PID {pid})"),
                    Err(e) => {
                        error!("Failed to start standalone server: {e}");
                        self.set_phase(LifecyclePhase::server_failed(&e));
                        return Err(e);
                    }
                }
            }
        }

        self.create_window().await
    }

    /// Open a surface and load the target into it once readiness is confirmed.
    ///
    /// In packaged mode a failed probe leaves the surface empty and returns
    /// the error; the application itself keeps running.
    pub async fn create_window(&self) -> ShellResult<DisplaySurface> {
        let spec = self.next_surface_spec();
        let surface = self.host.open_surface(&spec)?;
        debug!("Opened surface {}", surface.label());

        if self.mode.is_packaged() {
            self.await_server().await?;
        }

        self.set_phase(LifecyclePhase::WindowOpen);
        self.host.load_url(&surface, &self.target_url)?;
        info!("Surface {} loading {}", surface.label(), self.target_url);
        self.set_phase(LifecyclePhase::Running);

        Ok(surface)
    }

    /// The user re-invoked the app. Opens a window only when none exist.
    pub async fn on_activate(&self) -> ShellResult<Option<DisplaySurface>> {
        if !self.host.surfaces().is_empty() {
            debug!("Activate ignored, a surface already exists");
            return Ok(None);
        }

        info!("Activate with no surfaces, creating a new window");
        self.create_window().await.map(Some)
    }

    /// The last window closed. Quits unless the platform keeps apps resident.
    pub fn on_all_windows_closed(&self) -> WindowsClosedAction {
        match self.platform.convention() {
            PlatformConvention::QuitOnLastWindowClosed => {
                info!("All windows closed, quitting");
                self.host.quit();
                WindowsClosedAction::Quit
            }
            PlatformConvention::PersistInBackground => {
                info!("All windows closed, staying resident");
                WindowsClosedAction::StayResident
            }
        }
    }

    /// Terminate the server, if one is live. Safe to call any number of times.
    pub async fn on_before_quit(&self) -> ShellResult<()> {
        if *self.phase_rx.borrow() == LifecyclePhase::Terminated {
            return Ok(());
        }

        self.set_phase(LifecyclePhase::ShuttingDown);
        let result = self.server.lock().await.terminate();
        self.set_phase(LifecyclePhase::Terminated);

        match result {
            Ok(true) => info!("Standalone server stopped"),
            Ok(false) => debug!("No standalone server to stop"),
            Err(ref e) => error!("Failed to stop standalone server: {e}"),
        }

        result.map(|_| ())
    }

    // === Operator actions ===

    /// Replace the standalone server and reload every open surface.
    ///
    /// Packaged mode only; in development mode there is nothing to restart.
    pub async fn restart_server(&self) -> ShellResult<()> {
        if !self.mode.is_packaged() {
            warn!("Restart requested in development mode, nothing to restart");
            return Ok(());
        }

        info!("Restarting standalone server");
        self.set_phase(LifecyclePhase::ServerStarting);

        let stopped = self.server.lock().await.terminate()?;
        if stopped {
            tokio::time::sleep(RESTART_GRACE).await;
        }

        let started = {
            let mut server = self.server.lock().await;
            self.launch_spec()
                .and_then(|spec| server.start(self.spawner.as_ref(), &spec))
        };
        if let Err(e) = started {
            error!("Failed to restart standalone server: {e}");
            self.set_phase(LifecyclePhase::server_failed(&e));
            return Err(e);
        }

        self.await_server().await?;

        for surface in self.host.surfaces() {
            self.host.load_url(&surface, &self.target_url)?;
            debug!("Reloaded surface {}", surface.label());
        }
        self.set_phase(LifecyclePhase::Running);

        Ok(())
    }

    // === Observation ===

    pub fn mode(&self) -> LaunchMode {
        self.mode
    }

    pub fn target_url(&self) -> &Url {
        &self.target_url
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Subscribe to phase changes.
    pub fn subscribe(&self) -> watch::Receiver<LifecyclePhase> {
        self.phase_rx.clone()
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase_rx.borrow().clone()
    }

    /// PID of the standalone server, if one is held.
    pub async fn server_pid(&self) -> Option<u32> {
        self.server.lock().await.pid()
    }

    pub async fn status(&self) -> ShellStatus {
        ShellStatus::new(
            &self.phase(),
            self.mode,
            self.target_url.to_string(),
            self.server_pid().await,
        )
    }

    // === Internals ===

    fn launch_spec(&self) -> ShellResult<LaunchSpec> {
        let entry_point = self.resolver.resolve()?;
        Ok(LaunchSpec::standalone(&entry_point, &self.config.server))
    }

    async fn await_server(&self) -> ShellResult<()> {
        let policy = self.config.probe.policy();

        match self.prober.wait_ready(&self.probe_target, &policy).await {
            Ok(attempts) => {
                info!("Server ready after {attempts} attempt(s)");
                self.set_phase(LifecyclePhase::ServerReady);
                Ok(())
            }
            Err(e) => {
                error!("Server never became ready: {e}");
                self.set_phase(LifecyclePhase::server_failed(&e));
                Err(e)
            }
        }
    }

    fn next_surface_spec(&self) -> SurfaceSpec {
        let n = self.surfaces_opened.fetch_add(1, Ordering::SeqCst) + 1;
        let label = if n == 1 {
            MAIN_SURFACE_LABEL.to_string()
        } else {
            format!("{MAIN_SURFACE_LABEL}-{n}")
        };

        SurfaceSpec {
            label,
            title: self.config.window.title.clone(),
            width: self.config.window.width,
            height: self.config.window.height,
        }
    }

    fn set_phase(&self, phase: LifecyclePhase) {
        debug!("Lifecycle phase: {}", phase.label());
        let _ = self.phase_tx.send(phase);
    }
}
