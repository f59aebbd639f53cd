//! Tauri webview windows behind the shell's `DisplayHost` seam.

use ark_shell::{
    DisplayHost, DisplaySurface, LifecycleController, ShellError, ShellResult, SurfaceSpec,
};

use std::sync::Arc;

use tauri::{AppHandle, Manager, Url, WebviewUrl, WebviewWindowBuilder};
use tracing::{debug, error};

/// Placeholder page shown until the server is confirmed ready.
const BLANK_PAGE: &str = "about:blank";

/// Opens and navigates webview windows on behalf of the lifecycle controller.
///
/// Windows load remote content only. No capability grants the remote origin
/// access to IPC, so pages cannot reach host APIs.
pub struct TauriDisplayHost {
    app: AppHandle,
}

impl TauriDisplayHost {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl DisplayHost for TauriDisplayHost {
    fn open_surface(&self, spec: &SurfaceSpec) -> ShellResult<DisplaySurface> {
        let blank = Url::parse(BLANK_PAGE)
            .map_err(|e| ShellError::display(format!("Invalid placeholder URL: {e}")))?;

        WebviewWindowBuilder::new(&self.app, &spec.label, WebviewUrl::External(blank))
            .title(&spec.title)
            .inner_size(f64::from(spec.width), f64::from(spec.height))
            .build()
            .map_err(|e| {
                ShellError::display(format!("Failed to create window {}: {e}", spec.label))
            })?;

        debug!(
            "Created window {} ({}x{})",
            spec.label, spec.width, spec.height
        );
        Ok(DisplaySurface::new(spec.label.clone()))
    }

    fn load_url(&self, surface: &DisplaySurface, url: &Url) -> ShellResult<()> {
        let window = self
            .app
            .get_webview_window(surface.label())
            .ok_or_else(|| ShellError::display(format!("Window {} is gone", surface.label())))?;

        window
            .navigate(url.clone())
            .map_err(|e| ShellError::display(format!("Failed to load {url}: {e}")))
    }

    fn surfaces(&self) -> Vec<DisplaySurface> {
        let mut labels: Vec<String> = self.app.webview_windows().into_keys().collect();
        labels.sort();
        labels.into_iter().map(DisplaySurface::new).collect()
    }

    fn quit(&self) {
        self.app.exit(0);
    }
}

/// Bring every open window to the front.
fn focus_all(app: &AppHandle) {
    for window in app.webview_windows().values() {
        window.show().ok();
        window.unminimize().ok();
        window.set_focus().ok();
    }
}

/// Focus existing windows, or ask the controller for a new one.
pub fn reopen(app: &AppHandle) {
    if !app.webview_windows().is_empty() {
        focus_all(app);
        return;
    }

    let app_handle = app.clone();
    tauri::async_runtime::spawn(async move {
        if let Some(controller) = app_handle.try_state::<Arc<LifecycleController>>()
            && let Err(e) = controller.on_activate().await
        {
            error!("Failed to reopen window: {e}");
        }
    });
}
