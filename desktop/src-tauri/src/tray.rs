//! System tray with status indicator and menu.

use crate::window::reopen;

use ark_shell::{LifecycleController, ShellStatus};

use std::path::PathBuf;
use std::sync::Arc;

use tauri::{
    AppHandle, Manager, Runtime, Wry,
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
};
use tracing::{debug, error, info, warn};

const TRAY_ID: &str = "main";
const APP_NAME: &str = "Ark Nova Companion";

/// Manages the system tray and its state.
///
/// The status item belongs to the tray menu, not the app menu, so it is kept
/// here rather than looked up by id.
pub struct TrayManager {
    status_item: MenuItem<Wry>,
}

impl TrayManager {
    /// Create and setup the system tray.
    pub fn setup(
        app: &tauri::App,
        logs_dir: PathBuf,
    ) -> Result<Arc<Self>, Box<dyn std::error::Error>> {
        let show_item = MenuItem::with_id(app, "show", "Show Window", true, None::<&str>)?;
        let status_item =
            MenuItem::with_id(app, "status", "Status: Starting...", false, None::<&str>)?;

        let separator1 = PredefinedMenuItem::separator(app)?;
        let restart_item = MenuItem::with_id(app, "restart", "Restart Server", true, None::<&str>)?;
        let logs_item = MenuItem::with_id(app, "logs", "View Logs...", true, None::<&str>)?;
        let separator2 = PredefinedMenuItem::separator(app)?;
        let quit_item = MenuItem::with_id(app, "quit", "Quit", true, None::<&str>)?;

        let menu = Menu::with_items(
            app,
            &[
                &show_item,
                &status_item,
                &separator1,
                &restart_item,
                &logs_item,
                &separator2,
                &quit_item,
            ],
        )?;

        let mut builder = TrayIconBuilder::with_id(TRAY_ID)
            .menu(&menu)
            .tooltip(APP_NAME)
            .show_menu_on_left_click(false);
        if let Some(icon) = app.default_window_icon() {
            builder = builder.icon(icon.clone());
        }

        builder
            .on_menu_event(move |app, event| match event.id.as_ref() {
                "show" => reopen(app),
                "restart" => {
                    let app_handle = app.clone();
                    tauri::async_runtime::spawn(async move {
                        if let Some(controller) =
                            app_handle.try_state::<Arc<LifecycleController>>()
                            && let Err(e) = controller.restart_server().await
                        {
                            error!("Failed to restart server: {e}");
                        }
                    });
                }
                "logs" => open_directory(&logs_dir),
                "quit" => {
                    info!("Quit requested from tray");
                    app.exit(0);
                }
                _ => {}
            })
            .on_tray_icon_event(|tray, event| {
                if let TrayIconEvent::Click {
                    button: MouseButton::Left,
                    button_state: MouseButtonState::Up,
                    ..
                } = event
                {
                    reopen(tray.app_handle());
                }
            })
            .build(app.app_handle())?;

        Ok(Arc::new(Self { status_item }))
    }

    /// Update tray status text from a shell snapshot.
    pub fn update_status(&self, app: &AppHandle, status: &ShellStatus) {
        let (status_text, tooltip) = apply_status(&self.status_item, status);

        if let Some(tray) = app.tray_by_id(TRAY_ID) {
            let _ = tray.set_tooltip(Some(&tooltip));
        }

        debug!("Tray status updated: {status_text}");
    }
}

/// A menu entry whose label can be rewritten in place.
pub(crate) trait StatusText {
    fn set_status_text(&self, text: &str) -> tauri::Result<()>;
}

impl<R: Runtime> StatusText for MenuItem<R> {
    fn set_status_text(&self, text: &str) -> tauri::Result<()> {
        self.set_text(text)
    }
}

/// Write the status label into `item` and return the labels used.
pub(crate) fn apply_status(item: &impl StatusText, status: &ShellStatus) -> (String, String) {
    let (status_text, tooltip) = status_labels(status);
    if let Err(e) = item.set_status_text(&status_text) {
        warn!("Failed to update tray status item: {e}");
    }
    (status_text, tooltip)
}

/// Menu text and tooltip for a status snapshot.
pub(crate) fn status_labels(status: &ShellStatus) -> (String, String) {
    match (&status.error, status.phase.as_str()) {
        (Some(error), _) => (
            "Status: Failed".to_string(),
            format!("{APP_NAME} - Failed: {error}"),
        ),
        (None, "running") => match status.server_pid {
            Some(pid) => (
                format!("Status: Running (pid {pid})"),
                format!("{APP_NAME} - Serving {}", status.target_url),
            ),
            None => (
                "Status: Running (dev server)".to_string(),
                format!("{APP_NAME} - Dev server at {}", status.target_url),
            ),
        },
        (None, "idle" | "mode_check" | "dev_passthrough" | "server_starting") => (
            "Status: Starting...".to_string(),
            format!("{APP_NAME} - Starting..."),
        ),
        (None, "server_ready" | "window_open") => (
            "Status: Loading...".to_string(),
            format!("{APP_NAME} - Loading {}", status.target_url),
        ),
        (None, "shutting_down") => (
            "Status: Shutting down...".to_string(),
            format!("{APP_NAME} - Shutting down..."),
        ),
        (None, other) => (format!("Status: {other}"), format!("{APP_NAME} - {other}")),
    }
}

/// Open a directory in the system file manager.
fn open_directory(path: &std::path::Path) {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn().ok();
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("explorer")
            .arg(path)
            .spawn()
            .ok();
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .ok();
    }
}
