mod logging;
mod tray;
mod window;

use logging::{current_log_path, logs_dir, setup_logging};
use tray::TrayManager;
use window::{TauriDisplayHost, reopen};


use ark_shell::{
    EntryPointResolver, LaunchMode, LifecycleController, ShellConfig, ShellError,
    WindowsClosedAction,
};

use std::sync::Arc;

use tauri::{Manager, RunEvent};
use tracing::{error, info, warn};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            info!("Second instance started, activating existing one");
            reopen(app);
        }))
        .setup(|app| {
            let log_root = app.path().app_log_dir()?;
            setup_logging(&log_root)?;

            info!("Starting Ark Nova Companion v{}", env!("CARGO_PKG_VERSION"));
            info!("Log file: {}", current_log_path(&log_root).display());

            let config_dir = app.path().app_config_dir()?;
            let config = ShellConfig::load(&config_dir)?;
            config.validate()?;
            config.log_summary();

            let mode = LaunchMode::from_packaged(!tauri::is_dev());
            let resource_dir = app.path().resource_dir()?;
            let resolver = EntryPointResolver::standalone(&resource_dir, &resource_dir);

            let host = Arc::new(TauriDisplayHost::new(app.handle().clone()));
            let controller = Arc::new(LifecycleController::new(mode, config, resolver, host)?);
            app.manage(controller.clone());

            // Setup signal handlers for graceful shutdown on Unix
            #[cfg(unix)]
            {
                let controller = controller.clone();
                std::thread::spawn(move || {
                    use signal_hook::consts::{SIGINT, SIGTERM};
                    use signal_hook::iterator::Signals;

                    let mut signals = match Signals::new([SIGINT, SIGTERM]) {
                        Ok(s) => s,
                        Err(e) => {
                            error!("Failed to register signal handlers: {e}");
                            return;
                        }
                    };

                    if let Some(sig) = signals.forever().next() {
                        info!("Received signal {sig}, shutting down...");

                        tauri::async_runtime::block_on(async {
                            if let Err(e) = controller.on_before_quit().await {
                                error!("Failed to stop server on signal: {e}");
                            }
                        });

                        std::process::exit(0);
                    }
                });
            }

            let tray_manager = TrayManager::setup(app, logs_dir(&log_root))?;
            app.manage(tray_manager.clone());

            // Mirror lifecycle phases into the tray
            let app_handle = app.handle().clone();
            let mut phase_rx = controller.subscribe();
            let controller_for_tray = controller.clone();
            tauri::async_runtime::spawn(async move {
                while phase_rx.changed().await.is_ok() {
                    let status = controller_for_tray.status().await;
                    tray_manager.update_status(&app_handle, &status);

                    if let Ok(json) = serde_json::to_string(&status) {
                        tracing::debug!("Shell status: {json}");
                    }
                }
            });

            // Start server and open the first window
            let app_handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                match controller.on_ready().await {
                    Ok(surface) => info!("Window {} is showing the app", surface.label()),
                    Err(e) if is_fatal(&e) => {
                        error!("Startup failed: {e}");
                        error!("{}", e.recovery_hint());
                        app_handle.exit(1);
                    }
                    Err(e) => {
                        warn!("Window opened without content: {e}");
                        warn!("{}", e.recovery_hint());
                    }
                }
            });

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { api, code, .. } => {
                // `None` means the last window closed; explicit exits carry a code
                if code.is_none()
                    && let Some(controller) = app_handle.try_state::<Arc<LifecycleController>>()
                    && controller.on_all_windows_closed() == WindowsClosedAction::StayResident
                {
                    api.prevent_exit();
                }
            }
            RunEvent::Exit => {
                if let Some(controller) = app_handle.try_state::<Arc<LifecycleController>>() {
                    info!("Stopping server before exit...");
                    tauri::async_runtime::block_on(async {
                        if let Err(e) = controller.on_before_quit().await {
                            error!("Failed to stop server: {e}");
                        }
                    });
                }
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => reopen(app_handle),
            _ => {}
        });
}

/// Startup failures that leave nothing to show.
fn is_fatal(error: &ShellError) -> bool {
    matches!(
        error,
        ShellError::EntryPointNotFound { .. } | ShellError::ProcessSpawn { .. }
    )
}
