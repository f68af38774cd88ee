use std::thread;

use config::Config;
use quickpad_engine::PanelHotkeys;
use tokio::{runtime::Builder, signal};
use tracing::{debug, error, info, warn};
use win_hotkey::{HotkeyRegistry, MessageWindow, QuitHandle};

/// Bind every panel hotkey and pump messages until Ctrl-C.
///
/// The message window and the pump stay on the calling thread, which is
/// where `WM_HOTKEY` arrives. Presses are logged from a separate thread fed
/// by the registry's event channel.
pub fn run(cfg: Config) -> i32 {
    let window = match MessageWindow::create() {
        Ok(w) => w,
        Err(e) => {
            eprintln!("cannot create the hotkey window: {e}");
            return 1;
        }
    };

    let registry = HotkeyRegistry::new();
    registry.initialize(window.handle());
    let panels = PanelHotkeys::bind(&registry, &cfg);
    for b in panels.unavailable() {
        let name = cfg.panels.get(b.panel).map_or("", |p| p.name.as_str());
        eprintln!(
            "hotkey {:?} for panel {} ({name}) is unavailable",
            b.hotkey, b.panel
        );
    }

    let events = registry.subscribe();
    let names: Vec<String> = cfg.panels.iter().map(|p| p.name.clone()).collect();
    let router = panels.clone();
    let logger = thread::spawn(move || {
        for ev in events.iter() {
            match router.panel_for(&ev) {
                Some(panel) => info!(
                    panel,
                    name = names.get(panel).map_or("", String::as_str),
                    hotkey = %ev.hotkey,
                    "panel_hotkey_pressed"
                ),
                None => debug!(id = ev.id, "hotkey_without_panel"),
            }
        }
    });

    let quit = window.quit_handle();
    thread::spawn(move || quit_on_ctrl_c(quit));

    info!(panels = panels.bindings().len(), "quickpad_running");
    let pumped = window.run(|msg, wparam| registry.handle_message(msg, wparam));

    panels.release(&registry);
    registry.dispose();
    // Closes the event channel so the logger thread ends.
    drop(registry);
    if logger.join().is_err() {
        warn!("hotkey_logger_panicked");
    }

    match pumped {
        Ok(()) => {
            info!("quickpad_stopped");
            0
        }
        Err(e) => {
            error!(error = %e, "message_loop_failed");
            1
        }
    }
}

/// Wait for Ctrl-C on a private current-thread runtime, then stop the pump.
fn quit_on_ctrl_c(quit: QuitHandle) {
    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return;
        }
    };
    match runtime.block_on(signal::ctrl_c()) {
        Ok(()) => {
            info!("ctrl_c_received");
            if let Err(e) = quit.quit() {
                warn!(error = %e, "quit_post_failed");
            }
        }
        Err(e) => warn!(error = %e, "ctrl_c_unavailable"),
    }
}
