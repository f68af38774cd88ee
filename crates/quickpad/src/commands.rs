use std::path::Path;

use config::Config;
use quickpad_engine::{ActionDispatcher, Error, press_button};
use serde_json::json;
use tokio::runtime::Builder;
use tracing::{error, info};
use win_keycode::KeyCombo;

/// Print the canonical form of `text` with its registration parts.
pub fn parse(text: &str, as_json: bool) -> i32 {
    let combo = KeyCombo::parse(text);
    let parts = combo.hotkey_parts();
    if as_json {
        let out = json!({
            "input": text,
            "canonical": combo.to_string_canonical(),
            "modifiers": combo.modifiers.bits(),
            "vk": parts.map(|(_, vk)| vk),
            "registrable": parts.is_some(),
        });
        println!("{out}");
    } else {
        println!("canonical: {combo}");
        println!("modifiers: {:#06x}", combo.modifiers.bits());
        match parts {
            Some((_, vk)) => println!("vk:        {vk:#04x}"),
            None => println!("vk:        none (modifier-only, cannot be registered)"),
        }
    }
    i32::from(parts.is_none())
}

/// Load the config and decode every action of every button.
pub fn check(explicit: Option<&Path>) -> i32 {
    let loaded = config::resolve_config_path(explicit).and_then(|p| config::load_from_path(&p));
    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e.pretty());
            return 1;
        }
    };
    let problems = cfg.check();
    if problems.is_empty() {
        println!("OK");
        return 0;
    }
    for p in &problems {
        let panel = &cfg.panels[p.panel];
        let button = &panel.buttons[p.button];
        println!(
            "panel {} ({}) button {} ({}) step {}: {}",
            p.panel,
            panel.name,
            p.button,
            button.label,
            p.problem.path_string(),
            p.problem.error
        );
    }
    println!("{} action(s) would be skipped", problems.len());
    1
}

/// Press one button on a current-thread runtime.
pub fn exec(mut cfg: Config, panel: usize, button: usize) -> i32 {
    let Some(p) = cfg.panels.get(panel).cloned() else {
        eprintln!("no panel {panel} ({} configured)", cfg.panels.len());
        return 2;
    };
    let Some(b) = cfg.panels[panel].buttons.get_mut(button) else {
        eprintln!("no button {button} in panel {panel} ({})", p.name);
        return 2;
    };

    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return 1;
        }
    };
    let dispatcher = ActionDispatcher::new();
    let result: Result<_, Error> =
        runtime.block_on(press_button(&dispatcher, &cfg.settings, &p, b));
    match result {
        Ok(outcome) => {
            info!(
                panel,
                button,
                hide_panel = outcome.hide_panel,
                toggle_state = outcome.toggle_state,
                "button_executed"
            );
            0
        }
        Err(e) => {
            error!(panel, button, error = %e, "button_failed");
            eprintln!("{e}");
            1
        }
    }
}
