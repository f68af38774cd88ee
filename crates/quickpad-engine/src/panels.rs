//! Panel hotkey binding and the button press flow.

use config::{Config, Panel, PanelButton, PanelMode, Settings};
use tracing::{debug, info, warn};
use win_hotkey::{HotkeyEvent, HotkeyId, HotkeyRegistry};

use crate::{ActionDispatcher, Result};

/// The id given to the first panel that has a hotkey.
pub const FIRST_PANEL_HOTKEY_ID: HotkeyId = 1;

/// One panel's hotkey and whether the OS accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelBinding {
    /// Index of the panel in the config.
    pub panel: usize,
    /// Registry id assigned to the hotkey.
    pub id: HotkeyId,
    /// Hotkey text as written in the config (trimmed).
    pub hotkey: String,
    /// False when parsing failed or another application owns the combo.
    pub registered: bool,
}

/// Hotkeys bound for every panel that declares one.
#[derive(Debug, Clone, Default)]
pub struct PanelHotkeys {
    /// Bindings in panel order.
    bindings: Vec<PanelBinding>,
}

impl PanelHotkeys {
    /// Register the hotkey of every panel that has a non-blank one.
    ///
    /// Ids are handed out sequentially from [`FIRST_PANEL_HOTKEY_ID`] in panel
    /// order; a panel keeps its id even when registration fails so the
    /// report lines up with the config.
    pub fn bind(registry: &HotkeyRegistry, config: &Config) -> Self {
        let mut bindings = Vec::new();
        let mut next_id = FIRST_PANEL_HOTKEY_ID;
        for (index, panel) in config.panels.iter().enumerate() {
            let Some(text) = panel.hotkey_text() else {
                continue;
            };
            let registered = registry.register(next_id, text);
            if registered {
                debug!(panel = index, id = next_id, hotkey = text, "panel_hotkey_bound");
            } else {
                warn!(
                    panel = index,
                    name = %panel.name,
                    hotkey = text,
                    "panel_hotkey_unavailable"
                );
            }
            bindings.push(PanelBinding {
                panel: index,
                id: next_id,
                hotkey: text.to_string(),
                registered,
            });
            next_id += 1;
        }
        info!(
            bound = bindings.iter().filter(|b| b.registered).count(),
            total = bindings.len(),
            "panel_hotkeys_bound"
        );
        Self { bindings }
    }

    /// All bindings in panel order.
    pub fn bindings(&self) -> &[PanelBinding] {
        &self.bindings
    }

    /// Bindings the OS refused.
    pub fn unavailable(&self) -> impl Iterator<Item = &PanelBinding> {
        self.bindings.iter().filter(|b| !b.registered)
    }

    /// The panel index a hotkey event belongs to.
    pub fn panel_for(&self, event: &HotkeyEvent) -> Option<usize> {
        self.bindings
            .iter()
            .find(|b| b.registered && b.id == event.id)
            .map(|b| b.panel)
    }

    /// Unregister every bound id.
    pub fn release(&self, registry: &HotkeyRegistry) {
        for b in self.bindings.iter().filter(|b| b.registered) {
            if !registry.unregister(b.id) {
                warn!(panel = b.panel, id = b.id, "panel_hotkey_release_failed");
            }
        }
    }
}

/// What the presentation layer should do after a button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonOutcome {
    /// Hide the panel.
    pub hide_panel: bool,
    /// The button's toggle state after the press.
    pub toggle_state: bool,
}

/// Run a button press: flip a toggle button, execute its actions, then
/// report whether the panel should hide.
///
/// A button with no actions does nothing at all. A launch failure is
/// returned after the toggle flip, and the panel stays visible.
pub async fn press_button(
    dispatcher: &ActionDispatcher,
    settings: &Settings,
    panel: &Panel,
    button: &mut PanelButton,
) -> Result<ButtonOutcome> {
    if button.actions.is_empty() {
        debug!(button = %button.label, "button_press_no_actions");
        return Ok(ButtonOutcome {
            hide_panel: false,
            toggle_state: button.toggle_state,
        });
    }
    if button.is_toggle {
        button.toggle_state = !button.toggle_state;
    }
    info!(panel = %panel.name, button = %button.label, "button_pressed");
    dispatcher.execute(&button.actions).await?;
    Ok(ButtonOutcome {
        hide_panel: settings.hide_on_action_execute && panel.mode == PanelMode::Dynamic,
        toggle_state: button.toggle_state,
    })
}
