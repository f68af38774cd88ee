//! Parse and load user configuration.

use std::{fs, path::Path};

use tracing::debug;

use crate::{Config, Error, Problem, Result, check_actions};

/// Parse a configuration from JSON text. `path` is only used for error
/// reporting.
pub fn load_from_str(source: &str, path: Option<&Path>) -> Result<Config> {
    serde_json::from_str(source).map_err(|e| Error::from_json(&e, source, path))
}

/// Load a configuration file from `path`.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let source = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    let config = load_from_str(&source, Some(path))?;
    debug!(
        path = %path.display(),
        panels = config.panels.len(),
        "config_loaded"
    );
    Ok(config)
}

/// A step that would be skipped at run time, located in the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionProblem {
    /// Panel index.
    pub panel: usize,
    /// Button index within the panel.
    pub button: usize,
    /// The failing step.
    pub problem: Problem,
}

impl Config {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(source: &str) -> Result<Self> {
        load_from_str(source, None)
    }

    /// Decode every action of every button and report the ones that would
    /// be skipped.
    pub fn check(&self) -> Vec<ActionProblem> {
        let mut out = Vec::new();
        for (pi, panel) in self.panels.iter().enumerate() {
            for (bi, button) in panel.buttons.iter().enumerate() {
                out.extend(check_actions(&button.actions).into_iter().map(|problem| {
                    ActionProblem {
                        panel: pi,
                        button: bi,
                        problem,
                    }
                }));
            }
        }
        out
    }
}
