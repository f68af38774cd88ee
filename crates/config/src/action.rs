//! Action steps and their typed payloads.
//!
//! A persisted step is `{type, payload, delayMs}` where `payload` is a free
//! JSON value whose shape depends on `type`. Steps stay in that raw form
//! inside [`Config`](crate::Config) so one bad step never prevents the rest
//! of a file from loading; [`ButtonAction::decode`] turns a step into an
//! [`ActionPayload`] when it is about to run.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{Error, Result, de};

/// Maximum nesting of `MultiAction` steps that will be expanded. A
/// `MultiAction` found at this depth (the top-level sequence is depth 0) is
/// treated as malformed.
pub const MAX_NESTING: usize = 8;

/// The `type` tag of a persisted step. Read ignoring case; unknown tags
/// become [`ActionType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActionType {
    /// Key combination injection.
    Hotkey,
    /// Text input, typed or pasted.
    Text,
    /// Shell-associated open of a file, folder, URL or program.
    Open,
    /// Shell command line.
    Command,
    /// Opens a button folder in the UI; nothing to execute.
    Folder,
    /// Switches the active profile in the UI; nothing to execute.
    ProfileSwitch,
    /// Volume and media keys.
    System,
    /// A nested list of steps.
    MultiAction,
    /// Any tag this build does not know.
    Unknown,
}

/// One persisted step of a button's action sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonAction {
    /// Which payload shape to expect.
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// Raw payload, decoded on demand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Pause after this step completes, in milliseconds. Negative values
    /// read as zero.
    #[serde(default, deserialize_with = "de::delay_ms")]
    pub delay_ms: u64,
}

/// `Hotkey` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyPayload {
    /// Combo text such as `"Ctrl+Shift+T"`.
    pub keys: String,
}

/// How a `Text` step delivers its text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum TextMode {
    /// Type the characters one by one.
    #[default]
    Type,
    /// Put the text on the clipboard and paste it.
    Clipboard,
}

/// `Text` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPayload {
    /// Text to deliver.
    #[serde(default)]
    pub text: String,
    /// Delivery mode.
    #[serde(default)]
    pub mode: TextMode,
}

/// `Open` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPayload {
    /// File, folder, URL or executable.
    pub path: String,
    /// Command-line arguments passed through verbatim.
    #[serde(default)]
    pub arguments: Option<String>,
    /// Working directory for the launched process.
    #[serde(default)]
    pub working_directory: Option<String>,
    /// Request elevation.
    #[serde(default)]
    pub run_as_admin: bool,
}

/// `Command` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandPayload {
    /// Command line handed to the shell.
    pub command: String,
    /// Show a console window.
    #[serde(default)]
    pub show_window: bool,
    /// Hold the sequence until the process exits.
    #[serde(default)]
    pub wait_for_exit: bool,
}

/// The fixed set of system controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SystemAction {
    /// Raise the volume one notch.
    VolumeUp,
    /// Lower the volume one notch.
    VolumeDown,
    /// Toggle mute.
    VolumeMute,
    /// Toggle media playback.
    MediaPlayPause,
    /// Next track.
    MediaNext,
    /// Previous track.
    MediaPrevious,
    /// Raise display brightness.
    BrightnessUp,
    /// Lower display brightness.
    BrightnessDown,
}

/// `System` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPayload {
    /// Which control.
    pub action: SystemAction,
    /// Optional magnitude; for volume steps, the number of notches.
    #[serde(default)]
    pub value: Option<i32>,
}

/// `MultiAction` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiActionPayload {
    /// Child steps, run in order.
    #[serde(default)]
    pub actions: Vec<ButtonAction>,
}

/// A decoded, executable step.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionPayload {
    /// Inject a key combination.
    Hotkey(HotkeyPayload),
    /// Type or paste text.
    Text(TextPayload),
    /// Shell-open a target.
    Open(OpenPayload),
    /// Run a shell command.
    Command(CommandPayload),
    /// Press a media or volume key.
    System(SystemPayload),
    /// Run nested steps.
    MultiAction(MultiActionPayload),
}

impl ButtonAction {
    /// Build a step from a typed payload.
    pub fn new(payload: &ActionPayload, delay_ms: u64) -> Self {
        let (action_type, value) = match payload {
            ActionPayload::Hotkey(p) => (ActionType::Hotkey, serde_json::to_value(p)),
            ActionPayload::Text(p) => (ActionType::Text, serde_json::to_value(p)),
            ActionPayload::Open(p) => (ActionType::Open, serde_json::to_value(p)),
            ActionPayload::Command(p) => (ActionType::Command, serde_json::to_value(p)),
            ActionPayload::System(p) => (ActionType::System, serde_json::to_value(p)),
            ActionPayload::MultiAction(p) => (ActionType::MultiAction, serde_json::to_value(p)),
        };
        Self {
            action_type,
            // Plain structs with string keys always serialize.
            payload: value.ok(),
            delay_ms,
        }
    }

    /// Decode the raw payload according to the type tag.
    ///
    /// Fails for a missing payload, a payload of the wrong shape, and for
    /// tags that have nothing to execute (`Folder`, `ProfileSwitch`, unknown
    /// tags).
    pub fn decode(&self) -> Result<ActionPayload> {
        let kind = self.action_type;
        match kind {
            ActionType::Hotkey => self.payload_as(kind).map(ActionPayload::Hotkey),
            ActionType::Text => self.payload_as(kind).map(ActionPayload::Text),
            ActionType::Open => self.payload_as(kind).map(ActionPayload::Open),
            ActionType::Command => self.payload_as(kind).map(ActionPayload::Command),
            ActionType::System => self.payload_as(kind).map(ActionPayload::System),
            ActionType::MultiAction => self.payload_as(kind).map(ActionPayload::MultiAction),
            ActionType::Folder | ActionType::ProfileSwitch | ActionType::Unknown => {
                Err(Error::Payload {
                    kind,
                    message: "this action type cannot be executed".into(),
                })
            }
        }
    }

    /// Deserialize the payload into `T`.
    fn payload_as<T: DeserializeOwned>(&self, kind: ActionType) -> Result<T> {
        let Some(raw) = &self.payload else {
            return Err(Error::Payload {
                kind,
                message: "missing payload".into(),
            });
        };
        T::deserialize(raw).map_err(|e| Error::Payload {
            kind,
            message: e.to_string(),
        })
    }
}

/// A step that failed to decode, located by its index path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// Step indices from the button's sequence down through nested
    /// `MultiAction` steps.
    pub path: Vec<usize>,
    /// Why the step is unusable.
    pub error: Error,
}

impl Problem {
    /// The index path rendered as `"2.0.1"`.
    pub fn path_string(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Decode every step of `actions`, recursing into `MultiAction`, and
/// collect the ones that would be skipped at run time.
pub fn check_actions(actions: &[ButtonAction]) -> Vec<Problem> {
    let mut out = Vec::new();
    check_into(actions, &mut Vec::new(), 0, &mut out);
    out
}

/// Recursive worker for [`check_actions`].
fn check_into(
    actions: &[ButtonAction],
    path: &mut Vec<usize>,
    depth: usize,
    out: &mut Vec<Problem>,
) {
    for (i, action) in actions.iter().enumerate() {
        path.push(i);
        match action.decode() {
            Ok(ActionPayload::MultiAction(multi)) => {
                if depth >= MAX_NESTING {
                    out.push(Problem {
                        path: path.clone(),
                        error: Error::Payload {
                            kind: ActionType::MultiAction,
                            message: format!("nested deeper than {MAX_NESTING} levels"),
                        },
                    });
                } else {
                    check_into(&multi.actions, path, depth + 1, out);
                }
            }
            Ok(_) => {}
            Err(error) => out.push(Problem {
                path: path.clone(),
                error,
            }),
        }
        path.pop();
    }
}
