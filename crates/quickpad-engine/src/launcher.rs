//! Process launch seam for `Open` and `Command` steps.

use std::{future::Future, io, pin::Pin, process::Stdio};

use async_trait::async_trait;
use config::{CommandPayload, OpenPayload};
use tokio::process::Command;
use tracing::debug;

/// Resolves with the exit code once a spawned command terminates.
pub type ExitWait = Pin<Box<dyn Future<Output = io::Result<Option<i32>>> + Send>>;

/// A command that has been started.
pub struct Spawned {
    /// OS process id, when known.
    pub pid: Option<u32>,
    /// Completion of the process. Dropping it does not stop the process.
    pub exit: ExitWait,
}

/// Starts external programs on behalf of the dispatcher.
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Shell-open a file, folder, URL or program. Returns once the launch
    /// has been handed to the OS.
    async fn open(&self, spec: &OpenPayload) -> io::Result<()>;

    /// Start `spec.command` under the system shell.
    fn spawn_command(&self, spec: &CommandPayload) -> io::Result<Spawned>;
}

/// Launches through the OS shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

#[async_trait]
impl Launcher for SystemLauncher {
    async fn open(&self, spec: &OpenPayload) -> io::Result<()> {
        debug!(path = %spec.path, admin = spec.run_as_admin, "open");
        open_impl(spec.clone()).await
    }

    fn spawn_command(&self, spec: &CommandPayload) -> io::Result<Spawned> {
        let mut cmd = shell_command(&spec.command, spec.show_window);
        cmd.stdin(Stdio::null());
        let mut child = cmd.spawn()?;
        let pid = child.id();
        Ok(Spawned {
            pid,
            exit: Box::pin(async move { child.wait().await.map(|s| s.code()) }),
        })
    }
}

/// `cmd.exe /c <command>` with the console shown or suppressed.
#[cfg(windows)]
fn shell_command(command: &str, show_window: bool) -> Command {
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;
    let mut cmd = Command::new("cmd.exe");
    // The command line is passed through untouched so cmd sees its own quoting.
    cmd.raw_arg("/c").raw_arg(command);
    cmd.creation_flags(if show_window {
        CREATE_NEW_CONSOLE
    } else {
        CREATE_NO_WINDOW
    });
    cmd
}

/// `sh -c <command>`.
#[cfg(not(windows))]
fn shell_command(command: &str, _show_window: bool) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

/// `ShellExecuteExW` on a blocking thread.
#[cfg(windows)]
async fn open_impl(spec: OpenPayload) -> io::Result<()> {
    tokio::task::spawn_blocking(move || shell_execute(&spec))
        .await
        .map_err(io::Error::other)?
}

#[cfg(windows)]
fn shell_execute(spec: &OpenPayload) -> io::Result<()> {
    use std::mem::size_of;

    use windows::{
        Win32::UI::{
            Shell::{SEE_MASK_NOASYNC, SHELLEXECUTEINFOW, ShellExecuteExW},
            WindowsAndMessaging::SW_SHOWNORMAL,
        },
        core::{HSTRING, PCWSTR, w},
    };

    let file = HSTRING::from(spec.path.as_str());
    let params = spec
        .arguments
        .as_deref()
        .filter(|a| !a.is_empty())
        .map(HSTRING::from);
    let dir = spec
        .working_directory
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(HSTRING::from);

    let mut info = SHELLEXECUTEINFOW {
        cbSize: size_of::<SHELLEXECUTEINFOW>() as u32,
        fMask: SEE_MASK_NOASYNC,
        lpVerb: if spec.run_as_admin {
            w!("runas")
        } else {
            PCWSTR::null()
        },
        lpFile: PCWSTR(file.as_ptr()),
        lpParameters: params.as_ref().map_or(PCWSTR::null(), |p| PCWSTR(p.as_ptr())),
        lpDirectory: dir.as_ref().map_or(PCWSTR::null(), |d| PCWSTR(d.as_ptr())),
        nShow: SW_SHOWNORMAL.0,
        ..Default::default()
    };
    // SAFETY: every string pointer in `info` borrows an HSTRING that outlives
    // the call.
    unsafe { ShellExecuteExW(&mut info) }.map_err(|e| io::Error::other(e.to_string()))
}

/// Spawn `path` directly with `arguments` appended as shell words.
#[cfg(not(windows))]
async fn open_impl(spec: OpenPayload) -> io::Result<()> {
    let script = match spec.arguments.as_deref().filter(|a| !a.is_empty()) {
        Some(args) => format!("exec \"$0\" {args}"),
        None => "exec \"$0\"".to_string(),
    };
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(script).arg(&spec.path).stdin(Stdio::null());
    if let Some(dir) = spec.working_directory.as_deref().filter(|d| !d.is_empty()) {
        cmd.current_dir(dir);
    }
    cmd.spawn().map(drop)
}
