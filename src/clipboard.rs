/*!
 * Clipboard support for snapfs
 *
 * Copies the rendered document to the system clipboard by piping it into
 * whichever clipboard command is available on this platform.
 */

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the clipboard command
    #[error("Clipboard command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Known clipboard mechanisms, tried in platform-specific order
#[derive(Debug, Clone, Copy)]
enum Provider {
    Tmux,
    Wayland,
    Xsel,
    Xclip,
    MacOs,
    Wsl,
    Termux,
}

impl Provider {
    fn command(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
            Self::Wayland => ("wl-copy", &[]),
            Self::Xsel => ("xsel", &["-b", "-i"]),
            Self::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
            Self::MacOs => ("pbcopy", &[]),
            Self::Wsl => ("clip.exe", &[]),
            Self::Termux => ("termux-clipboard-set", &[]),
        }
    }
}

/// Copy text to the system clipboard using the first available mechanism
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let provider = candidates()
        .into_iter()
        .find(|p| command_exists(p.command().0))
        .ok_or(ClipboardError::NoClipboardFound)?;

    let (cmd, args) = provider.command();
    pipe_into(cmd, args, text)
}

/// Check if a command exists on the system PATH
pub fn command_exists(command: &str) -> bool {
    env::var("PATH")
        .map(|paths| {
            paths
                .split(':')
                .any(|dir| Path::new(dir).join(command).exists())
        })
        .unwrap_or(false)
}

/// Providers worth trying on this platform, in order of preference
fn candidates() -> Vec<Provider> {
    let mut providers = Vec::new();

    // tmux first when inside a session, regardless of platform
    if env::var("TMUX").is_ok() {
        providers.push(Provider::Tmux);
    }

    if cfg!(target_os = "macos") {
        providers.push(Provider::MacOs);
    } else if cfg!(target_os = "windows") {
        providers.push(Provider::Wsl);
    } else if cfg!(target_os = "android") {
        providers.push(Provider::Termux);
    } else {
        if env::var("WSL_DISTRO_NAME").is_ok() {
            providers.push(Provider::Wsl);
        }
        providers.push(Provider::Wayland);
        providers.push(Provider::Xsel);
        providers.push(Provider::Xclip);
    }

    providers
}

/// Spawn a command and write the text to its stdin
fn pipe_into(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| ClipboardError::CommandFailed(format!("failed to spawn {}: {}", cmd, e)))?;

    child
        .stdin
        .as_mut()
        .ok_or_else(|| ClipboardError::CommandFailed(format!("failed to open stdin for {}", cmd)))?
        .write_all(text.as_bytes())?;

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status {}",
            cmd, status
        )))
    }
}
