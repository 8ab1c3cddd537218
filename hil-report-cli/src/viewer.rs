//! Display step
//!
//! Hands the saved image to the platform's default viewer and waits for the
//! launcher to return. On macOS and Windows the launcher blocks until the
//! viewer is closed; `xdg-open` returns as soon as the viewer has started.

use std::path::Path;
use std::process::Command;

/// Open `path` in the system image viewer
///
/// Blocks until the viewer is closed on macOS and Windows. On Linux and other
/// Unix systems `xdg-open` hands the file to the desktop and returns right
/// away, so the run ends while the viewer is still open.
///
/// The figure is already on disk at this point, so a missing or failing
/// viewer is reported and otherwise ignored.
pub fn show(path: &Path) {
    let mut command = opener_command(path);
    log::info!("Opening {:?} with {:?}", path, command.get_program());

    match command.status() {
        Ok(status) if status.success() => log::debug!("{:?} returned", command.get_program()),
        Ok(status) => log::warn!("Viewer exited with {}", status),
        Err(e) => log::warn!("Could not launch image viewer: {}", e),
    }
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg("-W").arg(path);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "/WAIT", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
