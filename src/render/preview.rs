//! Opening the finished report in the desktop viewer

use std::path::Path;
use std::process::Command;

/// Post-processing step run after the report has been written.
pub trait PreviewHook {
    fn preview(&self, path: &Path);
}

/// Launch the platform's default application for the file. Failures are
/// logged and otherwise ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

/// Leave the report closed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPreview;

impl PreviewHook for SystemViewer {
    fn preview(&self, path: &Path) {
        match opener_command(path).spawn() {
            Ok(_) => tracing::debug!("Opened {}", path.display()),
            Err(err) => {
                tracing::warn!("An error occurred while opening '{}': {}", path.display(), err)
            }
        }
    }
}

impl PreviewHook for NoPreview {
    fn preview(&self, _path: &Path) {}
}

fn opener_command(path: &Path) -> Command {
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    }
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}
