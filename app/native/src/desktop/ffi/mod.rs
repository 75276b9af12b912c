//! Operating shell bindings.
//!
//! The real desktop surface is only reachable on Windows, through the shell's
//! COM interfaces (see [`shell_view`]). Every other platform gets
//! [`UnsupportedShell`], which fails each call with `ShellUnavailable`.

#[cfg(windows)]
pub mod shell_view;

use std::path::PathBuf;

#[cfg(windows)]
pub use shell_view::WindowsShell;

use super::{DesktopShell, DesktopView};
use crate::core::{Error, Result};

/// Returns the desktop shell of the running platform.
///
/// `desktop_dir` overrides the folder backing the desktop surface.
#[must_use]
pub fn native_shell(desktop_dir: Option<PathBuf>) -> Box<dyn DesktopShell> {
    #[cfg(windows)]
    {
        Box::new(WindowsShell::new(desktop_dir))
    }

    #[cfg(not(windows))]
    {
        Box::new(UnsupportedShell { desktop_dir })
    }
}

/// Shell of platforms without a reachable desktop surface.
#[derive(Debug, Clone, Default)]
pub struct UnsupportedShell {
    desktop_dir: Option<PathBuf>,
}

impl UnsupportedShell {
    const REASON: &'static str = "the desktop icon view can only be reached on Windows";
}

impl DesktopShell for UnsupportedShell {
    fn acquire_view(&self) -> Result<Box<dyn DesktopView + '_>> {
        Err(Error::shell_unavailable(Self::REASON))
    }

    fn desktop_folder(&self) -> Result<PathBuf> {
        self.desktop_dir.clone().ok_or_else(|| Error::shell_unavailable(Self::REASON))
    }
}
