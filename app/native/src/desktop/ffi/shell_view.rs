//! Safe wrappers for the Windows shell's desktop folder view.
//!
//! The desktop is an Explorer folder view hosted by the shell process. It is
//! located through `IShellWindows`, then walked down to its `IFolderView2`:
//!
//! ```text
//! IShellWindows::FindWindowSW(CSIDL_DESKTOP)
//!   -> IServiceProvider::QueryService(SID_STopLevelBrowser)
//!   -> IShellBrowser::QueryActiveShellView
//!   -> IFolderView2
//! ```
//!
//! # Safety
//!
//! Every COM call is `unsafe` in the `windows` crate. All of them live in this
//! module; item ID lists returned by the shell are owned by [`ChildId`] and
//! freed with `CoTaskMemFree` on drop.
//!
//! # Thread Safety
//!
//! COM is initialized single-threaded apartment by [`WindowsShell::new`]. The
//! shell and its views must stay on the thread that created them.

use std::ffi::c_void;
use std::path::PathBuf;

use windows::Win32::Foundation::{POINT, S_OK};
use windows::Win32::System::Com::{
    CLSCTX_ALL, COINIT_APARTMENTTHREADED, CoCreateInstance, CoInitializeEx, CoTaskMemFree,
    CoUninitialize, IServiceProvider,
};
use windows::Win32::UI::Shell::Common::{ITEMIDLIST, STRRET};
use windows::Win32::UI::Shell::{
    FOLDERFLAGS, FWF_AUTOARRANGE, FWF_SNAPTOGRID, IEnumIDList, IFolderView2, IShellBrowser,
    IShellFolder, IShellView, IShellWindows, SHGDN_NORMAL, SID_STopLevelBrowser, SVGIO_ALLVIEW,
    SVSI_POSITIONITEM, SWC_DESKTOP, SWFO_NEEDDISPATCH, ShellWindows, StrRetToStrW,
};
use windows::core::{Interface, PWSTR, VARIANT};

use crate::core::{Error, Result};
use crate::desktop::{DesktopShell, DesktopView, IconRecord, Point};

/// `CSIDL_DESKTOP` as the variant location `FindWindowSW` expects.
const DESKTOP_LOCATION: i32 = 0;

// ============================================================================
// COM lifetime
// ============================================================================

/// Keeps COM initialized for as long as the shell lives.
#[derive(Debug)]
struct ComGuard {
    initialized: bool,
}

impl ComGuard {
    fn new() -> Self {
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        if hr.is_err() {
            // Already initialized by the host with another threading model
            tracing::debug!(?hr, "COM initialization skipped");
        }
        Self { initialized: hr.is_ok() }
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        if self.initialized {
            unsafe { CoUninitialize() };
        }
    }
}

/// A child item ID list allocated by the shell.
struct ChildId(*mut ITEMIDLIST);

impl ChildId {
    const fn as_ptr(&self) -> *const ITEMIDLIST { self.0.cast_const() }
}

impl Drop for ChildId {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe { CoTaskMemFree(Some(self.0.cast_const().cast::<c_void>())) };
        }
    }
}

fn unavailable(step: &str, err: &windows::core::Error) -> Error {
    Error::shell_unavailable(format!("{step}: {}", err.message()))
}

fn enumeration(step: &str, err: &windows::core::Error) -> Error {
    Error::enumeration(format!("{step}: {}", err.message()))
}

// ============================================================================
// Shell
// ============================================================================

/// The Windows desktop shell.
#[derive(Debug)]
pub struct WindowsShell {
    desktop_dir: Option<PathBuf>,
    _com: ComGuard,
}

impl WindowsShell {
    /// Initializes COM for the current thread.
    ///
    /// `desktop_dir` overrides the backing folder, which otherwise is the
    /// user's desktop folder.
    #[must_use]
    pub fn new(desktop_dir: Option<PathBuf>) -> Self {
        Self {
            desktop_dir,
            _com: ComGuard::new(),
        }
    }

    fn locate_view() -> Result<WindowsView> {
        let windows: IShellWindows = unsafe { CoCreateInstance(&ShellWindows, None, CLSCTX_ALL) }
            .map_err(|err| unavailable("shell windows", &err))?;

        let location = VARIANT::from(DESKTOP_LOCATION);
        let root = VARIANT::default();
        let mut hwnd = 0i32;
        let dispatch = unsafe {
            windows.FindWindowSW(&location, &root, SWC_DESKTOP, &mut hwnd, SWFO_NEEDDISPATCH)
        }
        .map_err(|err| unavailable("desktop window", &err))?;

        let provider: IServiceProvider =
            dispatch.cast().map_err(|err| unavailable("service provider", &err))?;
        let browser: IShellBrowser = unsafe { provider.QueryService(&SID_STopLevelBrowser) }
            .map_err(|err| unavailable("top-level browser", &err))?;
        let shell_view = unsafe { browser.QueryActiveShellView() }
            .map_err(|err| unavailable("active shell view", &err))?;
        let view: IFolderView2 =
            shell_view.cast().map_err(|err| unavailable("folder view", &err))?;
        let folder: IShellFolder =
            unsafe { view.GetFolder() }.map_err(|err| unavailable("desktop folder", &err))?;

        tracing::debug!(hwnd, "acquired desktop folder view");
        Ok(WindowsView { view, shell_view, folder })
    }
}

impl DesktopShell for WindowsShell {
    fn acquire_view(&self) -> Result<Box<dyn DesktopView + '_>> {
        Ok(Box::new(Self::locate_view()?))
    }

    fn desktop_folder(&self) -> Result<PathBuf> {
        self.desktop_dir
            .clone()
            .or_else(dirs::desktop_dir)
            .ok_or_else(|| Error::shell_unavailable("the desktop folder is unknown"))
    }
}

// ============================================================================
// View
// ============================================================================

struct WindowsView {
    view: IFolderView2,
    shell_view: IShellView,
    folder: IShellFolder,
}

impl WindowsView {
    #[allow(clippy::cast_sign_loss)] // Shell flag constants are non-negative
    fn items(&self) -> Result<Vec<(ChildId, String)>> {
        let list: IEnumIDList = unsafe { self.view.Items(SVGIO_ALLVIEW.0 as u32) }
            .map_err(|err| enumeration("items", &err))?;

        let mut items = Vec::new();
        loop {
            let mut next = [std::ptr::null_mut(); 1];
            let mut fetched = 0u32;
            let hr = unsafe { list.Next(&mut next, Some(&raw mut fetched)) };
            if hr.is_err() {
                return Err(Error::enumeration(format!("item enumeration failed: {hr:?}")));
            }
            if hr != S_OK || fetched == 0 {
                break;
            }

            let child = ChildId(next[0]);
            let name = self.display_name(&child)?;
            items.push((child, name));
        }

        Ok(items)
    }

    fn display_name(&self, child: &ChildId) -> Result<String> {
        let mut strret = STRRET::default();
        unsafe { self.folder.GetDisplayNameOf(child.as_ptr(), SHGDN_NORMAL, &raw mut strret) }
            .map_err(|err| enumeration("display name", &err))?;

        let mut text = PWSTR::null();
        unsafe { StrRetToStrW(&raw mut strret, Some(child.as_ptr()), &raw mut text) }
            .map_err(|err| enumeration("display name", &err))?;

        let name = unsafe { text.to_string() };
        unsafe { CoTaskMemFree(Some(text.0.cast_const().cast::<c_void>())) };
        name.map_err(|err| Error::enumeration(format!("display name is not UTF-16: {err}")))
    }

    #[allow(clippy::cast_sign_loss)] // Shell flag constants are non-negative
    fn set_flag(&self, flag: FOLDERFLAGS, enabled: bool) -> Result<()> {
        let mask = flag.0 as u32;
        let value = if enabled { mask } else { 0 };
        unsafe { self.view.SetCurrentFolderFlags(mask, value) }.map_err(|err| {
            Error::other(format!("failed to change folder flags: {}", err.message()))
        })
    }
}

impl DesktopView for WindowsView {
    fn enumerate_icons(&self) -> Result<Vec<IconRecord>> {
        let expected = self.item_count()?;
        let mut icons = Vec::with_capacity(expected);

        for (child, name) in self.items()? {
            let point = unsafe { self.view.GetItemPosition(child.as_ptr()) }
                .map_err(|err| enumeration("item position", &err))?;
            icons.push(IconRecord::new(name, Point::new(point.x, point.y)));
        }

        Ok(icons)
    }

    #[allow(clippy::cast_sign_loss)] // Shell flag constants are non-negative
    fn item_count(&self) -> Result<usize> {
        let count = unsafe { self.view.ItemCount(SVGIO_ALLVIEW.0 as u32) }
            .map_err(|err| enumeration("item count", &err))?;
        usize::try_from(count)
            .map_err(|_| Error::enumeration(format!("shell reported {count} items")))
    }

    #[allow(clippy::cast_sign_loss)] // Shell flag constants are non-negative
    fn position_icon(&mut self, name: &str, position: Point) -> Result<bool> {
        let Some((child, _)) = self.items()?.into_iter().find(|(_, item)| item == name) else {
            return Ok(false);
        };

        let point = POINT {
            x: position.x,
            y: position.y,
        };
        let children = [child.as_ptr()];
        unsafe {
            self.view.SelectAndPositionItems(
                1,
                children.as_ptr(),
                Some(&raw const point),
                SVSI_POSITIONITEM.0 as u32,
            )
        }
        .map_err(|err| Error::other(format!("failed to position {name}: {}", err.message())))?;

        Ok(true)
    }

    fn set_auto_arrange(&mut self, enabled: bool) -> Result<()> {
        self.set_flag(FWF_AUTOARRANGE, enabled)
    }

    fn set_snap_to_grid(&mut self, enabled: bool) -> Result<()> {
        self.set_flag(FWF_SNAPTOGRID, enabled)
    }

    fn request_refresh(&mut self) -> Result<()> {
        unsafe { self.shell_view.Refresh() }
            .map_err(|err| Error::other(format!("failed to refresh desktop: {}", err.message())))
    }
}
