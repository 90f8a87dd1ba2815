use std::{
    ffi::c_void,
    io, iter, mem,
    os::windows::ffi::OsStrExt,
    path::Path,
};

use windows::{
    core::BOOL,
    Win32::{
        Foundation::{ERROR_TIMEOUT, LPARAM, MAX_PATH, RECT},
        Graphics::Gdi::{EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFOEXW},
        UI::WindowsAndMessaging::{
            SystemParametersInfoW, SPIF_SENDCHANGE, SPIF_UPDATEINIFILE, SPI_GETDESKWALLPAPER,
            SPI_SETDESKWALLPAPER, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
        },
    },
};
use winreg::{
    enums::{HKEY_CURRENT_USER, KEY_READ, KEY_SET_VALUE},
    RegKey,
};

use super::{
    image_cache, BackendError, BackendResult, MonitorDescriptor, PlatformBackend, RawStyle, Rect,
};
use crate::{debug, warn};

const DESKTOP_KEY: &str = r"Control Panel\Desktop";
const STYLE_VALUE: &str = "WallpaperStyle";
const TILE_VALUE: &str = "TileWallpaper";

/// `SystemParametersInfoW` for the image, `HKCU\Control Panel\Desktop` for the
/// style and per-monitor cache, GDI for monitor enumeration.
#[derive(Debug, Default)]
pub struct Win32Backend;

impl Win32Backend {
    pub fn new() -> Self {
        Self
    }

    fn desktop_key(&self, flags: u32) -> BackendResult<RegKey> {
        RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey_with_flags(DESKTOP_KEY, flags)
            .map_err(|e| BackendError::new("RegOpenKeyExW(Control Panel\\Desktop)", e))
    }

    fn read_string(&self, name: &'static str) -> BackendResult<String> {
        self.desktop_key(KEY_READ)?
            .get_value::<String, _>(name)
            .map_err(|e| BackendError::new(name, e))
    }

    /// `Ok(None)` when the value does not exist.
    fn read_image_cache(&self, name: &str) -> BackendResult<Option<String>> {
        match self.desktop_key(KEY_READ)?.get_raw_value(name) {
            Ok(value) => Ok(Some(image_cache::decode(&value.bytes))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BackendError::new("RegQueryValueExW(TranscodedImageCache)", e)),
        }
    }
}

impl PlatformBackend for Win32Backend {
    fn raw_wallpaper_path(&self) -> BackendResult<String> {
        let mut buffer = [0u16; MAX_PATH as usize];
        unsafe {
            SystemParametersInfoW(
                SPI_GETDESKWALLPAPER,
                buffer.len() as u32,
                Some(buffer.as_mut_ptr() as *mut c_void),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        }
        .map_err(|e| BackendError::new("SystemParametersInfoW(SPI_GETDESKWALLPAPER)", e.to_string()))?;

        Ok(utf16_until_nul(&buffer))
    }

    fn set_raw_wallpaper_path(&self, absolute_path: &Path) -> BackendResult<()> {
        let mut wide: Vec<u16> = absolute_path
            .as_os_str()
            .encode_wide()
            .chain(iter::once(0))
            .collect();

        let result = unsafe {
            SystemParametersInfoW(
                SPI_SETDESKWALLPAPER,
                0,
                Some(wide.as_mut_ptr() as *mut c_void),
                SPIF_UPDATEINIFILE | SPIF_SENDCHANGE,
            )
        };

        match result {
            Ok(()) => {
                debug!("[WIN32] Wallpaper set to {}", absolute_path.display());
                Ok(())
            }
            // The value is persisted before the change broadcast; a slow listener is not a failure.
            Err(e) if e.code() == ERROR_TIMEOUT.to_hresult() => {
                warn!(
                    "[WIN32] Wallpaper change broadcast timed out for {}",
                    absolute_path.display()
                );
                Ok(())
            }
            Err(e) => Err(BackendError::new(
                "SystemParametersInfoW(SPI_SETDESKWALLPAPER)",
                e.to_string(),
            )),
        }
    }

    fn raw_style(&self) -> BackendResult<RawStyle> {
        Ok(RawStyle {
            code: self.read_string(STYLE_VALUE)?,
            tile: self.read_string(TILE_VALUE)?,
        })
    }

    fn set_raw_style(&self, code: &str, tile: &str) -> BackendResult<()> {
        let key = self.desktop_key(KEY_READ | KEY_SET_VALUE)?;
        key.set_value(STYLE_VALUE, &code.to_string())
            .map_err(|e| BackendError::new(STYLE_VALUE, e))?;
        key.set_value(TILE_VALUE, &tile.to_string())
            .map_err(|e| BackendError::new(TILE_VALUE, e))?;
        debug!("[WIN32] {}={} {}={}", STYLE_VALUE, code, TILE_VALUE, tile);
        Ok(())
    }

    fn enumerate_monitors(&self) -> BackendResult<Vec<MonitorDescriptor>> {
        unsafe extern "system" fn enum_monitor_proc(
            monitor: HMONITOR,
            _hdc: HDC,
            rect: *mut RECT,
            lparam: LPARAM,
        ) -> BOOL {
            let monitors = &mut *(lparam.0 as *mut Vec<MonitorDescriptor>);

            let mut info: MONITORINFOEXW = mem::zeroed();
            info.monitorInfo.cbSize = mem::size_of::<MONITORINFOEXW>() as u32;

            let (name, primary, info_rect) =
                if GetMonitorInfoW(monitor, &mut info as *mut MONITORINFOEXW as *mut _).as_bool() {
                    (
                        utf16_until_nul(&info.szDevice),
                        info.monitorInfo.dwFlags != 0,
                        info.monitorInfo.rcMonitor,
                    )
                } else {
                    (String::new(), false, RECT::default())
                };

            let rect = if rect.is_null() { info_rect } else { *rect };

            monitors.push(MonitorDescriptor {
                handle: monitor.0 as usize,
                name,
                rect: Rect::new(rect.left, rect.top, rect.right, rect.bottom),
                primary,
            });

            BOOL(1)
        }

        let mut monitors = Vec::<MonitorDescriptor>::new();
        let ok = unsafe {
            EnumDisplayMonitors(
                None,
                None,
                Some(enum_monitor_proc),
                LPARAM((&mut monitors as *mut Vec<MonitorDescriptor>) as isize),
            )
        };

        if !ok.as_bool() {
            return Err(BackendError::new(
                "EnumDisplayMonitors",
                "EnumDisplayMonitors was not successful",
            ));
        }

        debug!("[WIN32] Enumerated {} monitor(s)", monitors.len());
        Ok(monitors)
    }

    fn cached_wallpaper_for_index(&self, index: usize) -> BackendResult<String> {
        if let Some(path) = self.read_image_cache(&image_cache::value_name(index))? {
            return Ok(path);
        }

        // Single-monitor shells only write the unnumbered value.
        if index == 0 {
            return Ok(self
                .read_image_cache(image_cache::LEGACY_VALUE_NAME)?
                .unwrap_or_default());
        }

        Ok(String::new())
    }
}

fn utf16_until_nul(units: &[u16]) -> String {
    let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
    String::from_utf16_lossy(&units[..end])
}
