//! Primitive operations against the OS wallpaper store.
//!
//! Everything here speaks the store's own vocabulary: raw path strings, the
//! style code / tile flag pair, and monitor descriptors in enumeration order.
//! Meaning is attached one level up, in [`crate::desktop`] and [`crate::native`].

use std::{error::Error as StdError, path::Path};

use serde::Serialize;
use thiserror::Error;

use crate::error::Result;

pub mod image_cache;
pub mod memory;
#[cfg(windows)]
pub mod win32;

pub type BackendResult<T> = std::result::Result<T, BackendError>;

#[derive(Debug, Error)]
#[error("{operation} failed")]
pub struct BackendError {
    operation: &'static str,
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl BackendError {
    pub fn new(operation: &'static str, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

/// Bounding box in virtual desktop coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorDescriptor {
    pub handle: usize,
    /// Device name; empty when the OS did not report one.
    pub name: String,
    pub rect: Rect,
    pub primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStyle {
    pub code: String,
    pub tile: String,
}

pub trait PlatformBackend {
    fn raw_wallpaper_path(&self) -> BackendResult<String>;

    /// `absolute_path` has already been resolved and checked to exist.
    fn set_raw_wallpaper_path(&self, absolute_path: &Path) -> BackendResult<()>;

    fn raw_style(&self) -> BackendResult<RawStyle>;

    fn set_raw_style(&self, code: &str, tile: &str) -> BackendResult<()>;

    fn enumerate_monitors(&self) -> BackendResult<Vec<MonitorDescriptor>>;

    /// Per-monitor cached wallpaper. An empty string means "no entry", not failure.
    fn cached_wallpaper_for_index(&self, index: usize) -> BackendResult<String>;

    /// Whether the desktop itself can be addressed as one screen covering every monitor.
    fn whole_desktop_target(&self) -> bool {
        true
    }
}

impl<B: PlatformBackend + ?Sized> PlatformBackend for Box<B> {
    fn raw_wallpaper_path(&self) -> BackendResult<String> {
        (**self).raw_wallpaper_path()
    }

    fn set_raw_wallpaper_path(&self, absolute_path: &Path) -> BackendResult<()> {
        (**self).set_raw_wallpaper_path(absolute_path)
    }

    fn raw_style(&self) -> BackendResult<RawStyle> {
        (**self).raw_style()
    }

    fn set_raw_style(&self, code: &str, tile: &str) -> BackendResult<()> {
        (**self).set_raw_style(code, tile)
    }

    fn enumerate_monitors(&self) -> BackendResult<Vec<MonitorDescriptor>> {
        (**self).enumerate_monitors()
    }

    fn cached_wallpaper_for_index(&self, index: usize) -> BackendResult<String> {
        (**self).cached_wallpaper_for_index(index)
    }

    fn whole_desktop_target(&self) -> bool {
        (**self).whole_desktop_target()
    }
}

/// Backend for the running operating system. Construct once at startup and
/// hand it to [`crate::desktop::Desktop::new`].
#[cfg(windows)]
pub fn native() -> Result<Box<dyn PlatformBackend>> {
    Ok(Box::new(win32::Win32Backend::new()))
}

#[cfg(not(windows))]
pub fn native() -> Result<Box<dyn PlatformBackend>> {
    Err(crate::error::Error::NotSupported("wallpaper control"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_names_the_operation_and_keeps_the_source() {
        let err = BackendError::new("RegGetValueW(WallpaperStyle)", "access denied");
        assert_eq!(err.operation(), "RegGetValueW(WallpaperStyle)");
        assert_eq!(err.to_string(), "RegGetValueW(WallpaperStyle) failed");
        let source = StdError::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("access denied"));
    }

    #[test]
    fn rect_dimensions() {
        let rect = Rect::new(-1920, 0, 0, 1080);
        assert_eq!(rect.width(), 1920);
        assert_eq!(rect.height(), 1080);
    }

    #[cfg(not(windows))]
    #[test]
    fn native_backend_is_unsupported_off_windows() {
        assert!(matches!(
            native(),
            Err(crate::error::Error::NotSupported(_))
        ));
    }
}
