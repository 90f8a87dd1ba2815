//! Desktop and per-monitor wallpaper targets.
//!
//! A [`Desktop`] owns the platform backend and a lazily taken snapshot of the
//! attached monitors. Callers address either one monitor ([`Screen`]) or, on
//! platforms that support it, the desktop as a whole; [`Target`] is the union of
//! the two and carries the shared get/set capability.

use std::{
    cell::OnceCell,
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    backend::{MonitorDescriptor, PlatformBackend},
    debug,
    error::{Error, Result},
    info, native,
    style::Style,
};

/// Identifier reported by the whole-desktop target.
pub const WHOLE_DESKTOP_IDENTIFIER: &str = "desktop";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wallpaper {
    pub path: PathBuf,
    pub style: Style,
}

impl Wallpaper {
    pub fn new(path: impl Into<PathBuf>, style: Style) -> Self {
        Self {
            path: path.into(),
            style,
        }
    }
}

pub struct Desktop<B> {
    backend: B,
    monitors: OnceCell<Vec<MonitorDescriptor>>,
    whole_desktop: bool,
}

impl<B: PlatformBackend> Desktop<B> {
    pub fn new(backend: B) -> Self {
        let whole_desktop = backend.whole_desktop_target();
        Self {
            backend,
            monitors: OnceCell::new(),
            whole_desktop,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Monitors as enumerated on first use. Later calls return the same snapshot.
    pub fn monitors(&self) -> Result<&[MonitorDescriptor]> {
        if let Some(monitors) = self.monitors.get() {
            return Ok(monitors);
        }

        let enumerated = self
            .backend
            .enumerate_monitors()
            .map_err(Error::Enumeration)?;
        debug!("[DESKTOP] {} monitor(s) attached", enumerated.len());
        Ok(self.monitors.get_or_init(|| enumerated))
    }

    pub fn screens(&self) -> Result<Vec<Screen<'_, B>>> {
        Ok(self
            .monitors()?
            .iter()
            .enumerate()
            .map(|(index, monitor)| Screen {
                desktop: self,
                monitor,
                index,
            })
            .collect())
    }

    /// The desktop addressed as a single screen, if the platform allows it.
    pub fn as_screen(&self) -> Option<Target<'_, B>> {
        self.whole_desktop.then_some(Target::WholeDesktop(self))
    }

    /// Picks the target for an operation. Without an identifier only the
    /// whole-desktop target qualifies; there is no fallback to the first monitor.
    pub fn target(&self, identifier: Option<&str>) -> Result<Target<'_, B>> {
        match identifier.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => {
                let screens = self.screens()?;
                screen_with_identifier(&screens, id)
                    .copied()
                    .map(Target::Monitor)
                    .ok_or_else(|| Error::NotFound(id.to_string()))
            }
            None => self.as_screen().ok_or(Error::ScreenRequired),
        }
    }

    /// Desktop-wide wallpaper and style.
    pub fn wallpaper(&self) -> Result<Wallpaper> {
        let path = self.backend.raw_wallpaper_path()?;
        Ok(Wallpaper::new(path, self.style()?))
    }

    /// Style is stored once for the whole desktop, even where images are per monitor.
    pub fn style(&self) -> Result<Style> {
        let raw = self.backend.raw_style()?;
        Ok(native::from_native(&raw.code, &raw.tile))
    }

    /// Writes the style (unless `Current`) and then the image. The style has to
    /// be committed first: setting the image is what repaints the desktop.
    pub fn set_wallpaper_with_style(&self, path: &Path, style: &Style) -> Result<()> {
        if !style.is_valid() {
            return Err(Error::InvalidStyle(style.to_string()));
        }

        let absolute = resolve_wallpaper_path(path)?;

        if !style.is_current() {
            let encoded = native::to_native(style)?;
            self.backend.set_raw_style(encoded.code, encoded.tile)?;
        }
        self.backend.set_raw_wallpaper_path(&absolute)?;

        info!("[DESKTOP] Wallpaper set to {} ({})", absolute.display(), style);
        Ok(())
    }

    /// Changes only the layout. A style write alone does not repaint, so the
    /// current image is written again right after it.
    pub fn set_style(&self, style: &Style) -> Result<()> {
        if style.is_current() {
            return Ok(());
        }
        if !style.is_valid() {
            return Err(Error::InvalidStyle(style.to_string()));
        }

        let current = self.backend.raw_wallpaper_path()?;
        if current.is_empty() {
            return Err(Error::WallpaperPath {
                path: PathBuf::new(),
                source: io::Error::new(io::ErrorKind::NotFound, "no wallpaper image is set"),
            });
        }

        self.set_wallpaper_with_style(Path::new(&current), style)
    }

    /// Cached wallpaper of monitor `index`. An empty slot above 0 borrows slot 0,
    /// which is where single-wallpaper setups keep the shared image.
    pub fn current_wallpaper(&self, index: usize) -> Result<PathBuf> {
        let path = self.backend.cached_wallpaper_for_index(index)?;
        if path.is_empty() && index > 0 {
            debug!("[DESKTOP] No cached wallpaper for monitor {index}, using monitor 0");
            return Ok(PathBuf::from(self.backend.cached_wallpaper_for_index(0)?));
        }
        Ok(PathBuf::from(path))
    }

    /// Every populated cache slot, from 0 up to the first empty one.
    pub fn cached_wallpapers(&self) -> Result<Vec<PathBuf>> {
        let slots = self.monitors()?.len().max(1);
        let mut paths = Vec::new();
        for index in 0..slots {
            let path = self.backend.cached_wallpaper_for_index(index)?;
            if path.is_empty() {
                break;
            }
            paths.push(PathBuf::from(path));
        }
        Ok(paths)
    }
}

/// One attached monitor, borrowed from the [`Desktop`] that enumerated it.
pub struct Screen<'a, B> {
    desktop: &'a Desktop<B>,
    monitor: &'a MonitorDescriptor,
    index: usize,
}

impl<B> Clone for Screen<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for Screen<'_, B> {}

impl<'a, B: PlatformBackend> Screen<'a, B> {
    /// Monitor name, or the enumeration index when the name is empty.
    pub fn identifier(&self) -> String {
        if self.monitor.name.is_empty() {
            self.index.to_string()
        } else {
            self.monitor.name.clone()
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn monitor(&self) -> &'a MonitorDescriptor {
        self.monitor
    }

    pub fn wallpaper(&self) -> Result<Wallpaper> {
        let path = self.desktop.current_wallpaper(self.index)?;
        Ok(Wallpaper::new(path, self.desktop.style()?))
    }

    /// Per-monitor writes have no native counterpart; refusing beats silently
    /// changing every monitor.
    pub fn set_wallpaper(&self, _wallpaper: &Wallpaper) -> Result<()> {
        Err(Error::NotSupported("setting the wallpaper of a single monitor"))
    }
}

/// Anything a wallpaper can be read from or written to.
pub enum Target<'a, B> {
    Monitor(Screen<'a, B>),
    WholeDesktop(&'a Desktop<B>),
}

impl<B: PlatformBackend> Target<'_, B> {
    pub fn identifier(&self) -> String {
        match self {
            Self::Monitor(screen) => screen.identifier(),
            Self::WholeDesktop(_) => WHOLE_DESKTOP_IDENTIFIER.to_string(),
        }
    }

    pub fn wallpaper(&self) -> Result<Wallpaper> {
        match self {
            Self::Monitor(screen) => screen.wallpaper(),
            Self::WholeDesktop(desktop) => desktop.wallpaper(),
        }
    }

    pub fn set_wallpaper(&self, wallpaper: &Wallpaper) -> Result<()> {
        match self {
            Self::Monitor(screen) => screen.set_wallpaper(wallpaper),
            Self::WholeDesktop(desktop) => {
                desktop.set_wallpaper_with_style(&wallpaper.path, &wallpaper.style)
            }
        }
    }

    pub fn is_whole_desktop(&self) -> bool {
        matches!(self, Self::WholeDesktop(_))
    }
}

/// First screen whose identifier equals `id` once surrounding whitespace is trimmed.
pub fn screen_with_identifier<'s, 'a, B: PlatformBackend>(
    screens: &'s [Screen<'a, B>],
    id: &str,
) -> Option<&'s Screen<'a, B>> {
    let id = id.trim();
    screens.iter().find(|screen| screen.identifier() == id)
}

fn resolve_wallpaper_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map_err(|source| Error::WallpaperPath {
                path: path.to_path_buf(),
                source,
            })?
            .join(path)
    };

    match fs::metadata(&absolute) {
        Ok(meta) if meta.is_file() => Ok(absolute),
        Ok(_) => Err(Error::WallpaperPath {
            path: absolute,
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        }),
        Err(source) => Err(Error::WallpaperPath {
            path: absolute,
            source,
        }),
    }
}
