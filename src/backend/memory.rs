//! Backend that keeps the whole store in memory and records every write.
//! Nothing reaches the OS, which makes it a dry-run target as well as a test double.

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use super::{BackendError, BackendResult, MonitorDescriptor, PlatformBackend, RawStyle, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    WallpaperPath,
    SetWallpaperPath,
    Style,
    SetStyle,
    EnumerateMonitors,
    CachedWallpaper,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Self::WallpaperPath => "read wallpaper path",
            Self::SetWallpaperPath => "write wallpaper path",
            Self::Style => "read wallpaper style",
            Self::SetStyle => "write wallpaper style",
            Self::EnumerateMonitors => "enumerate monitors",
            Self::CachedWallpaper => "read cached wallpaper",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Style { code: String, tile: String },
    WallpaperPath(PathBuf),
}

#[derive(Debug, Default)]
struct State {
    wallpaper_path: String,
    style: RawStyle,
    writes: Vec<Write>,
}

#[derive(Debug)]
pub struct MemoryBackend {
    monitors: Vec<MonitorDescriptor>,
    cached: BTreeMap<usize, String>,
    whole_desktop: bool,
    failing: BTreeSet<Operation>,
    failing_cache_slots: BTreeSet<usize>,
    state: RefCell<State>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
            cached: BTreeMap::new(),
            whole_desktop: true,
            failing: BTreeSet::new(),
            failing_cache_slots: BTreeSet::new(),
            state: RefCell::new(State::default()),
        }
    }

    pub fn with_wallpaper(self, path: impl Into<String>) -> Self {
        self.state.borrow_mut().wallpaper_path = path.into();
        self
    }

    pub fn with_style(self, code: &str, tile: &str) -> Self {
        self.state.borrow_mut().style = RawStyle {
            code: code.to_string(),
            tile: tile.to_string(),
        };
        self
    }

    pub fn with_monitor(mut self, name: &str, rect: Rect) -> Self {
        let handle = 0x1000 + self.monitors.len();
        let primary = self.monitors.is_empty();
        self.monitors.push(MonitorDescriptor {
            handle,
            name: name.to_string(),
            rect,
            primary,
        });
        self
    }

    pub fn with_cached(mut self, index: usize, path: impl Into<String>) -> Self {
        self.cached.insert(index, path.into());
        self
    }

    /// Platforms without a whole-desktop target demand an explicit screen.
    pub fn without_whole_desktop(mut self) -> Self {
        self.whole_desktop = false;
        self
    }

    pub fn failing(mut self, operation: Operation) -> Self {
        self.failing.insert(operation);
        self
    }

    pub fn failing_cache_slot(mut self, index: usize) -> Self {
        self.failing_cache_slots.insert(index);
        self
    }

    pub fn writes(&self) -> Vec<Write> {
        self.state.borrow().writes.clone()
    }

    pub fn wallpaper_path(&self) -> String {
        self.state.borrow().wallpaper_path.clone()
    }

    pub fn style(&self) -> RawStyle {
        self.state.borrow().style.clone()
    }

    fn check(&self, operation: Operation) -> BackendResult<()> {
        if self.failing.contains(&operation) {
            return Err(BackendError::new(operation.name(), "injected failure"));
        }
        Ok(())
    }
}

impl PlatformBackend for MemoryBackend {
    fn raw_wallpaper_path(&self) -> BackendResult<String> {
        self.check(Operation::WallpaperPath)?;
        Ok(self.state.borrow().wallpaper_path.clone())
    }

    fn set_raw_wallpaper_path(&self, absolute_path: &Path) -> BackendResult<()> {
        self.check(Operation::SetWallpaperPath)?;
        let mut state = self.state.borrow_mut();
        state.wallpaper_path = absolute_path.to_string_lossy().into_owned();
        state.writes.push(Write::WallpaperPath(absolute_path.to_path_buf()));
        Ok(())
    }

    fn raw_style(&self) -> BackendResult<RawStyle> {
        self.check(Operation::Style)?;
        Ok(self.state.borrow().style.clone())
    }

    fn set_raw_style(&self, code: &str, tile: &str) -> BackendResult<()> {
        self.check(Operation::SetStyle)?;
        let mut state = self.state.borrow_mut();
        state.style = RawStyle {
            code: code.to_string(),
            tile: tile.to_string(),
        };
        state.writes.push(Write::Style {
            code: code.to_string(),
            tile: tile.to_string(),
        });
        Ok(())
    }

    fn enumerate_monitors(&self) -> BackendResult<Vec<MonitorDescriptor>> {
        self.check(Operation::EnumerateMonitors)?;
        Ok(self.monitors.clone())
    }

    fn cached_wallpaper_for_index(&self, index: usize) -> BackendResult<String> {
        self.check(Operation::CachedWallpaper)?;
        if self.failing_cache_slots.contains(&index) {
            return Err(BackendError::new(
                Operation::CachedWallpaper.name(),
                format!("slot {index} unreadable"),
            ));
        }
        Ok(self.cached.get(&index).cloned().unwrap_or_default())
    }

    fn whole_desktop_target(&self) -> bool {
        self.whole_desktop
    }
}
