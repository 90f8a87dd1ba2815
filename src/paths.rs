use std::path::PathBuf;

use crate::{debug, warn};

const APP_DIR: &str = ".deskpaper";

pub fn user_home_dir() -> Option<PathBuf> {
    // Primary (most reliable on Windows)
    if let Some(profile) = std::env::var_os("USERPROFILE").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(profile));
    }

    // Fallback (older / edge cases)
    let drive = std::env::var("HOMEDRIVE").ok();
    let path = std::env::var("HOMEPATH").ok();
    if let (Some(d), Some(p)) = (drive, path) {
        let full = PathBuf::from(format!("{d}{p}"));
        debug!("Resolved home directory from HOMEDRIVE/HOMEPATH: {}", full.display());
        return Some(full);
    }

    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(home));
    }

    warn!("Could not resolve home directory from USERPROFILE, HOMEDRIVE/HOMEPATH or HOME");
    None
}

/// `~/.deskpaper/`; config and logs live here.
pub fn app_root_dir() -> PathBuf {
    if let Some(home) = user_home_dir() {
        return home.join(APP_DIR);
    }

    match std::env::current_exe() {
        Ok(exe) => exe
            .parent()
            .map(|p| p.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(APP_DIR)),
        Err(e) => {
            warn!("Failed to get current executable path: {e}");
            PathBuf::from(APP_DIR)
        }
    }
}

pub fn config_path() -> PathBuf {
    app_root_dir().join("config.yaml")
}

pub fn log_path() -> PathBuf {
    app_root_dir().join("deskpaper.log")
}
