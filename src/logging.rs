use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::Path,
    sync::{
        atomic::{AtomicBool, AtomicU8, Ordering},
        Mutex, OnceLock,
    },
};

/* =========================
   GLOBAL STATE
   ========================= */

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static DEBUG: AtomicBool = AtomicBool::new(false);
static THRESHOLD: AtomicU8 = AtomicU8::new(WARN_LEVEL);
static LOG_FILE: OnceLock<Mutex<File>> = OnceLock::new();

const DEBUG_LEVEL: u8 = 0;
const INFO_LEVEL: u8 = 1;
const WARN_LEVEL: u8 = 2;
const ERROR_LEVEL: u8 = 3;

/* =========================
   PUBLIC API
   ========================= */

/// Starts emitting. Until this runs every macro is a no-op, so library users
/// stay quiet unless they opt in. Safe to call more than once.
pub fn init(debug: bool, level: &str) {
    set_debug(debug);
    set_level(level);
    INITIALIZED.store(true, Ordering::Relaxed);
}

pub fn set_debug(debug: bool) {
    DEBUG.store(debug, Ordering::Relaxed);
}

/// Unknown level names leave the threshold unchanged.
pub fn set_level(level: &str) {
    if let Some(rank) = level_rank(level) {
        THRESHOLD.store(rank, Ordering::Relaxed);
    }
}

/// Appends every emitted line to `path` from now on. Only the first file sticks.
pub fn set_log_file(path: &Path) -> io::Result<()> {
    let file = open_log_file(path)?;
    LOG_FILE
        .set(Mutex::new(file))
        .map_err(|_| io::Error::new(io::ErrorKind::AlreadyExists, "log file already open"))
}

#[inline]
pub fn should_log(level: &str) -> bool {
    if !INITIALIZED.load(Ordering::Relaxed) {
        return false;
    }
    if DEBUG.load(Ordering::Relaxed) {
        return true;
    }
    level_rank(level).unwrap_or(ERROR_LEVEL) >= THRESHOLD.load(Ordering::Relaxed)
}

/* =========================
   INTERNAL
   ========================= */

pub fn emit(level: &str, msg: String) {
    let line = format!("{} [{level}] {msg}", timestamp());

    if let Some(file) = LOG_FILE.get() {
        if let Ok(mut file) = file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }

    if DEBUG.load(Ordering::Relaxed) || level_rank(level).unwrap_or(ERROR_LEVEL) >= WARN_LEVEL {
        eprintln!("{line}");
    }
}

fn level_rank(level: &str) -> Option<u8> {
    match level.trim().to_ascii_lowercase().as_str() {
        "debug" | "trace" => Some(DEBUG_LEVEL),
        "info" => Some(INFO_LEVEL),
        "warn" | "warning" => Some(WARN_LEVEL),
        "error" => Some(ERROR_LEVEL),
        _ => None,
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn timestamp() -> String {
    let now = chrono::Local::now();
    now.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/* =========================
   MACROS
   ========================= */

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{
        if $crate::logging::should_log("DEBUG") {
            $crate::logging::emit("DEBUG", format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        if $crate::logging::should_log("INFO") {
            $crate::logging::emit("INFO", format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        if $crate::logging::should_log("WARN") {
            $crate::logging::emit("WARN", format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        if $crate::logging::should_log("ERROR") {
            $crate::logging::emit("ERROR", format!($($arg)*));
        }
    }};
}
