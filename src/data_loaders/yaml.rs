use std::{fs, io, path::Path};

use serde_yaml::Value;

use crate::warn;

/// Reads and parses a YAML document. A missing file is `None` without noise;
/// unreadable or malformed files are reported and also yield `None`.
pub fn load_yaml(path: &Path) -> Option<Value> {
    let txt = match fs::read_to_string(path) {
        Ok(txt) => txt,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("[CONFIG] Could not read {}: {e}", path.display());
            return None;
        }
    };

    match serde_yaml::from_str(&txt) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("[CONFIG] Could not parse {}: {e}", path.display());
            None
        }
    }
}
