//! Per-monitor wallpaper cache kept by the shell under
//! `HKCU\Control Panel\Desktop`. Each blob starts with a fixed header followed
//! by the source image path as NUL-terminated UTF-16LE.

pub const LEGACY_VALUE_NAME: &str = "TranscodedImageCache";

const HEADER_LEN: usize = 24;

/// Value name holding the cache for monitor `index`.
pub fn value_name(index: usize) -> String {
    format!("{LEGACY_VALUE_NAME}_{index:03}")
}

/// Extracts the cached source path. Truncated blobs decode to an empty path.
pub fn decode(blob: &[u8]) -> String {
    let Some(body) = blob.get(HEADER_LEN..) else {
        return String::new();
    };

    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0)
        .collect();

    String::from_utf16_lossy(&units)
}
