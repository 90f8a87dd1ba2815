//! Translation between [`Style`] and the two-field encoding the desktop store
//! persists: a numeric style code and a separate tile flag.
//!
//! Style codes:
//!   0:  centered, or tiled when the tile flag is set
//!   2:  stretched to fill the screen
//!   6:  resized to fit, keeping aspect ratio
//!   10: resized and cropped to fill, keeping aspect ratio

use crate::{
    error::{Error, Result},
    style::Style,
};

pub const CENTER_CODE: &str = "0";
pub const STRETCH_CODE: &str = "2";
pub const FIT_CODE: &str = "6";
pub const FILL_CODE: &str = "10";

pub const TILE_ON: &str = "1";
pub const TILE_OFF: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeStyle {
    pub code: &'static str,
    pub tile: &'static str,
}

/// Encodes a concrete style. `Current` has no encoding; callers treat it as
/// "leave the store alone" before reaching this point.
pub fn to_native(style: &Style) -> Result<NativeStyle> {
    let (code, tile) = match style {
        Style::Tile => (CENTER_CODE, TILE_ON),
        Style::Center => (CENTER_CODE, TILE_OFF),
        Style::Stretch => (STRETCH_CODE, TILE_OFF),
        Style::Fit => (FIT_CODE, TILE_OFF),
        Style::Fill => (FILL_CODE, TILE_OFF),
        Style::Current | Style::Unknown(_) => {
            return Err(Error::InvalidStyle(style.to_string()));
        }
    };
    Ok(NativeStyle { code, tile })
}

/// Decodes whatever the store holds. The tile flag wins over the code, and
/// codes this mapping does not know (newer OS layouts such as span) read as `Fill`.
pub fn from_native(code: &str, tile: &str) -> Style {
    if tile.trim() == TILE_ON {
        return Style::Tile;
    }

    match code.trim() {
        CENTER_CODE => Style::Center,
        STRETCH_CODE => Style::Stretch,
        FIT_CODE => Style::Fit,
        _ => Style::Fill,
    }
}
