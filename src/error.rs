use std::{io, path::PathBuf};

use thiserror::Error;

use crate::backend::BackendError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not enumerate monitors")]
    Enumeration(#[source] BackendError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("{0} is not supported on this platform")]
    NotSupported(&'static str),

    #[error("screen '{0}' was not found")]
    NotFound(String),

    #[error("a screen identifier must be specified")]
    ScreenRequired,

    #[error("invalid wallpaper style '{0}' (expected current, fill, fit, stretch, center or tile)")]
    InvalidStyle(String),

    #[error("wallpaper image {}", .path.display())]
    WallpaperPath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
