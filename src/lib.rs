//! Read and change the desktop wallpaper and its layout style, and enumerate
//! the monitors it is shown on.
//!
//! ```no_run
//! use deskpaper::{backend, Desktop, Style};
//!
//! # fn main() -> deskpaper::Result<()> {
//! let desktop = Desktop::new(backend::native()?);
//! for screen in desktop.screens()? {
//!     println!("{}  {}", screen.identifier(), screen.wallpaper()?.path.display());
//! }
//! desktop.set_style(&Style::Fit)?;
//! # Ok(())
//! # }
//! ```

pub mod logging;

pub mod backend;
pub mod data_loaders;
pub mod desktop;
pub mod error;
pub mod native;
pub mod paths;
pub mod style;

pub use backend::{MonitorDescriptor, PlatformBackend, Rect};
pub use desktop::{screen_with_identifier, Desktop, Screen, Target, Wallpaper};
pub use error::{Error, Result};
pub use style::Style;
