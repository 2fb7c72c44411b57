#![forbid(unsafe_code)]

//! Headless core of the documentor editor.
//!
//! - [`Preferences`] and [`PreferenceStore`]: editor settings, loaded once and passed by reference
//! - [`LaunchOptions`]: command line options, including non-interactive export requests
//! - [`ExporterRegistry`]: name-to-exporter lookup built at composition time

pub mod conditions;
pub mod error;
pub mod exporter;
pub mod font;
pub mod launch;
pub mod prefs;
pub mod preview_mode;

pub use conditions::Conditions;
pub use error::{Error, Result};
pub use exporter::{Exporter, ExporterRegistry, ExporterRegistryBuilder};
pub use font::{EditorFont, FontStyle};
pub use launch::{ExportFormat, ExportRequest, LaunchOptions};
pub use prefs::{
    FsPathValidator, PathValidator, PreferenceKey, PreferenceStore, Preferences, WindowGeometry,
};
pub use preview_mode::PreviewMode;

#[cfg(test)]
mod tests;
