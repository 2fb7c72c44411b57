//! Editor preferences.
//!
//! Preferences are a plain serde struct: they are loaded once at startup through a
//! [`PreferenceStore`] and handed to consumers by reference. Checks against the file system go
//! through a [`PathValidator`] so callers can substitute their own.

mod store;
mod validator;

pub use store::{PreferenceKey, PreferenceListener, PreferenceStore};
pub use validator::{FsPathValidator, PathValidator};

use crate::{EditorFont, Exporter, ExporterRegistry, PreviewMode, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WindowGeometry {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub mercurial_path: Option<PathBuf>,
    pub chm_compiler_path: Option<PathBuf>,
    pub default_exporter: Option<String>,
    pub recent_repositories: Vec<String>,
    pub recent_targets: Vec<String>,
    pub editor_font: EditorFont,
    pub spell_checking: bool,
    pub preview_mode: PreviewMode,
    pub preview_splitter_pos: f64,
    pub floating_preview: WindowGeometry,
    pub main_window: WindowGeometry,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            mercurial_path: None,
            chm_compiler_path: None,
            default_exporter: None,
            recent_repositories: Vec::new(),
            recent_targets: Vec::new(),
            editor_font: EditorFont::default(),
            spell_checking: true,
            preview_mode: PreviewMode::default(),
            preview_splitter_pos: 0.5,
            floating_preview: WindowGeometry::new(0, 0, 640, 480),
            main_window: WindowGeometry::new(0, 0, 1024, 768),
        }
    }
}

impl Preferences {
    pub fn has_valid_mercurial_path(&self, validator: &dyn PathValidator) -> bool {
        is_valid_tool(self.mercurial_path.as_deref(), validator)
    }

    pub fn has_valid_chm_compiler_path(&self, validator: &dyn PathValidator) -> bool {
        is_valid_tool(self.chm_compiler_path.as_deref(), validator)
    }

    /// Looks up the exporter chosen in the preferences.
    pub fn default_exporter<'r>(
        &self,
        registry: &'r ExporterRegistry,
    ) -> Result<&'r Arc<dyn Exporter>> {
        registry.default_exporter(self.default_exporter.as_deref())
    }

    /// Clamps values that the UI can only produce inside a fixed range.
    pub(crate) fn normalize(&mut self) {
        let pos = self.preview_splitter_pos;
        self.preview_splitter_pos = if pos.is_finite() {
            pos.clamp(0.0, 1.0)
        } else {
            0.5
        };
    }
}

fn is_valid_tool(path: Option<&Path>, validator: &dyn PathValidator) -> bool {
    path.is_some_and(|p| validator.is_executable(p))
}
