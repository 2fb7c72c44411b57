use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the HTML preview is placed relative to the page editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreviewMode {
    #[default]
    VerticalSplit,
    HorizontalSplit,
    Floating,
    Hidden,
}

impl PreviewMode {
    pub const ALL: [PreviewMode; 4] = [
        PreviewMode::VerticalSplit,
        PreviewMode::HorizontalSplit,
        PreviewMode::Floating,
        PreviewMode::Hidden,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PreviewMode::VerticalSplit => "VerticalSplit",
            PreviewMode::HorizontalSplit => "HorizontalSplit",
            PreviewMode::Floating => "Floating",
            PreviewMode::Hidden => "Hidden",
        }
    }

    /// Whether the preview shares the main window with the editor.
    pub fn is_split(self) -> bool {
        matches!(
            self,
            PreviewMode::VerticalSplit | PreviewMode::HorizontalSplit
        )
    }
}

impl fmt::Display for PreviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PreviewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| Error::UnknownPreviewMode {
                name: s.to_string(),
            })
    }
}
