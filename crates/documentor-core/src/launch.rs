use crate::{Conditions, Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Chm,
}

impl ExportFormat {
    /// Registry key of the exporter handling this format.
    pub fn target_name(self) -> &'static str {
        match self {
            ExportFormat::Html => "HTML",
            ExportFormat::Chm => "CHM",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.target_name())
    }
}

/// A non-interactive export requested from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub root: PathBuf,
    pub target: PathBuf,
}

/// Options the editor was launched with.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    root: Option<PathBuf>,
    target: Option<PathBuf>,
    html: bool,
    chm: bool,
    conditions: Conditions,
}

pub fn usage() -> &'static str {
    "documentor\n\
\n\
USAGE:\n\
  documentor [-root <path>] [-target <path>] [-html | -chm] [-D <condition>]...\n\
\n\
OPTIONS:\n\
  -root <path>     open documentation from the given root directory\n\
  -target <path>   target directory for the export operation\n\
  -html            export to static HTML pages\n\
  -chm             export to CHM\n\
  -D <condition>   enable a documentation condition (repeatable)\n\
"
}

fn usage_error(message: impl Into<String>) -> Error {
    Error::Usage {
        message: message.into(),
    }
}

impl LaunchOptions {
    /// Parses launch arguments (without the program name).
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let mut out = Self::default();

        let mut it = args.iter().map(AsRef::as_ref);
        while let Some(a) = it.next() {
            match a {
                "-root" | "--root" => {
                    let Some(path) = it.next() else {
                        return Err(usage_error("Missing argument for option: root"));
                    };
                    out.root = Some(PathBuf::from(path));
                }
                "-target" | "--target" => {
                    let Some(path) = it.next() else {
                        return Err(usage_error("Missing argument for option: target"));
                    };
                    out.target = Some(PathBuf::from(path));
                }
                "-html" | "--html" => out.html = true,
                "-chm" | "--chm" => out.chm = true,
                other if other.starts_with("-D") => {
                    let inline = other["-D".len()..].trim();
                    let condition = if inline.is_empty() {
                        let Some(next) = it.next() else {
                            return Err(usage_error("Missing argument for option: D"));
                        };
                        next.trim()
                    } else {
                        inline
                    };
                    if condition.is_empty() {
                        return Err(usage_error("Missing argument for option: D"));
                    }
                    out.conditions.enable(condition);
                }
                other if other.starts_with('-') => {
                    return Err(usage_error(format!("Unrecognized option: {other}")));
                }
                other => {
                    return Err(usage_error(format!("Unexpected argument: {other}")));
                }
            }
        }

        Ok(out)
    }

    pub fn initial_root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn export_target(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    pub fn export_to_html(&self) -> bool {
        self.html && self.root.is_some() && self.target.is_some()
    }

    pub fn export_to_chm(&self) -> bool {
        self.chm && self.root.is_some() && self.target.is_some()
    }

    /// The export to run instead of opening the editor, if the arguments ask for one.
    pub fn export_request(&self) -> Option<ExportRequest> {
        let format = if self.export_to_html() {
            ExportFormat::Html
        } else if self.export_to_chm() {
            ExportFormat::Chm
        } else {
            return None;
        };
        Some(ExportRequest {
            format,
            root: self.root.clone()?,
            target: self.target.clone()?,
        })
    }
}
