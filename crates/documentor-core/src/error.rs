use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read preferences from {}: {source}", path.display())]
    ReadPreferences {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write preferences to {}: {source}", path.display())]
    WritePreferences {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid preferences JSON in {}: {source}", path.display())]
    InvalidPreferences {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unknown preview mode: {name}")]
    UnknownPreviewMode { name: String },

    #[error("Invalid editor font: {text}")]
    InvalidFont { text: String },

    #[error("No exporter registered for target `{name}`")]
    ExporterNotFound { name: String },

    #[error("An exporter for target `{name}` is already registered")]
    DuplicateExporter { name: String },

    #[error("No exporters are registered")]
    NoExporters,

    #[error("Export to {target_name} failed: {message}")]
    Export {
        target_name: String,
        message: String,
    },

    #[error("Command line parsing failed: {message}")]
    Usage { message: String },
}
