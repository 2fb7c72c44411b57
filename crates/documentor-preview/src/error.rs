use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported locator scheme `{scheme}`: {locator}")]
    UnsupportedScheme { scheme: String, locator: String },

    #[error("Locator does not name a local file: {locator}")]
    NotAFile { locator: String },

    #[error("failed to read {}: {source}", path.display())]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse SVG from {locator}: {source}")]
    SvgParse {
        locator: String,
        source: usvg::Error,
    },

    #[error("SVG viewport for {locator} has no content to paint")]
    NotLoaded { locator: String },

    #[error(transparent)]
    Xml(#[from] roxmltree::Error),

    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,

    #[error("failed to encode PNG")]
    PngEncode,
}
