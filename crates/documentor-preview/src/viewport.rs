use crate::{Error, Result, Size};
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use url::Url;

/// Embeddable widget painting one SVG document at a fixed pixel size.
///
/// Loading problems are not fatal: an unloaded viewport reports a 1x1 intrinsic size and
/// [`SvgViewport::render`] fails with [`Error::NotLoaded`].
pub struct SvgViewport {
    url: Url,
    data: Option<Arc<[u8]>>,
    tree: Option<usvg::Tree>,
    anti_alias: bool,
    scale_to_fit: bool,
    size: Size,
}

impl fmt::Debug for SvgViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SvgViewport")
            .field("url", &self.url.as_str())
            .field("loaded", &self.is_loaded())
            .field("anti_alias", &self.anti_alias)
            .field("scale_to_fit", &self.scale_to_fit)
            .field("size", &self.size)
            .finish()
    }
}

fn shared_fontdb() -> Arc<usvg::fontdb::Database> {
    static FONTDB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    Arc::clone(FONTDB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Arc::new(db)
    }))
}

fn local_path(url: &Url) -> Result<PathBuf> {
    if url.scheme() != "file" {
        return Err(Error::UnsupportedScheme {
            scheme: url.scheme().to_string(),
            locator: url.to_string(),
        });
    }
    url.to_file_path().map_err(|()| Error::NotAFile {
        locator: url.to_string(),
    })
}

fn load_source(url: &Url) -> Result<Arc<[u8]>> {
    let path = local_path(url)?;
    let bytes = std::fs::read(&path).map_err(|source| Error::ReadSource { path, source })?;
    Ok(bytes.into())
}

impl SvgViewport {
    /// Creates a viewport bound to `url` and loads its content.
    ///
    /// Only `file:` locators can be dereferenced.
    pub fn new(url: Url) -> Self {
        Self::with_anti_alias(url, false)
    }

    /// Like [`SvgViewport::new`], with the shape rendering chosen before the content is parsed.
    pub fn with_anti_alias(url: Url, anti_alias: bool) -> Self {
        let data = match load_source(&url) {
            Ok(data) => Some(data),
            Err(err) => {
                tracing::warn!(locator = %url, error = %err, "SVG source is not readable");
                None
            }
        };
        Self::from_source(url, data, anti_alias)
    }

    /// Parses SVG markup already in memory. `url` only identifies the content and anchors
    /// relative references inside it.
    pub fn from_data(url: Url, data: impl Into<Arc<[u8]>>) -> Self {
        Self::from_source(url, Some(data.into()), false)
    }

    fn from_source(url: Url, data: Option<Arc<[u8]>>, anti_alias: bool) -> Self {
        let mut viewport = Self {
            url,
            data,
            tree: None,
            anti_alias,
            scale_to_fit: false,
            size: Size::new(1, 1),
        };
        viewport.reparse();
        viewport.size = viewport.intrinsic_size();
        viewport
    }

    fn parse_options(&self) -> usvg::Options<'static> {
        let mut opt = usvg::Options {
            fontdb: shared_fontdb(),
            ..usvg::Options::default()
        };
        opt.shape_rendering = if self.anti_alias {
            usvg::ShapeRendering::GeometricPrecision
        } else {
            usvg::ShapeRendering::CrispEdges
        };
        if let Ok(path) = local_path(&self.url) {
            opt.resources_dir = path.parent().map(|p| p.to_path_buf());
        }
        opt
    }

    fn reparse(&mut self) {
        let Some(data) = &self.data else {
            self.tree = None;
            return;
        };
        match usvg::Tree::from_data(data, &self.parse_options()) {
            Ok(tree) => {
                tracing::debug!(locator = %self.url, anti_alias = self.anti_alias, "parsed SVG");
                self.tree = Some(tree);
            }
            Err(source) => {
                let err = Error::SvgParse {
                    locator: self.url.to_string(),
                    source,
                };
                tracing::warn!(error = %err, "SVG content could not be parsed");
                self.tree = None;
            }
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn is_loaded(&self) -> bool {
        self.tree.is_some()
    }

    pub fn anti_alias(&self) -> bool {
        self.anti_alias
    }

    /// Toggles anti-aliased shape rendering. The content is parsed again when the flag changes.
    pub fn set_anti_alias(&mut self, anti_alias: bool) {
        if self.anti_alias != anti_alias {
            self.anti_alias = anti_alias;
            self.reparse();
        }
    }

    pub fn scale_to_fit(&self) -> bool {
        self.scale_to_fit
    }

    pub fn set_scale_to_fit(&mut self, scale_to_fit: bool) {
        self.scale_to_fit = scale_to_fit;
    }

    /// Natural size of the content in pixels, rounded up.
    pub fn intrinsic_size(&self) -> Size {
        match &self.tree {
            Some(tree) => {
                let size = tree.size();
                Size::new(to_pixels(size.width()), to_pixels(size.height()))
            }
            None => Size::new(1, 1),
        }
    }

    pub fn intrinsic_width(&self) -> u32 {
        self.intrinsic_size().width
    }

    pub fn intrinsic_height(&self) -> u32 {
        self.intrinsic_size().height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Paints the content into a pixmap of the viewport's size.
    ///
    /// With scale-to-fit the content is stretched to the viewport on both axes; otherwise it is
    /// painted at its natural scale and clipped.
    pub fn render(&self, background: Option<tiny_skia::Color>) -> Result<tiny_skia::Pixmap> {
        let Some(tree) = &self.tree else {
            return Err(Error::NotLoaded {
                locator: self.url.to_string(),
            });
        };

        let mut pixmap =
            tiny_skia::Pixmap::new(self.size.width, self.size.height).ok_or(Error::PixmapAlloc)?;
        if let Some(color) = background {
            pixmap.fill(color);
        }

        let transform = if self.scale_to_fit {
            let natural = tree.size();
            tiny_skia::Transform::from_scale(
                self.size.width as f32 / natural.width(),
                self.size.height as f32 / natural.height(),
            )
        } else {
            tiny_skia::Transform::identity()
        };

        resvg::render(tree, transform, &mut pixmap.as_mut());
        Ok(pixmap)
    }

    pub fn render_png(&self, background: Option<tiny_skia::Color>) -> Result<Vec<u8>> {
        let pixmap = self.render(background)?;
        pixmap.encode_png().map_err(|_| Error::PngEncode)
    }
}

fn to_pixels(v: f32) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.ceil().min(u32::MAX as f32) as u32
    } else {
        1
    }
}
