use crate::element::{Element, ElementId, UserAgentCallback};
use crate::replaced::{
    FormSubmissionListener, ReplacedElement, ReplacedElementFactory, Replacement,
};
use crate::{DimensionHint, LayoutContext, Size};
use rustc_hash::FxHashMap;
use std::any::Any;
use std::fmt;
use std::rc::Rc;
use url::Url;

/// A raster image box produced by [`ImageReplacedElementFactory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReplacement {
    pub locator: String,
    /// Natural size of the image, when it could be read.
    pub intrinsic: Option<Size>,
    pub size: Size,
}

impl Replacement for ImageReplacement {
    fn size(&self) -> Size {
        self.size
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// What is known about an element's image independently of the layout hint.
#[derive(Debug, Clone)]
struct CachedImage {
    locator: String,
    intrinsic: Option<Size>,
}

/// Generic replaced-element factory for raster images.
///
/// The resolved locator and natural size are cached per element until
/// [`ReplacedElementFactory::remove`] or [`ReplacedElementFactory::reset`]; the layout hint is
/// applied on every request.
#[derive(Default)]
pub struct ImageReplacedElementFactory {
    cache: FxHashMap<ElementId, CachedImage>,
    listener: Option<Rc<dyn FormSubmissionListener>>,
}

impl fmt::Debug for ImageReplacedElementFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageReplacedElementFactory")
            .field("cached", &self.cache.len())
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl ImageReplacedElementFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn form_submission_listener(&self) -> Option<&Rc<dyn FormSubmissionListener>> {
        self.listener.as_ref()
    }
}

/// Reads the pixel dimensions of a local raster image without decoding it fully.
fn read_intrinsic_size(locator: &str) -> Option<Size> {
    let url = Url::parse(locator).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    let path = url.to_file_path().ok()?;
    match image::image_dimensions(&path) {
        Ok((width, height)) => Some(Size::new(width, height)),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "image dimensions unavailable");
            None
        }
    }
}

impl ReplacedElementFactory for ImageReplacedElementFactory {
    fn create_replaced_element(
        &mut self,
        context: &mut LayoutContext<'_>,
        element: Option<&dyn Element>,
        uac: &dyn UserAgentCallback,
        hint: DimensionHint,
    ) -> Option<ReplacedElement> {
        let element = element?;
        let handler = context.namespace_handler();
        if !handler.is_image_element(element) {
            return None;
        }

        let cached = match self.cache.get(&element.id()).cloned() {
            Some(cached) => cached,
            None => {
                let source = handler.image_source_uri(element)?;
                let locator = uac.resolve_uri(&source);
                let intrinsic = read_intrinsic_size(&locator);
                let cached = CachedImage { locator, intrinsic };
                self.cache.insert(element.id(), cached.clone());
                cached
            }
        };

        let size = hint.resolve(cached.intrinsic.unwrap_or(Size::new(1, 1)));
        Some(ReplacedElement::Delegated(Box::new(ImageReplacement {
            locator: cached.locator,
            intrinsic: cached.intrinsic,
            size,
        })))
    }

    fn reset(&mut self) {
        self.cache.clear();
    }

    fn remove(&mut self, element: &dyn Element) {
        self.cache.remove(&element.id());
    }

    fn set_form_submission_listener(&mut self, listener: Option<Rc<dyn FormSubmissionListener>>) {
        self.listener = listener;
    }
}
