#![forbid(unsafe_code)]

//! Replaced-element resolution for the documentor HTML preview.
//!
//! While a page is laid out, the layout engine asks a [`ReplacedElementFactory`] whether an
//! element's content comes from a widget. [`SvgReplacedElementFactory`] wraps another factory and
//! answers for `<img>` elements whose resolved source ends in `.svg`: those become live
//! [`SvgViewport`]s sized from the layout hint or the drawing's intrinsic size. Everything else is
//! forwarded to the wrapped factory (usually [`ImageReplacedElementFactory`]).
//!
//! The crate is single-threaded by construction: viewports are shared with the view's
//! [`Canvas`] through `Rc`.

pub mod canvas;
pub mod context;
pub mod element;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod replaced;
pub mod resolver;
pub mod uri;
pub mod viewport;
pub mod xhtml;

pub use canvas::Canvas;
pub use context::LayoutContext;
pub use element::{Element, ElementId, NamespaceHandler, UserAgentCallback};
pub use error::{Error, Result};
pub use geometry::{DimensionHint, Size};
pub use raster::{ImageReplacedElementFactory, ImageReplacement};
pub use replaced::{
    FormSubmissionListener, ReplacedElement, ReplacedElementFactory, Replacement,
    SvgReplacedElement,
};
pub use resolver::SvgReplacedElementFactory;
pub use uri::{BaseUriUserAgent, is_svg_locator};
pub use viewport::SvgViewport;
pub use xhtml::{
    ResolvedImage, XhtmlDocument, XhtmlElement, XhtmlNamespaceHandler, dimension_hint,
    expand_html_entities, resolve_images,
};

/// The factory used by the interactive preview: SVG viewports over the generic image factory.
pub fn preview_factory() -> SvgReplacedElementFactory<ImageReplacedElementFactory> {
    SvgReplacedElementFactory::new(ImageReplacedElementFactory::new())
}

#[cfg(test)]
mod tests;
