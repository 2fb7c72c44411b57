use crate::element::{Element, UserAgentCallback};
use crate::{DimensionHint, LayoutContext, Result, Size, SvgViewport};
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Content produced by a delegated factory. Its concrete type belongs to that factory.
pub trait Replacement: fmt::Debug {
    fn size(&self) -> Size;

    fn as_any(&self) -> &dyn Any;
}

/// Receives form submissions raised by replaced form controls.
pub trait FormSubmissionListener {
    fn submit(&self, query: &str);
}

/// A layout box whose content is supplied by a widget instead of the box model.
#[derive(Debug)]
pub enum ReplacedElement {
    Delegated(Box<dyn Replacement>),
    Svg(SvgReplacedElement),
}

impl ReplacedElement {
    pub fn size(&self) -> Size {
        match self {
            ReplacedElement::Delegated(inner) => inner.size(),
            ReplacedElement::Svg(svg) => svg.size(),
        }
    }

    pub fn as_svg(&self) -> Option<&SvgReplacedElement> {
        match self {
            ReplacedElement::Svg(svg) => Some(svg),
            ReplacedElement::Delegated(_) => None,
        }
    }

    pub fn as_delegated(&self) -> Option<&dyn Replacement> {
        match self {
            ReplacedElement::Delegated(inner) => Some(inner.as_ref()),
            ReplacedElement::Svg(_) => None,
        }
    }
}

/// Carrier of one sized [`SvgViewport`].
///
/// The viewport is shared with the canvas of an interactive view but is no longer mutated once
/// wrapped.
#[derive(Debug, Clone)]
pub struct SvgReplacedElement {
    viewport: Rc<SvgViewport>,
}

impl SvgReplacedElement {
    pub fn new(viewport: SvgViewport) -> Self {
        Self {
            viewport: Rc::new(viewport),
        }
    }

    pub fn viewport(&self) -> &SvgViewport {
        &self.viewport
    }

    pub fn viewport_handle(&self) -> Rc<SvgViewport> {
        Rc::clone(&self.viewport)
    }

    pub fn size(&self) -> Size {
        self.viewport.size()
    }

    pub fn render(&self, background: Option<tiny_skia::Color>) -> Result<tiny_skia::Pixmap> {
        self.viewport.render(background)
    }
}

/// Decides which elements of a document are replaced and builds their content.
pub trait ReplacedElementFactory {
    /// Produces the replacement for `element`, or `None` when the layout should fall back to its
    /// default handling.
    fn create_replaced_element(
        &mut self,
        context: &mut LayoutContext<'_>,
        element: Option<&dyn Element>,
        uac: &dyn UserAgentCallback,
        hint: DimensionHint,
    ) -> Option<ReplacedElement>;

    /// Drops everything created so far (document reload).
    fn reset(&mut self);

    /// Drops whatever was created for `element`.
    fn remove(&mut self, element: &dyn Element);

    fn set_form_submission_listener(&mut self, listener: Option<Rc<dyn FormSubmissionListener>>);
}
