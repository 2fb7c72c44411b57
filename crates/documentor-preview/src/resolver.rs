use crate::element::{Element, UserAgentCallback};
use crate::replaced::{
    FormSubmissionListener, ReplacedElement, ReplacedElementFactory, SvgReplacedElement,
};
use crate::uri::is_svg_locator;
use crate::{DimensionHint, LayoutContext, Size, SvgViewport};
use std::rc::Rc;
use url::Url;

/// Replaces image elements that refer to SVG documents with live [`SvgViewport`]s and forwards
/// every other request to the wrapped factory.
#[derive(Debug)]
pub struct SvgReplacedElementFactory<F> {
    delegate: F,
}

impl<F: ReplacedElementFactory> SvgReplacedElementFactory<F> {
    pub fn new(delegate: F) -> Self {
        Self { delegate }
    }

    pub fn delegate(&self) -> &F {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut F {
        &mut self.delegate
    }

    pub fn into_inner(self) -> F {
        self.delegate
    }
}

/// The resolved image locator of `element`, if it is an image element.
fn image_locator(
    context: &LayoutContext<'_>,
    element: &dyn Element,
    uac: &dyn UserAgentCallback,
) -> Option<String> {
    let handler = context.namespace_handler();
    if !handler.is_image_element(element) {
        return None;
    }
    let source = handler.image_source_uri(element).unwrap_or_default();
    Some(uac.resolve_uri(&source))
}

fn create_svg_viewport(
    context: &mut LayoutContext<'_>,
    url: Url,
    hint: DimensionHint,
) -> ReplacedElement {
    let mut viewport = SvgViewport::with_anti_alias(url, true);
    viewport.set_scale_to_fit(true);

    let width = hint.width.unwrap_or_else(|| viewport.intrinsic_width());
    let height = hint.height.unwrap_or_else(|| viewport.intrinsic_height());
    viewport.set_size(Size::new(width, height));

    let element = SvgReplacedElement::new(viewport);
    if let Some(canvas) = context.canvas_mut() {
        canvas.add(element.viewport_handle());
    }
    ReplacedElement::Svg(element)
}

impl<F: ReplacedElementFactory> ReplacedElementFactory for SvgReplacedElementFactory<F> {
    fn create_replaced_element(
        &mut self,
        context: &mut LayoutContext<'_>,
        element: Option<&dyn Element>,
        uac: &dyn UserAgentCallback,
        hint: DimensionHint,
    ) -> Option<ReplacedElement> {
        let locator = element
            .and_then(|e| image_locator(context, e, uac))
            .filter(|locator| is_svg_locator(locator));

        let Some(locator) = locator else {
            return self
                .delegate
                .create_replaced_element(context, element, uac, hint);
        };

        match Url::parse(&locator) {
            Ok(url) => {
                tracing::debug!(%url, ?hint, "replacing SVG image with a viewport");
                Some(create_svg_viewport(context, url, hint))
            }
            Err(err) => {
                tracing::error!(%locator, error = %err, "malformed SVG image locator");
                None
            }
        }
    }

    fn reset(&mut self) {
        self.delegate.reset();
    }

    fn remove(&mut self, element: &dyn Element) {
        self.delegate.remove(element);
    }

    fn set_form_submission_listener(&mut self, listener: Option<Rc<dyn FormSubmissionListener>>) {
        self.delegate.set_form_submission_listener(listener);
    }
}
