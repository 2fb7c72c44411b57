use crate::canvas::Canvas;
use crate::element::NamespaceHandler;

/// State of the layout pass a replaced element is requested from.
///
/// A context is interactive exactly when it carries the live [`Canvas`] of the view.
pub struct LayoutContext<'a> {
    namespace_handler: &'a dyn NamespaceHandler,
    canvas: Option<&'a mut Canvas>,
}

impl<'a> LayoutContext<'a> {
    /// A non-interactive context (printing, export, off-screen measurement).
    pub fn new(namespace_handler: &'a dyn NamespaceHandler) -> Self {
        Self {
            namespace_handler,
            canvas: None,
        }
    }

    /// A context for a live view whose widgets are hosted by `canvas`.
    pub fn interactive(
        namespace_handler: &'a dyn NamespaceHandler,
        canvas: &'a mut Canvas,
    ) -> Self {
        Self {
            namespace_handler,
            canvas: Some(canvas),
        }
    }

    pub fn namespace_handler(&self) -> &'a dyn NamespaceHandler {
        self.namespace_handler
    }

    pub fn is_interactive(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut Canvas> {
        self.canvas.as_deref_mut()
    }
}
