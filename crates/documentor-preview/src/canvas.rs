use crate::SvgViewport;
use std::rc::Rc;

/// Widget host of an interactive view.
///
/// Viewports added during layout stay attached until the owner of the view tears it down with
/// [`Canvas::clear`].
#[derive(Debug, Default)]
pub struct Canvas {
    widgets: Vec<Rc<SvgViewport>>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, widget: Rc<SvgViewport>) {
        self.widgets.push(widget);
    }

    pub fn widgets(&self) -> &[Rc<SvgViewport>] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn clear(&mut self) {
        self.widgets.clear();
    }
}
