
use crate::*;
use std::any::Any;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing_subscriber::layer::{Context, SubscriberExt};

pub(crate) struct TestElement {
    id: usize,
    name: &'static str,
    namespace: Option<&'static str>,
    attributes: Vec<(&'static str, String)>,
}

impl TestElement {
    pub(crate) fn named(id: usize, name: &'static str) -> Self {
        Self {
            id,
            name,
            namespace: None,
            attributes: Vec::new(),
        }
    }

    pub(crate) fn img(id: usize, src: impl Into<String>) -> Self {
        let mut out = Self::named(id, "img");
        out.attributes.push(("src", src.into()));
        out
    }
}

impl Element for TestElement {
    fn id(&self) -> ElementId {
        ElementId(self.id)
    }

    fn local_name(&self) -> &str {
        self.name
    }

    fn namespace_uri(&self) -> Option<&str> {
        self.namespace
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Returns references untouched, so malformed locators reach the resolver as written.
pub(crate) struct VerbatimUserAgent;

impl UserAgentCallback for VerbatimUserAgent {
    fn resolve_uri(&self, uri: &str) -> String {
        uri.to_string()
    }
}

pub(crate) fn dir_user_agent(dir: &Path) -> BaseUriUserAgent {
    BaseUriUserAgent::for_path(dir)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StubReplacement {
    pub(crate) serial: usize,
}

impl Replacement for StubReplacement {
    fn size(&self) -> Size {
        Size::new(10, 10)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CreateCall {
    pub(crate) element: Option<ElementId>,
    pub(crate) hint: DimensionHint,
}

/// Delegate that records every call and answers with numbered stub replacements.
#[derive(Default)]
pub(crate) struct RecordingFactory {
    pub(crate) creates: Vec<CreateCall>,
    pub(crate) resets: usize,
    pub(crate) removed: Vec<ElementId>,
    pub(crate) listener: Option<Rc<dyn FormSubmissionListener>>,
}

impl ReplacedElementFactory for RecordingFactory {
    fn create_replaced_element(
        &mut self,
        _context: &mut LayoutContext<'_>,
        element: Option<&dyn Element>,
        _uac: &dyn UserAgentCallback,
        hint: DimensionHint,
    ) -> Option<ReplacedElement> {
        self.creates.push(CreateCall {
            element: element.map(|e| e.id()),
            hint,
        });
        Some(ReplacedElement::Delegated(Box::new(StubReplacement {
            serial: self.creates.len(),
        })))
    }

    fn reset(&mut self) {
        self.resets += 1;
    }

    fn remove(&mut self, element: &dyn Element) {
        self.removed.push(element.id());
    }

    fn set_form_submission_listener(&mut self, listener: Option<Rc<dyn FormSubmissionListener>>) {
        self.listener = listener;
    }
}

pub(crate) fn stub_serial(replacement: &ReplacedElement) -> Option<usize> {
    replacement
        .as_delegated()?
        .as_any()
        .downcast_ref::<StubReplacement>()
        .map(|s| s.serial)
}

pub(crate) fn svg_document(width: u32, height: u32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><rect width="{width}" height="{height}" fill="navy"/></svg>"#
    )
}

#[derive(Clone)]
struct EventCounter {
    matches: fn(&tracing::Metadata<'_>) -> bool,
    count: Arc<AtomicUsize>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if (self.matches)(event.metadata()) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Runs `f` with a scoped subscriber and returns how many events matched `matches`.
pub(crate) fn count_events<R>(
    matches: fn(&tracing::Metadata<'_>) -> bool,
    f: impl FnOnce() -> R,
) -> (R, usize) {
    let counter = EventCounter {
        matches,
        count: Arc::default(),
    };
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, counter.count.load(Ordering::SeqCst))
}

/// Runs `f` with a scoped subscriber and returns how many error events it logged.
pub(crate) fn count_errors<R>(f: impl FnOnce() -> R) -> (R, usize) {
    count_events(|meta| *meta.level() == tracing::Level::ERROR, f)
}

/// Runs `f` with a scoped subscriber and returns how many SVG documents it parsed.
pub(crate) fn count_svg_parses<R>(f: impl FnOnce() -> R) -> (R, usize) {
    count_events(
        |meta| {
            meta.target() == "documentor_preview::viewport"
                && *meta.level() == tracing::Level::DEBUG
        },
        f,
    )
}
