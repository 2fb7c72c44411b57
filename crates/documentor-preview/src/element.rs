/// Identity of an element within its document, stable for the document's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// A node of the document being laid out.
pub trait Element {
    fn id(&self) -> ElementId;
    fn local_name(&self) -> &str;
    fn namespace_uri(&self) -> Option<&str>;
    fn attribute(&self, name: &str) -> Option<&str>;
}

/// Document-language rules for recognizing replaced content.
pub trait NamespaceHandler {
    fn is_image_element(&self, element: &dyn Element) -> bool;

    /// The raw (possibly relative) image reference of an image element.
    fn image_source_uri(&self, element: &dyn Element) -> Option<String>;
}

/// Host services available while resolving replaced elements.
pub trait UserAgentCallback {
    /// Resolves `uri` against the document's base URI.
    ///
    /// References that cannot be resolved are returned unchanged.
    fn resolve_uri(&self, uri: &str) -> String;
}
