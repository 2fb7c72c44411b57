//! A minimal XHTML host for the replaced-element protocol.
//!
//! The editor's preview pages are well-formed XHTML, so `roxmltree` is enough to find image
//! elements and their sizing attributes without a full HTML engine.

use crate::element::{Element, ElementId, NamespaceHandler};
use crate::replaced::{ReplacedElement, ReplacedElementFactory};
use crate::uri::BaseUriUserAgent;
use crate::{DimensionHint, LayoutContext, Result};
use std::borrow::Cow;
use url::Url;

pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Classifies `img` elements in the XHTML namespace (or in no namespace).
#[derive(Debug, Clone, Copy, Default)]
pub struct XhtmlNamespaceHandler;

impl NamespaceHandler for XhtmlNamespaceHandler {
    fn is_image_element(&self, element: &dyn Element) -> bool {
        element.local_name().eq_ignore_ascii_case("img")
            && element
                .namespace_uri()
                .is_none_or(|ns| ns == XHTML_NAMESPACE)
    }

    fn image_source_uri(&self, element: &dyn Element) -> Option<String> {
        element.attribute("src").map(|src| src.trim().to_string())
    }
}

/// An element of a parsed page, detached from the parser's tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XhtmlElement {
    id: ElementId,
    local_name: String,
    namespace: Option<String>,
    attributes: Vec<(String, String)>,
}

impl XhtmlElement {
    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let tag = node.tag_name();
        Self {
            id: ElementId(node.id().get_usize()),
            local_name: tag.name().to_string(),
            namespace: tag.namespace().map(str::to_string),
            attributes: node
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect(),
        }
    }
}

impl Element for XhtmlElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn local_name(&self) -> &str {
        &self.local_name
    }

    fn namespace_uri(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Entities every XML parser knows without a DTD.
const XML_ENTITIES: [&str; 5] = ["amp", "lt", "gt", "quot", "apos"];

/// Rewrites HTML named entity references (`&nbsp;`, `&mdash;`, ...) as numeric character
/// references, which an XML parser accepts without loading the XHTML DTD.
///
/// Unknown names are left alone and still fail to parse.
pub fn expand_html_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut changed = false;
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        let name_len = tail
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(tail.len());
        let name = &tail[..name_len];

        if name_len > 0 && tail[name_len..].starts_with(';') && !XML_ENTITIES.contains(&name) {
            let reference = &rest[pos..pos + name_len + 2];
            let decoded = htmlize::unescape(reference);
            if decoded != reference {
                for ch in decoded.chars() {
                    out.push_str(&format!("&#{};", u32::from(ch)));
                }
                changed = true;
                rest = &tail[name_len + 1..];
                continue;
            }
        }

        out.push('&');
        rest = tail;
    }
    out.push_str(rest);

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(text)
    }
}

/// A parsed preview page.
#[derive(Debug, Clone)]
pub struct XhtmlDocument {
    elements: Vec<XhtmlElement>,
    user_agent: BaseUriUserAgent,
}

impl XhtmlDocument {
    /// Parses a page. HTML named entities are accepted; other markup must be well-formed XML.
    pub fn parse(text: &str, base: Option<Url>) -> Result<Self> {
        let text = expand_html_entities(text);
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(&text, options)?;
        let elements = doc
            .descendants()
            .filter(|n| n.is_element())
            .map(XhtmlElement::from_node)
            .collect();
        Ok(Self {
            elements,
            user_agent: BaseUriUserAgent::new(base),
        })
    }

    pub fn user_agent(&self) -> &BaseUriUserAgent {
        &self.user_agent
    }

    /// Elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XhtmlElement> {
        self.elements.iter()
    }
}

/// Reads the `width`/`height` attributes of an element as a layout hint.
///
/// Plain integers and `px` values are accepted; anything else (percentages, `auto`) is unset.
pub fn dimension_hint(element: &dyn Element) -> DimensionHint {
    fn parse(raw: Option<&str>) -> Option<u32> {
        let raw = raw?.trim();
        let raw = raw.strip_suffix("px").unwrap_or(raw).trim();
        if let Ok(v) = raw.parse::<u32>() {
            return Some(v);
        }
        let v = raw.parse::<f64>().ok()?;
        (v.is_finite() && v > 0.0).then(|| v.round() as u32)
    }
    DimensionHint::new(
        parse(element.attribute("width")),
        parse(element.attribute("height")),
    )
}

/// Outcome of resolving one image element.
#[derive(Debug)]
pub struct ResolvedImage {
    pub element_id: ElementId,
    pub source: Option<String>,
    pub replacement: Option<ReplacedElement>,
}

/// Runs `factory` over every image element of `document`, in document order.
pub fn resolve_images(
    document: &XhtmlDocument,
    factory: &mut dyn ReplacedElementFactory,
    context: &mut LayoutContext<'_>,
) -> Vec<ResolvedImage> {
    let handler = context.namespace_handler();
    let mut out = Vec::new();
    for element in document.elements() {
        if !handler.is_image_element(element) {
            continue;
        }
        let hint = dimension_hint(element);
        let replacement = factory.create_replaced_element(
            context,
            Some(element as &dyn Element),
            document.user_agent(),
            hint,
        );
        out.push(ResolvedImage {
            element_id: element.id(),
            source: handler.image_source_uri(element),
            replacement,
        });
    }
    out
}
