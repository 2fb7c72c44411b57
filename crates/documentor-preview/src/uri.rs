use crate::element::UserAgentCallback;
use std::path::Path;
use url::Url;

/// Whether a resolved locator names an SVG document (case-insensitive `.svg` suffix).
pub fn is_svg_locator(locator: &str) -> bool {
    let suffix = ".svg";
    locator.len() >= suffix.len()
        && locator.is_char_boundary(locator.len() - suffix.len())
        && locator[locator.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Resolves references against a fixed document base.
#[derive(Debug, Clone, Default)]
pub struct BaseUriUserAgent {
    base: Option<Url>,
}

impl BaseUriUserAgent {
    pub fn new(base: Option<Url>) -> Self {
        Self { base }
    }

    /// Uses the directory containing `document` (or `document` itself if it is a directory) as
    /// the base.
    pub fn for_path(document: &Path) -> Self {
        let abs = std::fs::canonicalize(document).unwrap_or_else(|_| document.to_path_buf());
        let base = if abs.is_dir() {
            Url::from_directory_path(&abs).ok()
        } else {
            Url::from_file_path(&abs).ok()
        };
        Self { base }
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }
}

impl UserAgentCallback for BaseUriUserAgent {
    fn resolve_uri(&self, uri: &str) -> String {
        let uri = uri.trim();
        if let Ok(parsed) = Url::parse(uri) {
            return parsed.to_string();
        }
        if let Some(base) = &self.base {
            if let Ok(joined) = base.join(uri) {
                return joined.to_string();
            }
        }
        uri.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_suffix_is_case_insensitive() {
        assert!(is_svg_locator("file:///docs/a.svg"));
        assert!(is_svg_locator("file:///docs/A.SVG"));
        assert!(is_svg_locator("x.Svg"));
        assert!(!is_svg_locator("file:///docs/a.svgz"));
        assert!(!is_svg_locator("file:///docs/a.png"));
        assert!(!is_svg_locator("svg"));
        assert!(!is_svg_locator("image/ésvg"));
    }

    #[test]
    fn relative_references_join_the_base() {
        let base = Url::parse("file:///docs/pages/intro.html").unwrap();
        let uac = BaseUriUserAgent::new(Some(base));
        assert_eq!(
            uac.resolve_uri("../img/figure.svg"),
            "file:///docs/img/figure.svg"
        );
        assert_eq!(
            uac.resolve_uri("https://example.com/x.png"),
            "https://example.com/x.png"
        );
    }

    #[test]
    fn unresolvable_references_are_returned_unchanged() {
        let uac = BaseUriUserAgent::default();
        assert_eq!(uac.resolve_uri("img/figure.svg"), "img/figure.svg");
    }

    #[test]
    fn directory_base_keeps_its_last_segment() {
        let dir = tempfile::tempdir().unwrap();
        let uac = BaseUriUserAgent::for_path(dir.path());
        let resolved = uac.resolve_uri("figure.svg");
        let expected = Url::from_directory_path(std::fs::canonicalize(dir.path()).unwrap())
            .unwrap()
            .join("figure.svg")
            .unwrap();
        assert_eq!(resolved, expected.to_string());
    }
}
