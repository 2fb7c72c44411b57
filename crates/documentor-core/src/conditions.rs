use rustc_hash::FxHashSet;

/// The set of conditions enabled while generating documentation.
///
/// Pages can carry conditional sections; a section is kept only when every condition it requires
/// is enabled here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    enabled: FxHashSet<String>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(&mut self, condition: impl Into<String>) {
        self.enabled.insert(condition.into());
    }

    pub fn is_enabled(&self, condition: &str) -> bool {
        self.enabled.contains(condition)
    }

    pub fn all_enabled<'a>(&self, required: impl IntoIterator<Item = &'a str>) -> bool {
        required.into_iter().all(|c| self.enabled.contains(c))
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Enabled conditions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let mut out: Vec<&str> = self.enabled.iter().map(String::as_str).collect();
        out.sort_unstable();
        out.into_iter()
    }

    pub fn reset(&mut self) {
        self.enabled.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for Conditions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut out = Self::new();
        for c in iter {
            out.enable(c);
        }
        out
    }
}
