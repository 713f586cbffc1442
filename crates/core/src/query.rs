//! Element lookup by tag, text substring and element type

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::snapshot::{LayoutElement, Snapshot};

/// Element selector.
///
/// `text` is a substring match so incidental whitespace or trailing content
/// in captured text does not break lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub tag: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
}

impl Query {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }

    pub fn matches(&self, element: &LayoutElement) -> bool {
        if element.tag != self.tag {
            return false;
        }
        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            if !element.text.contains(text) {
                return false;
            }
        }
        if let Some(ty) = self.element_type.as_deref().filter(|t| !t.is_empty()) {
            if element.element_type.as_deref() != Some(ty) {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)?;
        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            write!(f, " with text '{}'", text)?;
        }
        if let Some(ty) = self.element_type.as_deref().filter(|t| !t.is_empty()) {
            write!(f, " with type '{}'", ty)?;
        }
        Ok(())
    }
}

impl Snapshot {
    /// First match in captured order
    pub fn find_first(&self, query: &Query) -> Option<&LayoutElement> {
        self.elements.iter().find(|e| query.matches(e))
    }

    /// Every match in captured order
    pub fn find_all(&self, query: &Query) -> Vec<&LayoutElement> {
        self.elements.iter().filter(|e| query.matches(e)).collect()
    }

    pub fn count(&self, query: &Query) -> usize {
        self.elements.iter().filter(|e| query.matches(e)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Viewport};

    fn element(tag: &str, text: &str, ty: Option<&str>) -> LayoutElement {
        let mut el = LayoutElement::new(tag, Rect::new(0, 0, 10, 10));
        el.text = text.to_string();
        el.element_type = ty.map(str::to_string);
        el
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(
            Viewport::default(),
            vec![
                element("label", "Email", None),
                element("input", "", Some("email")),
                element("span", "Status:", None),
                element("input", "", Some("password")),
                element("span", "Disconnected", None),
                element("label", "Confirm Password", None),
            ],
        )
    }

    #[test]
    fn test_find_first_by_tag_preserves_order() {
        let snap = snapshot();
        let first = snap.find_first(&Query::tag("input")).unwrap();
        assert_eq!(first.element_type.as_deref(), Some("email"));
    }

    #[test]
    fn test_find_all_by_tag_is_ordered_subsequence() {
        let snap = snapshot();
        let spans: Vec<&str> = snap
            .find_all(&Query::tag("span"))
            .iter()
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(spans, vec!["Status:", "Disconnected"]);
    }

    #[test]
    fn test_text_is_substring_match() {
        let snap = snapshot();
        assert!(snap.find_first(&Query::tag("label").with_text("Password")).is_some());
        assert!(snap.find_first(&Query::tag("label").with_text("Create Password")).is_none());
    }

    #[test]
    fn test_type_filter() {
        let snap = snapshot();
        let q = Query::tag("input").with_type("password");
        assert_eq!(snap.count(&q), 1);
        assert!(snap.find_first(&Query::tag("input").with_type("submit")).is_none());
        assert!(snap.find_all(&Query::tag("button")).is_empty());
    }

    #[test]
    fn test_tag_match_is_exact() {
        let snap = snapshot();
        assert!(snap.find_first(&Query::tag("INPUT")).is_none());
        assert!(snap.find_first(&Query::tag("inp")).is_none());
    }

    #[test]
    fn test_display() {
        let q = Query::tag("input").with_text("x").with_type("email");
        assert_eq!(q.to_string(), "input with text 'x' with type 'email'");
    }
}
