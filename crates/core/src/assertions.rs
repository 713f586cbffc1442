//! Assertion library
//!
//! Every check appends to either `errors` (fails the case) or `warnings`
//! (reported, never fails) and returns normally, so one run surfaces every
//! defect in a snapshot. Element arguments accept `&LayoutElement` or
//! `Option<&LayoutElement>`; an absent element makes the check a no-op
//! because the missing element is already reported by an existence check.

use serde::{Deserialize, Serialize};

use crate::convention::StyleConvention;
use crate::geometry::{Edge, Viewport};
use crate::query::Query;
use crate::snapshot::{LayoutElement, Snapshot};

/// Where a failed check is recorded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

/// Error and warning accumulator bound to one snapshot
pub struct Assertions<'s> {
    snapshot: &'s Snapshot,
    convention: &'s dyn StyleConvention,
    errors: Vec<String>,
    warnings: Vec<String>,
}

/// Append the caller's context as " (message)"
fn with_context(text: String, message: &str) -> String {
    if message.is_empty() {
        text
    } else {
        format!("{} ({})", text, message)
    }
}

impl<'s> Assertions<'s> {
    pub fn new(snapshot: &'s Snapshot, convention: &'s dyn StyleConvention) -> Self {
        Self {
            snapshot,
            convention,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> &'s Snapshot {
        self.snapshot
    }

    pub fn viewport(&self) -> Viewport {
        self.snapshot.viewport
    }

    pub fn elements(&self) -> &'s [LayoutElement] {
        &self.snapshot.elements
    }

    /// Lookup without recording anything
    pub fn find(&self, query: &Query) -> Option<&'s LayoutElement> {
        self.snapshot.find_first(query)
    }

    pub fn find_all(&self, query: &Query) -> Vec<&'s LayoutElement> {
        self.snapshot.find_all(query)
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn record(&mut self, severity: Severity, message: impl Into<String>) {
        match severity {
            Severity::Error => self.error(message),
            Severity::Warning => self.warn(message),
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// (errors, warnings)
    pub fn into_findings(self) -> (Vec<String>, Vec<String>) {
        (self.errors, self.warnings)
    }

    pub fn assert_exists(&mut self, query: &Query, message: &str) -> Option<&'s LayoutElement> {
        let found = self.find(query);
        if found.is_none() {
            self.error(with_context(format!("Element not found: {}", query), message));
        }
        found
    }

    pub fn assert_not_exists(&mut self, query: &Query, message: &str) {
        if self.find(query).is_some() {
            self.error(with_context(format!("Unexpected element found: {}", query), message));
        }
    }

    /// Style-level visibility plus a coarse on-screen placement check
    pub fn assert_visible<'e>(&mut self, element: impl Into<Option<&'e LayoutElement>>, message: &str) {
        let Some(el) = element.into() else { return };
        let viewport = self.viewport();

        if el.style.is_display_none() {
            self.error(with_context(format!("{} element is hidden (display: none)", el.tag), message));
        }
        if el.style.is_visibility_hidden() {
            self.error(with_context(format!("{} element is hidden (visibility: hidden)", el.tag), message));
        }
        if el.style.is_transparent() {
            self.error(with_context(format!("{} element is invisible (opacity: 0)", el.tag), message));
        }
        if el.raw_box.left() >= viewport.width_px() {
            self.error(with_context(
                format!(
                    "{} element is outside viewport (x={} >= viewport width {})",
                    el.tag, el.raw_box.x, viewport.width
                ),
                message,
            ));
        }
        if el.raw_box.top() >= viewport.height_px() {
            self.error(with_context(
                format!(
                    "{} element is outside viewport (y={} >= viewport height {})",
                    el.tag, el.raw_box.y, viewport.height
                ),
                message,
            ));
        }
    }

    /// Each viewport edge is checked and reported independently
    pub fn assert_in_viewport<'e>(&mut self, element: impl Into<Option<&'e LayoutElement>>, message: &str) {
        let Some(el) = element.into() else { return };
        let viewport = self.viewport();
        let rect = el.raw_box;

        if rect.left() < 0 {
            self.error(with_context(
                format!("{} extends beyond left edge (x={})", el.tag, rect.left()),
                message,
            ));
        }
        if rect.right() > viewport.width_px() {
            self.error(with_context(
                format!(
                    "{} extends beyond right edge (right={}, viewport={})",
                    el.tag,
                    rect.right(),
                    viewport.width
                ),
                message,
            ));
        }
        if rect.top() < 0 {
            self.error(with_context(
                format!("{} extends beyond top edge (y={})", el.tag, rect.top()),
                message,
            ));
        }
        if rect.bottom() > viewport.height_px() {
            self.error(with_context(
                format!(
                    "{} extends beyond bottom edge (bottom={}, viewport={})",
                    el.tag,
                    rect.bottom(),
                    viewport.height
                ),
                message,
            ));
        }
    }

    /// Clip detection from the captured visibility record.
    ///
    /// Reports at most one error per element, naming the clipped sides and
    /// the height deficit. Without a visibility record this degrades to
    /// [`Self::assert_in_viewport`].
    pub fn assert_fully_visible<'e>(&mut self, element: impl Into<Option<&'e LayoutElement>>, message: &str) {
        let Some(el) = element.into() else { return };
        let Some(info) = el.visibility.as_ref() else {
            self.assert_in_viewport(el, message);
            return;
        };

        let deficit = info.height_deficit();
        let cut_off = (deficit > 0.0).then(|| {
            format!(
                "{}px cut off (visible: {}px, total: {}px)",
                deficit, info.visible_height, info.original_height
            )
        });

        let text = if info.is_clipped {
            let sides = info.clipped_sides();
            let sides = if sides.is_empty() {
                "unknown sides".to_string()
            } else {
                sides.join(", ")
            };
            let mut text = format!("{} element is clipped by parent container ({})", el.tag, sides);
            if let Some(cut_off) = cut_off {
                text.push_str(", ");
                text.push_str(&cut_off);
            }
            text
        } else if let Some(cut_off) = cut_off {
            format!("{} element is {}", el.tag, cut_off)
        } else {
            return;
        };

        self.error(with_context(text, message));
    }

    /// Symmetric edge comparison within `tolerance` pixels
    pub fn assert_aligned<'a, 'b>(
        &mut self,
        a: impl Into<Option<&'a LayoutElement>>,
        b: impl Into<Option<&'b LayoutElement>>,
        edge: Edge,
        tolerance: f64,
        message: &str,
    ) {
        let (Some(a), Some(b)) = (a.into(), b.into()) else { return };

        let diff = (a.raw_box.edge_coordinate(edge) - b.raw_box.edge_coordinate(edge)).abs();
        if diff > tolerance {
            self.error(with_context(
                format!(
                    "{} and {} are not {}-aligned (diff: {}px, tolerance: {}px)",
                    a.tag, b.tag, edge, diff, tolerance
                ),
                message,
            ));
        }
    }

    /// Control must not look disabled, and should show interaction feedback
    pub fn assert_enabled<'e>(&mut self, element: impl Into<Option<&'e LayoutElement>>, message: &str) {
        let Some(el) = element.into() else { return };

        for token in self.convention.applied_disabled_tokens(el) {
            self.error(with_context(format!("{} appears disabled (has {})", el.tag, token), message));
        }
        if !self.convention.has_interactive_affordance(el) {
            self.warn(with_context(
                format!("{} missing hover states (may not be interactive)", el.tag),
                message,
            ));
        }
    }

    /// Control must look disabled now, or at least define how it looks when
    /// disabled (the attribute itself is not captured)
    pub fn assert_disabled<'e>(&mut self, element: impl Into<Option<&'e LayoutElement>>, message: &str) {
        let Some(el) = element.into() else { return };

        let looks_disabled = !self.convention.applied_disabled_tokens(el).is_empty();
        if !looks_disabled && !self.convention.defines_disabled_styles(el) {
            self.error(with_context(format!("{} missing any disabled styling", el.tag), message));
        }
    }

    pub fn assert_has_disabled_styles<'e>(&mut self, element: impl Into<Option<&'e LayoutElement>>, message: &str) {
        let Some(el) = element.into() else { return };

        if !self.convention.defines_disabled_background(el) {
            self.warn(with_context(format!("{} missing disabled state background styles", el.tag), message));
        }
    }

    pub fn assert_error_styling<'e>(&mut self, element: impl Into<Option<&'e LayoutElement>>, message: &str) {
        let Some(el) = element.into() else { return };

        if !self.convention.has_error_styling(el) {
            self.warn(with_context(format!("{} missing error styling", el.tag), message));
        }
    }

    pub fn assert_transition_styling<'e>(&mut self, element: impl Into<Option<&'e LayoutElement>>, message: &str) {
        let Some(el) = element.into() else { return };

        if !self.convention.has_transition_styling(el) {
            self.warn(with_context(format!("{} missing transition/animation classes", el.tag), message));
        }
    }

    pub fn assert_text_equals<'e>(
        &mut self,
        element: impl Into<Option<&'e LayoutElement>>,
        expected: &str,
        message: &str,
    ) {
        let Some(el) = element.into() else { return };

        if el.text != expected {
            self.error(with_context(
                format!("{} text is '{}', expected '{}'", el.tag, el.text, expected),
                message,
            ));
        }
    }

    pub fn assert_value_equals<'e>(
        &mut self,
        element: impl Into<Option<&'e LayoutElement>>,
        expected: &str,
        message: &str,
    ) {
        let Some(el) = element.into() else { return };

        if el.value != expected {
            self.error(with_context(
                format!("{} value is '{}', expected '{}'", el.tag, el.value, expected),
                message,
            ));
        }
    }

    pub fn assert_placeholder_equals<'e>(
        &mut self,
        element: impl Into<Option<&'e LayoutElement>>,
        expected: &str,
        message: &str,
    ) {
        let Some(el) = element.into() else { return };

        if el.placeholder != expected {
            self.error(with_context(
                format!("{} placeholder is '{}', expected '{}'", el.tag, el.placeholder, expected),
                message,
            ));
        }
    }

    pub fn assert_has_class<'e>(
        &mut self,
        element: impl Into<Option<&'e LayoutElement>>,
        class: &str,
        severity: Severity,
        message: &str,
    ) {
        let Some(el) = element.into() else { return };

        if !el.has_class(class) {
            self.record(severity, with_context(format!("{} missing class {}", el.tag, class), message));
        }
    }

    /// Horizontal centre within `tolerance` pixels of the viewport centre
    pub fn assert_centered<'e>(
        &mut self,
        element: impl Into<Option<&'e LayoutElement>>,
        tolerance: f64,
        message: &str,
    ) {
        let Some(el) = element.into() else { return };

        let center = el.raw_box.center_x();
        let viewport_center = self.viewport().center_x();
        if (center - viewport_center).abs() > tolerance {
            self.error(with_context(
                format!(
                    "{} is not centered (center: {}px, viewport center: {}px)",
                    el.tag, center, viewport_center
                ),
                message,
            ));
        }
    }

    /// `element` starts at or below the bottom edge of `reference`
    pub fn assert_below<'a, 'b>(
        &mut self,
        element: impl Into<Option<&'a LayoutElement>>,
        reference: impl Into<Option<&'b LayoutElement>>,
        message: &str,
    ) {
        let (Some(el), Some(reference)) = (element.into(), reference.into()) else { return };

        if el.raw_box.top() < reference.raw_box.bottom() {
            self.error(with_context(
                format!(
                    "{} should be below {} (y={}, {} bottom={})",
                    el.tag,
                    reference.tag,
                    el.raw_box.top(),
                    reference.tag,
                    reference.raw_box.bottom()
                ),
                message,
            ));
        }
    }

    /// `element` does not start past the right edge of `reference`
    pub fn assert_not_right_of<'a, 'b>(
        &mut self,
        element: impl Into<Option<&'a LayoutElement>>,
        reference: impl Into<Option<&'b LayoutElement>>,
        message: &str,
    ) {
        let (Some(el), Some(reference)) = (element.into(), reference.into()) else { return };

        if el.raw_box.left() > reference.raw_box.right() {
            self.error(with_context(
                format!(
                    "{} is floating to the right of {} (x={}, {} ends at x={})",
                    el.tag,
                    reference.tag,
                    el.raw_box.left(),
                    reference.tag,
                    reference.raw_box.right()
                ),
                message,
            ));
        }
    }

    /// Total element count within the inclusive bounds
    pub fn assert_element_count(
        &mut self,
        min: Option<usize>,
        max: Option<usize>,
        severity: Severity,
        message: &str,
    ) {
        let count = self.elements().len();
        let too_few = min.is_some_and(|min| count < min);
        let too_many = max.is_some_and(|max| count > max);
        if !too_few && !too_many {
            return;
        }

        let expected = match (min, max) {
            (Some(min), Some(max)) if min == max => format!("{}", min),
            (Some(min), Some(max)) => format!("{}-{}", min, max),
            (Some(min), None) => format!("at least {}", min),
            (None, Some(max)) => format!("at most {}", max),
            (None, None) => String::new(),
        };
        self.record(
            severity,
            with_context(format!("Unexpected element count: {} (expected {})", count, expected), message),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convention::TailwindConvention;
    use crate::geometry::Rect;
    use crate::visibility::VisibilityInfo;

    fn snapshot(elements: Vec<LayoutElement>) -> Snapshot {
        Snapshot::new(Viewport::default(), elements)
    }

    fn at(tag: &str, x: i32, y: i32, width: i32, height: i32) -> LayoutElement {
        LayoutElement::new(tag, Rect::new(x, y, width, height))
    }

    #[test]
    fn test_visible_reports_every_style_problem() {
        let mut el = at("p", 1300, 800, 10, 10);
        el.style.display = "none".to_string();
        el.style.visibility = "hidden".to_string();
        el.style.opacity = "0".to_string();
        let snap = snapshot(vec![el]);
        let conv = TailwindConvention::default();
        let mut a = Assertions::new(&snap, &conv);

        a.assert_visible(&snap.elements[0], "");
        assert_eq!(a.errors().len(), 5);
    }

    #[test]
    fn test_in_viewport_checks_each_edge() {
        let snap = snapshot(vec![at("div", -5, -5, 2000, 2000)]);
        let conv = TailwindConvention::default();
        let mut a = Assertions::new(&snap, &conv);

        a.assert_in_viewport(&snap.elements[0], "hero");
        assert_eq!(a.errors().len(), 4);
        assert!(a.errors().iter().all(|e| e.ends_with("(hero)")));
    }

    #[test]
    fn test_in_viewport_with_huge_coordinates() {
        let snap = snapshot(vec![at("div", 0, 2_000_000_000, 10, 2_000_000_000)]);
        let conv = TailwindConvention::default();
        let mut a = Assertions::new(&snap, &conv);

        a.assert_in_viewport(&snap.elements[0], "");
        a.assert_visible(&snap.elements[0], "");
        assert_eq!(a.errors().len(), 2);
        assert!(a.errors()[0].contains("bottom=4000000000"));
        assert!(a.errors()[1].contains("outside viewport"));
    }

    #[test]
    fn test_fully_visible_single_error_for_clip_and_deficit() {
        let mut el = at("div", 0, 0, 100, 80);
        el.visible_box = Rect::new(0, 0, 100, 20);
        el.visibility = Some(VisibilityInfo {
            is_clipped: true,
            clipped_bottom: true,
            visible_height: 20.0,
            original_height: 80.0,
            ..Default::default()
        });
        let snap = snapshot(vec![el]);
        let conv = TailwindConvention::default();
        let mut a = Assertions::new(&snap, &conv);

        a.assert_fully_visible(&snap.elements[0], "");
        assert_eq!(a.errors().len(), 1);
        assert!(a.errors()[0].contains("bottom"));
        assert!(a.errors()[0].contains("60px cut off"));
    }

    #[test]
    fn test_fully_visible_without_record_falls_back_to_viewport() {
        let snap = snapshot(vec![at("div", 1200, 0, 200, 10)]);
        let conv = TailwindConvention::default();
        let mut a = Assertions::new(&snap, &conv);

        a.assert_fully_visible(&snap.elements[0], "");
        assert_eq!(a.errors().len(), 1);
        assert!(a.errors()[0].contains("right edge"));
    }

    #[test]
    fn test_clipped_without_flagged_sides() {
        let mut el = at("div", 0, 0, 10, 10);
        el.visibility = Some(VisibilityInfo {
            is_clipped: true,
            visible_height: 10.0,
            original_height: 10.0,
            ..Default::default()
        });
        let snap = snapshot(vec![el]);
        let conv = TailwindConvention::default();
        let mut a = Assertions::new(&snap, &conv);

        a.assert_fully_visible(&snap.elements[0], "");
        assert_eq!(a.errors(), &["div element is clipped by parent container (unknown sides)".to_string()]);
    }

    #[test]
    fn test_aligned_skips_missing_elements() {
        let snap = snapshot(vec![at("input", 0, 0, 10, 10)]);
        let conv = TailwindConvention::default();
        let mut a = Assertions::new(&snap, &conv);

        let missing: Option<&LayoutElement> = None;
        a.assert_aligned(&snap.elements[0], missing, Edge::Left, 0.0, "");
        a.assert_aligned(missing, missing, Edge::Center, 0.0, "");
        assert!(a.passed());
    }

    #[test]
    fn test_enabled_flags_each_applied_token() {
        let mut el = at("button", 0, 0, 10, 10);
        el.class_names = "bg-gray-600 cursor-not-allowed".to_string();
        let snap = snapshot(vec![el]);
        let conv = TailwindConvention::default();
        let mut a = Assertions::new(&snap, &conv);

        a.assert_enabled(&snap.elements[0], "");
        assert_eq!(a.errors().len(), 2);
        assert_eq!(a.warnings().len(), 1);
    }

    #[test]
    fn test_disabled_accepts_conditional_styles_only() {
        let mut el = at("button", 0, 0, 10, 10);
        el.class_names = "bg-green-600 disabled:cursor-not-allowed".to_string();
        let snap = snapshot(vec![el, at("button", 0, 20, 10, 10)]);
        let conv = TailwindConvention::default();
        let mut a = Assertions::new(&snap, &conv);

        a.assert_disabled(&snap.elements[0], "");
        assert!(a.passed());
        a.assert_disabled(&snap.elements[1], "");
        assert_eq!(a.errors(), &["button missing any disabled styling".to_string()]);
    }

    #[test]
    fn test_cosmetic_checks_only_warn() {
        let snap = snapshot(vec![at("input", 0, 0, 10, 10)]);
        let conv = TailwindConvention::default();
        let mut a = Assertions::new(&snap, &conv);

        a.assert_error_styling(&snap.elements[0], "");
        a.assert_transition_styling(&snap.elements[0], "");
        a.assert_has_disabled_styles(&snap.elements[0], "");
        a.assert_has_class(&snap.elements[0], "font-mono", Severity::Warning, "");
        assert!(a.passed());
        assert_eq!(a.warnings().len(), 4);
    }

    #[test]
    fn test_relative_position_checks() {
        let snap = snapshot(vec![
            at("input", 460, 200, 360, 40),
            at("button", 460, 260, 360, 40),
            at("span", 900, 250, 60, 20),
        ]);
        let conv = TailwindConvention::default();
        let mut a = Assertions::new(&snap, &conv);
        let (input, button, status) = (&snap.elements[0], &snap.elements[1], &snap.elements[2]);

        a.assert_below(button, input, "");
        a.assert_centered(input, 10.0, "");
        assert!(a.passed());

        a.assert_below(status, button, "");
        a.assert_not_right_of(status, input, "");
        assert_eq!(a.errors().len(), 2);
    }

    #[test]
    fn test_element_count_bounds() {
        let snap = snapshot(vec![at("h1", 0, 0, 10, 10)]);
        let conv = TailwindConvention::default();
        let mut a = Assertions::new(&snap, &conv);

        a.assert_element_count(Some(1), Some(1), Severity::Error, "");
        assert!(a.passed());
        a.assert_element_count(Some(6), Some(8), Severity::Warning, "");
        assert_eq!(a.warnings(), &["Unexpected element count: 1 (expected 6-8)".to_string()]);
    }
}
