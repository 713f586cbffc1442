//! Clip-aware visibility resolution
//!
//! Snapshot producers walk each node's ancestor chain and intersect the
//! node's box with every ancestor that clips overflow. The result is stored
//! in the snapshot as `visibleRect` plus a `visibility` record, and the
//! assertion engine trusts those fields. [`resolve`] is the same walk
//! expressed over already-captured boxes so the contract can be checked (and
//! reused by producers that capture from Rust).

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::snapshot::ComputedStyle;

/// How much, and on which sides, an element was clipped by its ancestors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityInfo {
    #[serde(default)]
    pub is_fully_visible: bool,
    #[serde(default)]
    pub is_clipped: bool,
    #[serde(default)]
    pub clipped_top: bool,
    #[serde(default)]
    pub clipped_bottom: bool,
    #[serde(default)]
    pub clipped_left: bool,
    #[serde(default)]
    pub clipped_right: bool,
    #[serde(default)]
    pub visible_height: f64,
    #[serde(default)]
    pub original_height: f64,
}

impl VisibilityInfo {
    /// Names of the clipped sides in top, bottom, left, right order
    pub fn clipped_sides(&self) -> Vec<&'static str> {
        let mut sides = Vec::new();
        if self.clipped_top {
            sides.push("top");
        }
        if self.clipped_bottom {
            sides.push("bottom");
        }
        if self.clipped_left {
            sides.push("left");
        }
        if self.clipped_right {
            sides.push("right");
        }
        sides
    }

    /// Pixels of height lost to clipping, zero when nothing was cut off
    pub fn height_deficit(&self) -> f64 {
        (self.original_height - self.visible_height).max(0.0)
    }
}

/// Outcome of walking one element's ancestor chain
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub visible_box: Rect,
    pub info: VisibilityInfo,
}

impl Resolution {
    pub fn is_visible(&self) -> bool {
        self.visible_box.has_area()
    }
}

/// Whether a computed overflow value hides content outside the box
pub fn overflow_clips(value: &str) -> bool {
    matches!(value.trim(), "hidden" | "clip")
}

/// Intersect `raw` with every clipping ancestor, innermost first.
///
/// The shorthand `overflow` clips both axes; `overflowX`/`overflowY` clip
/// only their own axis. Inverted axes collapse to zero extent inside `raw`.
pub fn resolve<'a, I>(raw: Rect, ancestors: I) -> Resolution
where
    I: IntoIterator<Item = (Rect, &'a ComputedStyle)>,
{
    let (mut left, mut top, mut right, mut bottom) = (raw.left(), raw.top(), raw.right(), raw.bottom());
    let mut has_clipping = false;

    for (parent, style) in ancestors {
        let (clip_x, clip_y) = style.clip_axes();
        if !clip_x && !clip_y {
            continue;
        }

        let before = (left, top, right, bottom);
        if clip_x {
            left = left.max(parent.left());
            right = right.min(parent.right());
        }
        if clip_y {
            top = top.max(parent.top());
            bottom = bottom.min(parent.bottom());
        }
        if (left, top, right, bottom) != before {
            has_clipping = true;
        }
    }

    let left = left.min(raw.right());
    let top = top.min(raw.bottom());
    let right = right.max(left);
    let bottom = bottom.max(top);
    let visible_box = Rect::from_edges(left, top, right, bottom);

    let edges_moved = visible_box.left() != raw.left()
        || visible_box.top() != raw.top()
        || visible_box.right() != raw.right()
        || visible_box.bottom() != raw.bottom();
    let is_clipped = has_clipping || edges_moved;

    let info = VisibilityInfo {
        is_fully_visible: !is_clipped,
        is_clipped,
        clipped_top: raw.top() < visible_box.top(),
        clipped_bottom: raw.bottom() > visible_box.bottom(),
        clipped_left: raw.left() < visible_box.left(),
        clipped_right: raw.right() > visible_box.right(),
        visible_height: f64::from(visible_box.height),
        original_height: f64::from(raw.height),
    };

    Resolution { visible_box, info }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(overflow: &str, x: &str, y: &str) -> ComputedStyle {
        ComputedStyle {
            overflow: overflow.to_string(),
            overflow_x: x.to_string(),
            overflow_y: y.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_clipping_ancestor_keeps_raw_box() {
        let visible = style("visible", "visible", "visible");
        let raw = Rect::new(460, 200, 360, 40);
        let res = resolve(raw, [(Rect::new(0, 0, 100, 100), &visible)]);
        assert_eq!(res.visible_box, raw);
        assert!(!res.info.is_clipped);
        assert!(res.info.is_fully_visible);
        assert!(res.is_visible());
    }

    #[test]
    fn test_bottom_clipped_by_hidden_parent() {
        let hidden = style("hidden", "hidden", "hidden");
        let raw = Rect::new(0, 100, 200, 80);
        let res = resolve(raw, [(Rect::new(0, 0, 400, 120), &hidden)]);
        assert_eq!(res.visible_box, Rect::new(0, 100, 200, 20));
        assert!(res.info.is_clipped);
        assert_eq!(res.info.clipped_sides(), vec!["bottom"]);
        assert_eq!(res.info.height_deficit(), 60.0);
    }

    #[test]
    fn test_overflow_x_only_leaves_vertical_edges() {
        let clip_x = style("visible", "hidden", "visible");
        let raw = Rect::new(-20, -30, 100, 300);
        let res = resolve(raw, [(Rect::new(0, 0, 50, 50), &clip_x)]);
        assert_eq!(res.visible_box.top(), -30);
        assert_eq!(res.visible_box.bottom(), 270);
        assert_eq!(res.visible_box.left(), 0);
        assert_eq!(res.visible_box.right(), 50);
        assert_eq!(res.info.clipped_sides(), vec!["left", "right"]);
    }

    #[test]
    fn test_disjoint_clip_collapses_inside_raw_box() {
        let hidden = style("hidden", "", "");
        let raw = Rect::new(200, 200, 100, 40);
        let res = resolve(raw, [(Rect::new(400, 0, 100, 100), &hidden)]);
        assert!(!res.is_visible());
        assert!(res.visible_box.width >= 0 && res.visible_box.height >= 0);
        assert!(raw.contains(&res.visible_box));
    }

    #[test]
    fn test_nested_ancestors_intersect_in_order() {
        let hidden = style("hidden", "", "");
        let clip = style("clip", "", "");
        let raw = Rect::new(0, 0, 500, 500);
        let res = resolve(
            raw,
            [
                (Rect::new(10, 10, 300, 300), &hidden),
                (Rect::new(50, 0, 400, 100), &clip),
            ],
        );
        assert_eq!(res.visible_box, Rect::new(50, 10, 260, 90));
        assert!(raw.contains(&res.visible_box));
        assert!(res.info.visible_height <= res.info.original_height);
    }

    #[test]
    fn test_overflow_clips_values() {
        assert!(overflow_clips("hidden"));
        assert!(overflow_clips("clip"));
        assert!(!overflow_clips("auto"));
        assert!(!overflow_clips(""));
    }
}
