//! Snapshot schema and loader
//!
//! A snapshot (LayoutML) is the JSON document a capture run writes for one
//! state of one page: the viewport plus a flat list of rendered elements in
//! document order. Loading fills every optional field with an empty value so
//! the assertion library can treat all of them as present.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{Rect, Viewport};
use crate::visibility::{overflow_clips, VisibilityInfo};

/// Computed style facts captured per element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyle {
    #[serde(default, deserialize_with = "lenient_string")]
    pub display: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub opacity: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub visibility: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub position: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub z_index: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub overflow: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub overflow_x: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub overflow_y: String,
}

impl ComputedStyle {
    pub fn is_display_none(&self) -> bool {
        self.display.trim() == "none"
    }

    pub fn is_visibility_hidden(&self) -> bool {
        self.visibility.trim() == "hidden"
    }

    /// Resolved opacity; empty or unparseable values count as fully opaque
    pub fn opacity(&self) -> f64 {
        self.opacity.trim().parse::<f64>().unwrap_or(1.0)
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity() == 0.0
    }

    /// (x, y) axes on which this element clips its descendants
    pub fn clip_axes(&self) -> (bool, bool) {
        let both = overflow_clips(&self.overflow);
        (
            both || overflow_clips(&self.overflow_x),
            both || overflow_clips(&self.overflow_y),
        )
    }
}

/// One rendered node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutElement {
    pub tag: String,
    pub element_type: Option<String>,
    pub text: String,
    pub value: String,
    pub placeholder: String,
    pub raw_box: Rect,
    pub visible_box: Rect,
    pub style: ComputedStyle,
    pub class_names: String,
    pub is_container: bool,
    pub visibility: Option<VisibilityInfo>,
}

impl LayoutElement {
    /// Minimal element at `rect` with no clipping, style or classes
    pub fn new(tag: impl Into<String>, rect: Rect) -> Self {
        Self {
            tag: tag.into(),
            element_type: None,
            text: String::new(),
            value: String::new(),
            placeholder: String::new(),
            raw_box: rect,
            visible_box: rect,
            style: ComputedStyle::default(),
            class_names: String::new(),
            is_container: false,
            visibility: None,
        }
    }

    pub fn has_visibility_info(&self) -> bool {
        self.visibility.is_some()
    }

    pub fn is_clipped(&self) -> bool {
        self.visibility.as_ref().map(|v| v.is_clipped).unwrap_or(false)
    }

    /// Whitespace-separated class tokens
    pub fn class_tokens(&self) -> impl Iterator<Item = &str> {
        self.class_names.split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_tokens().any(|t| t == class)
    }

    /// Text, else value, else placeholder
    pub fn content(&self) -> &str {
        [&self.text, &self.value, &self.placeholder]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Viewport plus elements in captured order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub viewport: Viewport,
    pub elements: Vec<LayoutElement>,
}

impl Snapshot {
    pub fn new(viewport: Viewport, elements: Vec<LayoutElement>) -> Self {
        Self { viewport, elements }
    }

    /// Parse a snapshot document
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        let record: SnapshotRecord =
            serde_json::from_str(json).map_err(|e| LayoutError::Format(e.to_string()))?;

        let viewport = record.viewport.unwrap_or_default();
        let captured = record.elements.len();
        let elements: Vec<LayoutElement> = record
            .elements
            .into_iter()
            .map(LayoutElement::from)
            .filter(|e| {
                let keep = e.visible_box.has_area();
                if !keep {
                    debug!("Dropping {} with no visible area at {}", e.tag, e.raw_box);
                }
                keep
            })
            .collect();

        debug!(
            "Loaded snapshot: {}x{} viewport, {} of {} elements",
            viewport.width,
            viewport.height,
            elements.len(),
            captured
        );

        Ok(Self { viewport, elements })
    }

    /// Load a snapshot file
    pub fn load(path: &Path) -> LayoutResult<Self> {
        if !path.exists() {
            return Err(LayoutError::SnapshotNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| match e {
            LayoutError::Format(msg) => LayoutError::Format(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Violations of the snapshot invariants a well-behaved producer never emits
    pub fn lint(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for (index, el) in self.elements.iter().enumerate() {
            if !el.raw_box.contains(&el.visible_box) {
                issues.push(format!(
                    "element #{} ({}) visible box {} exceeds raw box {}",
                    index, el.tag, el.visible_box, el.raw_box
                ));
            }
            if let Some(info) = &el.visibility {
                if info.visible_height > info.original_height {
                    issues.push(format!(
                        "element #{} ({}) visible height {}px exceeds original height {}px",
                        index, el.tag, info.visible_height, info.original_height
                    ));
                }
            }
        }

        issues
    }
}

#[derive(Deserialize)]
struct SnapshotRecord {
    #[serde(default)]
    viewport: Option<Viewport>,
    elements: Vec<ElementRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElementRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    tag: String,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    element_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    text: String,
    #[serde(default, deserialize_with = "lenient_string")]
    value: String,
    #[serde(default, deserialize_with = "lenient_string")]
    placeholder: String,
    #[serde(default)]
    rect: Rect,
    #[serde(default)]
    visible_rect: Option<Rect>,
    #[serde(default)]
    style: Option<ComputedStyle>,
    #[serde(default, deserialize_with = "lenient_string")]
    classes: String,
    #[serde(default)]
    is_container: bool,
    #[serde(default)]
    visibility: Option<VisibilityRecord>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct VisibilityRecord {
    is_fully_visible: Option<bool>,
    is_clipped: Option<bool>,
    clipped_top: Option<bool>,
    clipped_bottom: Option<bool>,
    clipped_left: Option<bool>,
    clipped_right: Option<bool>,
    visible_height: Option<f64>,
    original_height: Option<f64>,
}

impl VisibilityRecord {
    fn is_empty(&self) -> bool {
        self.is_fully_visible.is_none()
            && self.is_clipped.is_none()
            && self.clipped_top.is_none()
            && self.clipped_bottom.is_none()
            && self.clipped_left.is_none()
            && self.clipped_right.is_none()
            && self.visible_height.is_none()
            && self.original_height.is_none()
    }

    fn into_info(self, raw_box: &Rect, visible_box: &Rect) -> VisibilityInfo {
        let is_clipped = self.is_clipped.unwrap_or(false);
        VisibilityInfo {
            is_fully_visible: self.is_fully_visible.unwrap_or(!is_clipped),
            is_clipped,
            clipped_top: self.clipped_top.unwrap_or(false),
            clipped_bottom: self.clipped_bottom.unwrap_or(false),
            clipped_left: self.clipped_left.unwrap_or(false),
            clipped_right: self.clipped_right.unwrap_or(false),
            visible_height: self.visible_height.unwrap_or(f64::from(visible_box.height)),
            original_height: self.original_height.unwrap_or(f64::from(raw_box.height)),
        }
    }
}

impl From<ElementRecord> for LayoutElement {
    fn from(record: ElementRecord) -> Self {
        let raw_box = record.rect;
        let visible_box = record.visible_rect.unwrap_or(raw_box);
        let visibility = record
            .visibility
            .filter(|v| !v.is_empty())
            .map(|v| v.into_info(&raw_box, &visible_box));
        let element_type = Some(record.element_type).filter(|t| !t.is_empty());

        Self {
            tag: record.tag,
            element_type,
            text: record.text,
            value: record.value,
            placeholder: record.placeholder,
            raw_box,
            visible_box,
            style: record.style.unwrap_or_default(),
            class_names: record.classes,
            is_container: record.is_container,
            visibility,
        }
    }
}

/// Strings that may arrive as null, numbers or objects (SVG class lists)
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}
