//! Class-name conventions used to infer element state
//!
//! Snapshots do not record the `disabled` attribute or validation state, so
//! those are read from styling conventions instead. All of that reading lives
//! behind [`StyleConvention`]; the assertion library never inspects class
//! tokens for state on its own.

use serde::{Deserialize, Serialize};

use crate::snapshot::LayoutElement;

/// Interprets an element's classes as UI state
pub trait StyleConvention: Send + Sync {
    /// Disabled-looking tokens applied unconditionally (the element looks
    /// disabled right now)
    fn applied_disabled_tokens(&self, element: &LayoutElement) -> Vec<String>;

    /// Disabled styling is defined conditionally (applies once disabled)
    fn defines_disabled_styles(&self, element: &LayoutElement) -> bool;

    /// A conditional disabled background is defined
    fn defines_disabled_background(&self, element: &LayoutElement) -> bool;

    /// Hover or similar interaction feedback is defined
    fn has_interactive_affordance(&self, element: &LayoutElement) -> bool;

    fn has_error_styling(&self, element: &LayoutElement) -> bool;

    fn has_transition_styling(&self, element: &LayoutElement) -> bool;
}

/// Utility-class convention with `variant:` prefixes (Tailwind CSS)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailwindConvention {
    /// Prefix marking a style as applying only in the disabled state
    pub conditional_prefix: String,

    /// Utilities that make a control look disabled
    pub disabled_tokens: Vec<String>,

    /// Utility family expected as the conditional disabled background
    pub disabled_background: String,

    /// Variants that signal an interactive control
    pub interactive_variants: Vec<String>,

    /// Utility families that signal error state
    pub error_families: Vec<String>,

    /// Utility families that signal animated state changes
    pub transition_families: Vec<String>,
}

impl Default for TailwindConvention {
    fn default() -> Self {
        Self {
            conditional_prefix: "disabled:".to_string(),
            disabled_tokens: vec!["bg-gray-600".to_string(), "cursor-not-allowed".to_string()],
            disabled_background: "bg-gray".to_string(),
            interactive_variants: vec!["hover".to_string()],
            error_families: vec![
                "border-red".to_string(),
                "text-red".to_string(),
                "ring-red".to_string(),
            ],
            transition_families: vec!["transition".to_string(), "duration-".to_string()],
        }
    }
}

impl TailwindConvention {
    /// Utility part of a token, after any `variant:` prefixes
    fn utility(token: &str) -> &str {
        token.rsplit(':').next().unwrap_or(token)
    }

    fn has_family(element: &LayoutElement, families: &[String]) -> bool {
        element.class_tokens().any(|token| {
            let utility = Self::utility(token);
            families.iter().any(|family| utility.starts_with(family.as_str()))
        })
    }

    fn conditional(&self, token: &str) -> String {
        format!("{}{}", self.conditional_prefix, token)
    }
}

impl StyleConvention for TailwindConvention {
    fn applied_disabled_tokens(&self, element: &LayoutElement) -> Vec<String> {
        self.disabled_tokens
            .iter()
            .filter(|token| element.has_class(token))
            .cloned()
            .collect()
    }

    fn defines_disabled_styles(&self, element: &LayoutElement) -> bool {
        self.disabled_tokens
            .iter()
            .any(|token| element.has_class(&self.conditional(token)))
    }

    fn defines_disabled_background(&self, element: &LayoutElement) -> bool {
        let prefix = self.conditional(&self.disabled_background);
        element.class_tokens().any(|token| token.starts_with(&prefix))
    }

    fn has_interactive_affordance(&self, element: &LayoutElement) -> bool {
        element.class_tokens().any(|token| {
            let mut parts: Vec<&str> = token.split(':').collect();
            parts.pop();
            parts
                .iter()
                .any(|variant| self.interactive_variants.iter().any(|v| v == variant))
        })
    }

    fn has_error_styling(&self, element: &LayoutElement) -> bool {
        Self::has_family(element, &self.error_families)
    }

    fn has_transition_styling(&self, element: &LayoutElement) -> bool {
        Self::has_family(element, &self.transition_families)
    }
}
