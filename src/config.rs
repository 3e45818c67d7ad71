//! Page composition configuration.
//!
//! The placeholder-to-resource mapping and the consumer tuning knobs are
//! fixed at build time; there is no configuration file. [`PageConfig`] is a
//! plain struct whose `Default` matches the reference deployment (shared
//! header and footer fragments).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fragment::FragmentSpec;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("placeholder `{0}` is mapped to more than one fragment")]
    DuplicatePlaceholder(String),

    #[error("fragment for placeholder `{0}` has an empty resource locator")]
    EmptyLocator(String),
}

/// Full composition configuration for one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Fragments to load and inject, one slot each.
    pub fragments: Vec<FragmentSpec>,

    /// Active-navigation highlighting.
    pub nav: NavOptions,

    /// Scroll-dependent header styling.
    pub scroll: ScrollOptions,

    /// One-shot entrance reveal.
    pub reveal: RevealOptions,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            fragments: vec![
                FragmentSpec::new("_header.html", "header-placeholder"),
                FragmentSpec::new("_footer.html", "footer-placeholder"),
            ],
            nav: NavOptions::default(),
            scroll: ScrollOptions::default(),
            reveal: RevealOptions::default(),
        }
    }
}

impl PageConfig {
    /// Reject mappings that would break the at-most-once injection guarantee.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = rustc_hash::FxHashSet::default();
        for spec in &self.fragments {
            if spec.locator.is_empty() {
                return Err(ConfigError::EmptyLocator(spec.placeholder.clone()));
            }
            if !seen.insert(spec.placeholder.as_str()) {
                return Err(ConfigError::DuplicatePlaceholder(spec.placeholder.clone()));
            }
        }
        Ok(())
    }
}

/// Active-navigation highlighting options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavOptions {
    /// Class of the container(s) whose anchors are nav links.
    pub container_class: String,

    /// Class added to anchors matching the current page.
    pub active_class: String,

    /// Target the empty/root page name normalizes to.
    pub home_target: String,

    /// Slot the nav links arrive in. `None` means the links are statically
    /// present and readiness falls back to bounded polling.
    pub await_placeholder: Option<String>,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            container_class: "nav-links".into(),
            active_class: "active".into(),
            home_target: "index.html".into(),
            await_placeholder: Some("header-placeholder".into()),
        }
    }
}

/// Scroll-dependent header styling options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollOptions {
    /// Id of the header element that receives the scrolled class. Lives
    /// inside the injected header fragment, not on the placeholder itself.
    pub header_id: String,

    /// Scroll offset (px) beyond which the page counts as scrolled.
    pub threshold_px: u32,

    /// Class mirrored from the scrolled state.
    pub scrolled_class: String,

    /// Slot the header element arrives in.
    pub await_placeholder: Option<String>,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            header_id: "main-header".into(),
            threshold_px: 50,
            scrolled_class: "scrolled".into(),
            await_placeholder: Some("header-placeholder".into()),
        }
    }
}

/// One-shot entrance reveal options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealOptions {
    /// Marker class that opts an element into the reveal set at startup.
    pub marker_class: String,

    /// Class added on first reveal.
    pub visible_class: String,

    /// Fraction of the element that must be visible to trigger.
    pub threshold: f32,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            marker_class: "fade-in".into(),
            visible_class: "visible".into(),
            threshold: 0.1,
        }
    }
}
