//! DOM element implementation.

use crate::style::{StyleDeclaration, StyleProfile};
use indexmap::IndexMap;
use std::sync::Arc;

/// Data carried by an element node.
#[derive(Clone, Debug)]
pub struct ElementData {
    /// Lower-cased tag name.
    pub tag_name: String,
    /// Element attributes, in document order.
    pub attributes: IndexMap<String, String>,
    /// Inline style declaration.
    pub style: StyleDeclaration,
    /// Layout metrics.
    pub layout: LayoutMetrics,
}

/// Offset metrics as produced by layout, relative to the offset parent.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutMetrics {
    pub offset_left: f32,
    pub offset_top: f32,
}

impl ElementData {
    pub fn new(tag_name: &str, profile: Arc<StyleProfile>) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attributes: IndexMap::new(),
            style: StyleDeclaration::new(profile),
            layout: LayoutMetrics::default(),
        }
    }

    /// The `id` attribute, if present.
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    pub fn set_offsets(&mut self, left: f32, top: f32) {
        self.layout.offset_left = left;
        self.layout.offset_top = top;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_lowercased() {
        let el = ElementData::new("DIV", Arc::new(StyleProfile::standard()));
        assert_eq!(el.tag_name, "div");
    }

    #[test]
    fn test_attributes() {
        let mut el = ElementData::new("script", Arc::new(StyleProfile::standard()));
        el.set_attribute("src", "/app.js");
        el.set_attribute("id", "boot");

        assert_eq!(el.get_attribute("src"), Some("/app.js"));
        assert_eq!(el.id(), Some("boot"));
        assert_eq!(el.remove_attribute("id"), Some("boot".to_string()));
        assert_eq!(el.id(), None);
    }
}
