//! Inline style declarations and the engine's supported-property profile.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;

/// The set of style property names the hosting engine recognizes.
///
/// Feature probes (vendor prefix detection in particular) test candidate
/// property names against this profile, the same way script probes
/// `'webkitTransform' in element.style` against a live engine.
#[derive(Clone, Debug)]
pub struct StyleProfile {
    supported: HashSet<String>,
}

impl StyleProfile {
    /// A profile recognizing the given property names.
    pub fn new(properties: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            supported: properties.into_iter().map(Into::into).collect(),
        }
    }

    /// A modern engine: unprefixed property names only.
    pub fn standard() -> Self {
        Self::new(["transform", "transition", "animation", "filter"])
    }

    /// A WebKit-era engine: prefixed names, no unprefixed `transform`.
    pub fn webkit_prefixed() -> Self {
        Self::new([
            "webkitTransform",
            "webkitTransition",
            "webkitAnimation",
            "webkitFilter",
        ])
    }

    /// A Gecko-era engine.
    pub fn gecko_prefixed() -> Self {
        Self::new(["MozTransform", "MozTransition", "MozAnimation"])
    }

    pub fn supports(&self, property: &str) -> bool {
        self.supported.contains(property)
    }
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self::standard()
    }
}

/// An element's inline style declaration.
#[derive(Clone, Debug)]
pub struct StyleDeclaration {
    properties: IndexMap<String, String>,
    profile: Arc<StyleProfile>,
}

impl StyleDeclaration {
    pub fn new(profile: Arc<StyleProfile>) -> Self {
        Self {
            properties: IndexMap::new(),
            profile,
        }
    }

    /// Whether the engine recognizes `property` at all.
    pub fn supports(&self, property: &str) -> bool {
        self.profile.supports(property)
    }

    /// Set a property. Unrecognized properties are ignored, as an engine
    /// ignores declarations it cannot parse.
    pub fn set_property(&mut self, property: &str, value: &str) {
        if self.profile.supports(property) {
            self.properties.insert(property.to_string(), value.to_string());
        }
    }

    pub fn get_property(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
