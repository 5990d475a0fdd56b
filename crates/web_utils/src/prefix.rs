//! CSS vendor prefix detection.

use dom::Document;

/// The vendor prefix the hosting engine wants on experimental properties,
/// with [`VendorPrefix::None`] as the no-prefix-needed sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VendorPrefix {
    #[default]
    None,
    Webkit,
    Moz,
    Ms,
    O,
}

/// Candidate `transform` spellings, probed in order.
const CANDIDATES: [(&str, VendorPrefix); 5] = [
    ("transform", VendorPrefix::None),
    ("webkitTransform", VendorPrefix::Webkit),
    ("MozTransform", VendorPrefix::Moz),
    ("msTransform", VendorPrefix::Ms),
    ("OTransform", VendorPrefix::O),
];

impl VendorPrefix {
    /// Probe a detached stylable element for the first supported candidate.
    ///
    /// An engine recognizing none of the candidates has no transform support
    /// at all; property names are then left unprefixed.
    pub fn detect(document: &mut Document) -> Self {
        let probe = document.create_element("div");

        let detected = document
            .tree
            .get_element(probe)
            .and_then(|element| {
                CANDIDATES
                    .iter()
                    .find(|(property, _)| element.style.supports(property))
                    .map(|(_, prefix)| *prefix)
            })
            .unwrap_or(VendorPrefix::None);

        document.tree.remove(probe);
        detected
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VendorPrefix::None => "",
            VendorPrefix::Webkit => "webkit",
            VendorPrefix::Moz => "Moz",
            VendorPrefix::Ms => "ms",
            VendorPrefix::O => "O",
        }
    }

    /// Prefixed spelling of a property name: the first letter upper-cased
    /// behind the vendor string. Unchanged when no prefix is needed.
    pub fn prefixed(&self, property: &str) -> String {
        if *self == VendorPrefix::None {
            return property.to_string();
        }

        let mut chars = property.chars();
        match chars.next() {
            Some(first) => format!(
                "{}{}{}",
                self.as_str(),
                first.to_ascii_uppercase(),
                chars.as_str()
            ),
            None => self.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::StyleProfile;
    use url::Url;

    fn doc_with(profile: StyleProfile) -> Document {
        Document::with_style_profile(Url::parse("https://example.com/").unwrap(), profile)
    }

    #[test]
    fn test_detect_standard_engine() {
        let mut doc = doc_with(StyleProfile::standard());
        assert_eq!(VendorPrefix::detect(&mut doc), VendorPrefix::None);
    }

    #[test]
    fn test_detect_webkit_engine() {
        let mut doc = doc_with(StyleProfile::webkit_prefixed());
        assert_eq!(VendorPrefix::detect(&mut doc), VendorPrefix::Webkit);
    }

    #[test]
    fn test_detect_gecko_engine() {
        let mut doc = doc_with(StyleProfile::gecko_prefixed());
        assert_eq!(VendorPrefix::detect(&mut doc), VendorPrefix::Moz);
    }

    #[test]
    fn test_detect_leaves_no_probe_behind() {
        let mut doc = doc_with(StyleProfile::standard());
        let before = doc.tree.len();
        VendorPrefix::detect(&mut doc);
        assert_eq!(doc.tree.len(), before);
    }

    #[test]
    fn test_prefixed_spelling() {
        assert_eq!(VendorPrefix::Webkit.prefixed("transform"), "webkitTransform");
        assert_eq!(VendorPrefix::Moz.prefixed("transition"), "MozTransition");
        assert_eq!(VendorPrefix::None.prefixed("transform"), "transform");
    }
}
