//! The probed environment, computed once per page.

use crate::navigator::{BrowserFlags, Navigator};
use crate::prefix::VendorPrefix;
use dom::Document;

/// Everything the environment probe establishes at load time. The value is
/// immutable; probing again for the same page is never necessary.
#[derive(Clone, Debug)]
pub struct Environment {
    pub flags: BrowserFlags,
    /// Lower-cased navigator language.
    pub language: String,
    pub vendor_prefix: VendorPrefix,
}

impl Environment {
    pub fn probe(document: &mut Document, navigator: &Navigator) -> Self {
        Self {
            flags: BrowserFlags::detect(navigator),
            language: navigator.language().to_ascii_lowercase(),
            vendor_prefix: VendorPrefix::detect(document),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::StyleProfile;
    use url::Url;

    #[test]
    fn test_probe() {
        let mut doc = Document::with_style_profile(
            Url::parse("https://example.com/").unwrap(),
            StyleProfile::webkit_prefixed(),
        );
        let navigator = Navigator::new().with_language("zh-CN");

        let env = Environment::probe(&mut doc, &navigator);

        assert_eq!(env.language, "zh-cn");
        assert_eq!(env.vendor_prefix, VendorPrefix::Webkit);
        assert!(env.flags.webkit);
    }
}
