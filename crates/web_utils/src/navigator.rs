//! Navigator identity and user-agent derived browser flags.

/// Navigator identity strings, fixed for the lifetime of a page.
#[derive(Clone, Debug)]
pub struct Navigator {
    user_agent: String,
    app_version: String,
    language: String,
}

impl Navigator {
    /// A desktop WebKit default.
    pub fn new() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Pagebase/1.0"
                .to_string(),
            app_version: "5.0 (X11; Linux x86_64)".to_string(),
            language: "en-US".to_string(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_app_version(mut self, app_version: impl Into<String>) -> Self {
        self.app_version = app_version.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

/// Boolean environment flags derived from the user-agent string, probed once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowserFlags {
    /// IE engine.
    pub trident: bool,
    /// Opera engine.
    pub presto: bool,
    /// Apple/Google engine.
    pub webkit: bool,
    /// Firefox engine.
    pub gecko: bool,
    /// Any mobile terminal.
    pub mobile: bool,
    pub ios: bool,
    /// Android terminal, or a UC browser reporting Linux.
    pub android: bool,
    pub iphone: bool,
    pub ipad: bool,
    /// Plain Safari web app, no embedder chrome.
    pub web_app: bool,
    pub wechat: bool,
    pub weibo: bool,
    pub qq: bool,
    pub uc: bool,
    pub p8: bool,
    pub wechat_devtools: bool,
}

impl BrowserFlags {
    /// Derive the flag set from a navigator's user agent.
    pub fn detect(navigator: &Navigator) -> Self {
        let ua = navigator.user_agent();

        Self {
            trident: ua.contains("Trident"),
            presto: ua.contains("Presto"),
            webkit: ua.contains("AppleWebKit"),
            gecko: ua.contains("Gecko") && !ua.contains("KHTML"),
            mobile: ua
                .find("AppleWebKit")
                .map_or(false, |i| ua[i..].contains("Mobile")),
            ios: is_ios(ua),
            android: ua.contains("Android") || ua.contains("Linux"),
            iphone: ua.contains("iPhone"),
            ipad: ua.contains("iPad"),
            web_app: ua.contains("Safari"),
            wechat: ua.contains("MicroMessenger"),
            weibo: ua.contains("weibo"),
            qq: ua.contains("QQ"),
            uc: ua.contains("UCBrowser"),
            p8: ua.contains("P8"),
            wechat_devtools: ua.contains("wechatdevtools"),
        }
    }
}

/// Loose transcription of the classic `(i…; CPU … Mac OS X` probe.
fn is_ios(ua: &str) -> bool {
    let Some(start) = ua.find("(i") else {
        return false;
    };
    let rest = &ua[start..];
    let Some(cpu) = rest.find("CPU") else {
        return false;
    };
    rest[cpu..].contains("Mac OS X")
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) \
                             AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 \
                             Mobile/15E148 Safari/604.1";

    #[test]
    fn test_iphone_flags() {
        let navigator = Navigator::new().with_user_agent(IPHONE_UA);
        let flags = BrowserFlags::detect(&navigator);

        assert!(flags.webkit);
        assert!(flags.mobile);
        assert!(flags.ios);
        assert!(flags.iphone);
        assert!(flags.web_app);
        assert!(!flags.ipad);
        assert!(!flags.android);
        assert!(!flags.trident);
        // KHTML token masks the Gecko compatibility claim.
        assert!(!flags.gecko);
    }

    #[test]
    fn test_wechat_flags() {
        let ua = format!("{} MicroMessenger/8.0.0", IPHONE_UA);
        let flags = BrowserFlags::detect(&Navigator::new().with_user_agent(ua));
        assert!(flags.wechat);
        assert!(!flags.weibo);
        assert!(!flags.qq);
    }

    #[test]
    fn test_desktop_firefox_flags() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0";
        let flags = BrowserFlags::detect(&Navigator::new().with_user_agent(ua));

        assert!(flags.gecko);
        assert!(!flags.webkit);
        assert!(!flags.mobile);
        assert!(!flags.ios);
    }

    #[test]
    fn test_android_via_linux_token() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";
        let flags = BrowserFlags::detect(&Navigator::new().with_user_agent(ua));
        // Preserved quirk: a desktop Linux UA also reads as android.
        assert!(flags.android);
    }

    #[test]
    fn test_navigator_builders() {
        let navigator = Navigator::new()
            .with_user_agent("Custom/1.0")
            .with_language("zh-CN");
        assert_eq!(navigator.user_agent(), "Custom/1.0");
        assert_eq!(navigator.language(), "zh-CN");
    }
}
