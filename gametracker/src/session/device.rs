//! Best-effort device classification from a user-agent string.
//!
//! Pure substring matching, no UA database. Check order matters where one
//! product embeds another's name in its user agent: Edge and Opera ship
//! "Chrome" in theirs, iOS devices report "like Mac OS X", and Android
//! includes "Linux".

use std::fmt;

/// Browser family of a session's user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Opera,
    Unknown,
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chrome => "Chrome",
            Self::Firefox => "Firefox",
            Self::Safari => "Safari",
            Self::Edge => "Edge",
            Self::Opera => "Opera",
            Self::Unknown => "Navegador desconocido",
        };
        write!(f, "{name}")
    }
}

/// Operating system of a session's user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    Mac,
    Linux,
    Android,
    Ios,
    Unknown,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Windows => "Windows",
            Self::Mac => "macOS",
            Self::Linux => "Linux",
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::Unknown => "Sistema desconocido",
        };
        write!(f, "{name}")
    }
}

/// Classified browser and OS of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    pub browser: Browser,
    pub os: Os,
}

impl DeviceInfo {
    /// Classify a raw user-agent string.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();

        // "edg"/"opr" before "chrome": both embed Chrome's token.
        let browser = if ua.contains("edg") {
            Browser::Edge
        } else if ua.contains("opr") || ua.contains("opera") {
            Browser::Opera
        } else if ua.contains("chrome") || ua.contains("crios") {
            Browser::Chrome
        } else if ua.contains("firefox") || ua.contains("fxios") {
            Browser::Firefox
        } else if ua.contains("safari") {
            Browser::Safari
        } else {
            Browser::Unknown
        };

        // iOS before Mac ("like Mac OS X"), Android before Linux.
        let os = if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ios") {
            Os::Ios
        } else if ua.contains("android") {
            Os::Android
        } else if ua.contains("windows") {
            Os::Windows
        } else if ua.contains("mac") {
            Os::Mac
        } else if ua.contains("linux") {
            Os::Linux
        } else {
            Os::Unknown
        };

        Self { browser, os }
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} en {}", self.browser, self.os)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_WINDOWS: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0 Safari/537.36";
    const EDGE_WINDOWS: &str =
        "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 Chrome/120.0 Safari/537.36 Edg/120.0";
    const OPERA_LINUX: &str =
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/119.0 Safari/537.36 OPR/105.0";
    const FIREFOX_LINUX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
    const SAFARI_MAC: &str =
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 Version/17.1 Safari/605.1.15";
    const SAFARI_IPHONE: &str =
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15 Version/17.1 Mobile Safari/605.1.15";
    const CHROME_ANDROID: &str =
        "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120.0 Mobile Safari/537.36";

    #[test]
    fn test_chrome_on_windows() {
        let device = DeviceInfo::from_user_agent(CHROME_WINDOWS);
        assert_eq!(device.browser, Browser::Chrome);
        assert_eq!(device.os, Os::Windows);
    }

    #[test]
    fn test_edge_is_not_mistagged_as_chrome() {
        let device = DeviceInfo::from_user_agent(EDGE_WINDOWS);
        assert_eq!(device.browser, Browser::Edge);
    }

    #[test]
    fn test_opera_is_not_mistagged_as_chrome() {
        let device = DeviceInfo::from_user_agent(OPERA_LINUX);
        assert_eq!(device.browser, Browser::Opera);
        assert_eq!(device.os, Os::Linux);
    }

    #[test]
    fn test_firefox_on_linux() {
        let device = DeviceInfo::from_user_agent(FIREFOX_LINUX);
        assert_eq!(device.browser, Browser::Firefox);
        assert_eq!(device.os, Os::Linux);
    }

    #[test]
    fn test_safari_on_mac() {
        let device = DeviceInfo::from_user_agent(SAFARI_MAC);
        assert_eq!(device.browser, Browser::Safari);
        assert_eq!(device.os, Os::Mac);
    }

    #[test]
    fn test_iphone_is_ios_not_mac() {
        let device = DeviceInfo::from_user_agent(SAFARI_IPHONE);
        assert_eq!(device.os, Os::Ios);
    }

    #[test]
    fn test_android_is_not_mistagged_as_linux() {
        let device = DeviceInfo::from_user_agent(CHROME_ANDROID);
        assert_eq!(device.browser, Browser::Chrome);
        assert_eq!(device.os, Os::Android);
    }

    #[test]
    fn test_unknown_fallback_for_both_axes() {
        let device = DeviceInfo::from_user_agent("curl/8.4.0");
        assert_eq!(device.browser, Browser::Unknown);
        assert_eq!(device.os, Os::Unknown);
    }

    #[test]
    fn test_empty_user_agent() {
        let device = DeviceInfo::from_user_agent("");
        assert_eq!(device.browser, Browser::Unknown);
        assert_eq!(device.os, Os::Unknown);
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        let device = DeviceInfo::from_user_agent("CHROME on WINDOWS");
        assert_eq!(device.browser, Browser::Chrome);
        assert_eq!(device.os, Os::Windows);
    }

    #[test]
    fn test_display_label() {
        let device = DeviceInfo::from_user_agent(CHROME_WINDOWS);
        assert_eq!(device.to_string(), "Chrome en Windows");

        let unknown = DeviceInfo::from_user_agent("curl/8.4.0");
        assert_eq!(
            unknown.to_string(),
            "Navegador desconocido en Sistema desconocido"
        );
    }
}
