//! WhatsApp deep links and platform detection.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::capability::PlatformDetector;
use crate::link::encode_component;

/// Deep link prefix for desktop-class clients (WhatsApp Web).
pub const WEB_SHARE_BASE: &str = "https://wa.me/?text=";

/// Deep link prefix for mobile-class clients (app scheme).
pub const APP_SHARE_BASE: &str = "whatsapp://send?text=";

/// Client platform class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Desktop browser or terminal.
    #[default]
    Desktop,
    /// Phone or tablet with the app installed.
    Mobile,
}

impl Platform {
    /// Returns the string identifier for this platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }

    /// Parses a platform from its identifier.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "desktop" | "web" => Some(Self::Desktop),
            "mobile" | "app" => Some(Self::Mobile),
            _ => None,
        }
    }
}

/// Builds the share deep link for `text` on `platform`.
pub fn share_url(text: &str, platform: Platform) -> String {
    let base = match platform {
        Platform::Desktop => WEB_SHARE_BASE,
        Platform::Mobile => APP_SHARE_BASE,
    };
    format!("{base}{}", encode_component(text))
}

const MOBILE_AGENT_PATTERN: &str = r"(?i)android|iphone|ipad|ipod";

static MOBILE_AGENT: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(MOBILE_AGENT_PATTERN).ok());

/// Classifies a user agent string with the usual mobile-device heuristic.
#[derive(Debug, Clone)]
pub struct UserAgentDetector {
    user_agent: String,
}

impl UserAgentDetector {
    /// Creates a detector for the given user agent.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }
}

impl PlatformDetector for UserAgentDetector {
    fn platform(&self) -> Platform {
        let mobile = MOBILE_AGENT
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(&self.user_agent));
        if mobile {
            Platform::Mobile
        } else {
            Platform::Desktop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url() {
        assert_eq!(
            share_url("Halo & salam\n", Platform::Desktop),
            "https://wa.me/?text=Halo%20%26%20salam%0A"
        );
        assert_eq!(
            share_url("Halo", Platform::Mobile),
            "whatsapp://send?text=Halo"
        );
    }

    #[test]
    fn test_share_url_encodes_emoji() {
        assert_eq!(share_url("📞", Platform::Desktop), "https://wa.me/?text=%F0%9F%93%9E");
    }

    #[test]
    fn test_mobile_pattern_compiles() {
        assert!(MOBILE_AGENT.is_some());
    }

    #[test]
    fn test_user_agent_detector() {
        let iphone = UserAgentDetector::new(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15",
        );
        assert_eq!(iphone.platform(), Platform::Mobile);

        let android = UserAgentDetector::new("Mozilla/5.0 (Linux; ANDROID 14; Pixel 8)");
        assert_eq!(android.platform(), Platform::Mobile);

        let desktop = UserAgentDetector::new("Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0");
        assert_eq!(desktop.platform(), Platform::Desktop);
        assert_eq!(UserAgentDetector::new("").platform(), Platform::Desktop);
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!(Platform::parse("Mobile"), Some(Platform::Mobile));
        assert_eq!(Platform::parse("web"), Some(Platform::Desktop));
        assert_eq!(Platform::parse("tv"), None);
    }
}
