//! Affiliate link generation.
//!
//! A link is produced from exactly one of two inputs: a bare affiliate code,
//! which is appended to the program URL, or a complete link supplied by the
//! user, which is checked and passed through unchanged.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::catalog::{Program, SiteConfig};
use crate::error::{PcgenError, PcgenResult};

/// Name of the query parameter that carries the affiliate code.
pub const AFFILIATE_PARAM: &str = "affiliate_code";

/// Characters left unescaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a string for use as a URI component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Input mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Affiliate code only.
    #[default]
    Code,
    /// Complete affiliate link.
    Link,
}

impl InputMode {
    /// Returns the string identifier for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Link => "link",
        }
    }

    /// Parses a mode from its identifier.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "code" | "kode" => Some(Self::Code),
            "link" | "url" => Some(Self::Link),
            _ => None,
        }
    }
}

/// The user's link input. Exactly one mode is populated at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum LinkInput {
    /// Affiliate code to append to the program URL.
    Code(String),
    /// Complete link that must already carry the affiliate code.
    FullLink(String),
}

impl Default for LinkInput {
    fn default() -> Self {
        Self::Code(String::new())
    }
}

impl LinkInput {
    /// Creates an empty input for the given mode.
    pub fn empty(mode: InputMode) -> Self {
        match mode {
            InputMode::Code => Self::Code(String::new()),
            InputMode::Link => Self::FullLink(String::new()),
        }
    }

    /// Returns the active mode.
    pub fn mode(&self) -> InputMode {
        match self {
            Self::Code(_) => InputMode::Code,
            Self::FullLink(_) => InputMode::Link,
        }
    }

    /// Returns the raw text of the active mode.
    pub fn text(&self) -> &str {
        match self {
            Self::Code(s) | Self::FullLink(s) => s,
        }
    }

    /// Builds the final link for `program`.
    pub fn resolve(&self, config: &SiteConfig, program: &Program) -> PcgenResult<String> {
        match self {
            Self::Code(code) => link_from_code(config, program, code),
            Self::FullLink(link) => check_full_link(link),
        }
    }
}

/// Builds `base_url + path + "?affiliate_code=" + encode(code)`.
pub fn link_from_code(config: &SiteConfig, program: &Program, code: &str) -> PcgenResult<String> {
    let code = code.trim();
    if code.is_empty() {
        return Err(PcgenError::EmptyCode);
    }

    Ok(format!(
        "{}{}?{}={}",
        config.base_url,
        program.path,
        AFFILIATE_PARAM,
        encode_component(code)
    ))
}

/// Accepts a complete link if it is an absolute URL carrying the affiliate parameter.
///
/// The returned link is the trimmed input, not a re-serialized URL.
pub fn check_full_link(link: &str) -> PcgenResult<String> {
    let link = link.trim();
    if link.is_empty() {
        return Err(PcgenError::EmptyLink);
    }

    let url = Url::parse(link).map_err(|e| PcgenError::malformed_link(e.to_string()))?;
    if !url.query_pairs().any(|(key, _)| key == AFFILIATE_PARAM) {
        return Err(PcgenError::MissingAffiliateCode);
    }

    Ok(link.to_string())
}
