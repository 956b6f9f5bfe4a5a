//! Narrative composition.
//!
//! A narrative is the program template with the generated link substituted
//! in, followed by the payment appendix (both bank accounts and the
//! confirmation contact).

use std::fmt::Write as _;

use crate::catalog::{Program, SiteConfig};

/// Token replaced by the generated link.
pub const PLACEHOLDER: &str = "{LINK}";

/// Replaces the first occurrence of [`PLACEHOLDER`] with `link`.
///
/// Later occurrences are left as written.
pub fn substitute(template: &str, link: &str) -> String {
    template.replacen(PLACEHOLDER, link, 1)
}

/// Picks the confirmation contact: the trimmed override when non-empty,
/// otherwise the configured default.
pub fn confirmation_contact<'a>(config: &'a SiteConfig, override_value: Option<&'a str>) -> &'a str {
    override_value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(config.default_confirmation.as_str())
}

/// Renders the payment appendix.
pub fn payment_appendix(config: &SiteConfig, contact: &str) -> String {
    let mut out = String::from("\n\nRekening:\n");
    for account in config.accounts.accounts() {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "🏦 {} {}", account.institution, account.number);
        let _ = writeln!(out, "a.n {}", account.holder);
    }
    let _ = write!(out, "\n📞 Konfirmasi: {contact}");
    out
}

/// Composes the full narrative for `program` with `link` and the resolved contact.
pub fn compose(config: &SiteConfig, program: &Program, link: &str, override_value: Option<&str>) -> String {
    let contact = confirmation_contact(config, override_value);
    let mut narrative = substitute(&program.template, link);
    narrative.push_str(&payment_appendix(config, contact));
    narrative
}
