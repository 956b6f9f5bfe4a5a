//! Property-based tests for generation invariants.
//!
//! - Code-mode links are `base + path + ?affiliate_code= + encode(code)` and
//!   decode back to the trimmed code
//! - Link mode accepts exactly the absolute URLs that carry `affiliate_code`
//! - Generation is deterministic
//! - Only the first placeholder is substituted

use std::sync::Arc;

use proptest::prelude::*;
use url::Url;

use pcgen_core::link::{check_full_link, encode_component, AFFILIATE_PARAM};
use pcgen_core::narrative::{substitute, PLACEHOLDER};
use pcgen_core::prelude::*;
use pcgen_core::testing::sample_catalog;

fn affiliate_value(link: &str) -> Option<String> {
    Url::parse(link)
        .ok()?
        .query_pairs()
        .find(|(k, _)| k == AFFILIATE_PARAM)
        .map(|(_, v)| v.into_owned())
}

proptest! {
    #[test]
    fn code_mode_link_round_trips(code in "\\PC{1,24}") {
        prop_assume!(!code.trim().is_empty());
        let catalog = sample_catalog();
        let request = GenerationRequest::new("sumur", LinkInput::Code(code.clone()));
        let result = generate(&catalog, &request).unwrap();

        let expected = format!(
            "https://donasi.example/sumur?affiliate_code={}",
            encode_component(code.trim())
        );
        prop_assert_eq!(&result.link, &expected);
        prop_assert_eq!(affiliate_value(&result.link), Some(code.trim().to_string()));
    }

    #[test]
    fn link_mode_requires_affiliate_param(
        host in "[a-z]{1,10}",
        key in "[a-z_]{1,16}",
        value in "[a-z0-9]{0,8}",
    ) {
        let link = format!("https://{host}.example/p?{key}={value}");
        let outcome = check_full_link(&link);
        if key == AFFILIATE_PARAM {
            prop_assert_eq!(outcome, Ok(link));
        } else {
            prop_assert_eq!(outcome, Err(PcgenError::MissingAffiliateCode));
        }
    }

    #[test]
    fn relative_links_are_malformed(path in "[a-z/]{1,20}") {
        let link = format!("{path}?affiliate_code=x");
        let is_malformed = matches!(
            check_full_link(&link),
            Err(PcgenError::MalformedLink { .. })
        );
        prop_assert!(is_malformed);
    }

    #[test]
    fn generation_is_deterministic(code in "[a-zA-Z0-9 ]{1,16}", contact in "[0-9]{0,12}") {
        let catalog = Arc::new(sample_catalog());
        let mut session = Session::new(catalog);
        session.select_program(Some("zakat"));
        session.set_code(code.clone());
        session.set_confirmation(contact);

        let first = session.generate().map(|g| g.narrative.clone());
        let second = session.generate().map(|g| g.narrative.clone());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn only_first_placeholder_is_substituted(
        prefix in "[a-z ]{0,10}",
        middle in "[a-z ]{0,10}",
        link in "https://[a-z]{1,8}\\.example/\\?affiliate_code=[a-z0-9]{1,6}",
    ) {
        let template = format!("{prefix}{PLACEHOLDER}{middle}{PLACEHOLDER}");
        let out = substitute(&template, &link);
        prop_assert_eq!(out, format!("{prefix}{link}{middle}{PLACEHOLDER}"));
    }
}

#[test]
fn scenario_zakat_ali99() {
    let catalog = sample_catalog();
    let request = GenerationRequest::new("zakat", LinkInput::Code("ali99".into()));
    let result = generate(&catalog, &request).unwrap();

    assert_eq!(result.link, "https://donasi.example/zakat?affiliate_code=ali99");
    assert!(result
        .narrative
        .starts_with("Ini link Anda: https://donasi.example/zakat?affiliate_code=ali99\n\nRekening:\n"));
    assert!(result.narrative.ends_with("📞 Konfirmasi: 0812xxxxxxx"));
}

#[test]
fn scenario_missing_affiliate_param() {
    let catalog = Arc::new(sample_catalog());
    let mut session = Session::new(catalog);
    session.select_program(Some("zakat"));
    session.set_link("https://donasi.example/zakat?foo=bar");

    assert_eq!(session.generate().unwrap_err(), PcgenError::MissingAffiliateCode);
    assert!(session.current().is_none());
}
