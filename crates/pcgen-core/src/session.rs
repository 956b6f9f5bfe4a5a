//! Session state.
//!
//! A [`Session`] owns the loaded catalog, the user's form inputs and the
//! validation state. Every input mutation invalidates the held result, so a
//! result is only ever available for the inputs that produced it.

use std::sync::Arc;

use crate::catalog::{Catalog, Program};
use crate::error::PcgenResult;
use crate::generator::{self, Generation, GenerationRequest};
use crate::link::{InputMode, LinkInput};
use crate::validation::ValidationState;

/// Form inputs and generation state for one user.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Arc<Catalog>,
    program: Option<String>,
    input: LinkInput,
    confirmation: String,
    state: ValidationState,
}

impl Session {
    /// Creates a session with empty inputs in code mode.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            program: None,
            input: LinkInput::default(),
            confirmation: String::new(),
            state: ValidationState::Empty,
        }
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Selected program key.
    pub fn selected_key(&self) -> Option<&str> {
        self.program.as_deref()
    }

    /// Selected program, if the key is known.
    pub fn selected_program(&self) -> Option<&Program> {
        self.program.as_deref().and_then(|key| self.catalog.program(key))
    }

    /// Current link input.
    pub fn input(&self) -> &LinkInput {
        &self.input
    }

    /// Active input mode.
    pub fn mode(&self) -> InputMode {
        self.input.mode()
    }

    /// Confirmation override as typed.
    pub fn confirmation(&self) -> &str {
        &self.confirmation
    }

    /// Validation state.
    pub fn state(&self) -> &ValidationState {
        &self.state
    }

    /// The current result, if the last generation succeeded and no input
    /// changed since.
    pub fn current(&self) -> Option<&Generation> {
        self.state.result()
    }

    /// Selects a program, or clears the selection with `None`.
    pub fn select_program(&mut self, key: Option<&str>) {
        self.program = key.map(str::trim).filter(|k| !k.is_empty()).map(str::to_string);
        self.invalidate();
    }

    /// Switches input mode. Switching clears the other mode's text.
    pub fn set_mode(&mut self, mode: InputMode) {
        if self.input.mode() != mode {
            self.input = LinkInput::empty(mode);
        }
        self.invalidate();
    }

    /// Sets the affiliate code, switching to code mode.
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.input = LinkInput::Code(code.into());
        self.invalidate();
    }

    /// Sets the full link, switching to link mode.
    pub fn set_link(&mut self, link: impl Into<String>) {
        self.input = LinkInput::FullLink(link.into());
        self.invalidate();
    }

    /// Sets the confirmation override. Empty means "use the default".
    pub fn set_confirmation(&mut self, confirmation: impl Into<String>) {
        self.confirmation = confirmation.into();
        self.invalidate();
    }

    /// Builds the generation request for the current inputs.
    pub fn request(&self) -> GenerationRequest {
        GenerationRequest {
            program: self.program.clone(),
            input: self.input.clone(),
            confirmation: Some(self.confirmation.clone()).filter(|c| !c.trim().is_empty()),
        }
    }

    /// Runs generation on the current inputs.
    pub fn generate(&mut self) -> PcgenResult<&Generation> {
        self.state.begin();
        let outcome = generator::generate(&self.catalog, &self.request());
        self.state.finish(outcome);

        if let Some(err) = self.state.error() {
            return Err(err.clone());
        }
        self.state.require_result()
    }

    /// Drops the current result without touching inputs.
    pub fn invalidate(&mut self) {
        self.state.reset();
    }

    /// Clears every input and the result.
    pub fn reset(&mut self) {
        self.program = None;
        self.input = LinkInput::default();
        self.confirmation.clear();
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PcgenError;
    use crate::testing::sample_catalog;

    fn session() -> Session {
        Session::new(Arc::new(sample_catalog()))
    }

    fn generated() -> Session {
        let mut s = session();
        s.select_program(Some("zakat"));
        s.set_code("ali99");
        s.generate().unwrap();
        assert!(s.current().is_some());
        s
    }

    #[test]
    fn test_generate_scenario() {
        let s = generated();
        let result = s.current().unwrap();
        assert_eq!(result.link, "https://donasi.example/zakat?affiliate_code=ali99");
        assert!(result.narrative.ends_with("📞 Konfirmasi: 0812xxxxxxx"));
    }

    #[test]
    fn test_every_input_change_invalidates() {
        let mut s = generated();
        s.select_program(Some("sumur"));
        assert!(s.current().is_none());

        let mut s = generated();
        s.set_code("ali100");
        assert!(s.current().is_none());

        let mut s = generated();
        s.set_link("https://x.example/?affiliate_code=1");
        assert!(s.current().is_none());

        let mut s = generated();
        s.set_confirmation("0857");
        assert!(s.current().is_none());

        let mut s = generated();
        s.set_mode(InputMode::Link);
        assert!(s.current().is_none());
    }

    #[test]
    fn test_mode_switch_clears_other_input() {
        let mut s = session();
        s.set_code("ali99");
        s.set_mode(InputMode::Link);
        assert_eq!(s.input(), &LinkInput::FullLink(String::new()));
        s.set_link("https://x.example/?affiliate_code=1");
        s.set_mode(InputMode::Code);
        assert_eq!(s.input(), &LinkInput::Code(String::new()));
    }

    #[test]
    fn test_same_mode_keeps_text() {
        let mut s = session();
        s.set_code("ali99");
        s.set_mode(InputMode::Code);
        assert_eq!(s.input().text(), "ali99");
    }

    #[test]
    fn test_failed_generation() {
        let mut s = session();
        s.set_code("ali99");
        assert_eq!(s.generate().unwrap_err(), PcgenError::NoProgramSelected);
        assert_eq!(s.state().label(), "invalid");

        s.select_program(Some("zakat"));
        s.set_link("https://donasi.example/zakat?foo=bar");
        assert_eq!(s.generate().unwrap_err(), PcgenError::MissingAffiliateCode);
        assert!(s.current().is_none());
    }

    #[test]
    fn test_confirmation_override() {
        let mut s = generated();
        s.set_confirmation("  0857  ");
        let narrative = s.generate().unwrap().narrative.clone();
        assert!(narrative.ends_with("📞 Konfirmasi: 0857"));

        s.set_confirmation("   ");
        assert_eq!(s.request().confirmation, None);
    }

    #[test]
    fn test_reset() {
        let mut s = generated();
        s.set_confirmation("0857");
        s.reset();
        assert_eq!(s.selected_key(), None);
        assert_eq!(s.input(), &LinkInput::default());
        assert_eq!(s.confirmation(), "");
        assert!(s.current().is_none());
    }

    #[test]
    fn test_idempotent_generation() {
        let mut s = generated();
        let first = s.current().cloned().unwrap();
        let second = s.generate().unwrap().clone();
        assert_eq!(first, second);
    }
}
