//! Validation state machine.
//!
//! ```text
//! Empty ──generate──▶ Validating ──▶ Valid(result)
//!   ▲                            └──▶ Invalid(error)
//!   └──────────── any input change ───────────┘
//! ```

use crate::error::{PcgenError, PcgenResult};
use crate::generator::Generation;

/// Where the generate action currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationState {
    /// Nothing generated since the last input change.
    #[default]
    Empty,
    /// Generation in progress.
    Validating,
    /// Last generation succeeded; the result is available.
    Valid(Generation),
    /// Last generation failed.
    Invalid(PcgenError),
}

impl ValidationState {
    /// Enters `Validating`. Any previous result is dropped.
    pub fn begin(&mut self) {
        *self = Self::Validating;
    }

    /// Leaves `Validating` with the outcome of a generation.
    pub fn finish(&mut self, outcome: PcgenResult<Generation>) {
        debug_assert!(matches!(self, Self::Validating), "finish() without begin()");
        *self = match outcome {
            Ok(generation) => Self::Valid(generation),
            Err(err) => Self::Invalid(err),
        };
    }

    /// Returns to `Empty`.
    pub fn reset(&mut self) {
        *self = Self::Empty;
    }

    /// The available result, if the last generation succeeded.
    pub fn result(&self) -> Option<&Generation> {
        match self {
            Self::Valid(generation) => Some(generation),
            _ => None,
        }
    }

    /// The last error, if the last generation failed.
    pub fn error(&self) -> Option<&PcgenError> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }

    /// The available result, or [`PcgenError::NotGenerated`].
    pub fn require_result(&self) -> PcgenResult<&Generation> {
        self.result().ok_or(PcgenError::NotGenerated)
    }

    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Validating => "validating",
            Self::Valid(_) => "valid",
            Self::Invalid(_) => "invalid",
        }
    }
}
