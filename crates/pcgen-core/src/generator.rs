//! Link and narrative generation.
//!
//! [`generate`] is a pure function of the catalog and a [`GenerationRequest`].
//! It performs no I/O; side effects live behind the capability traits.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{PcgenError, PcgenResult};
use crate::link::LinkInput;
use crate::narrative;

/// Everything a user supplies for one generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Selected program key.
    pub program: Option<String>,
    /// Affiliate code or full link.
    pub input: LinkInput,
    /// Confirmation contact override.
    pub confirmation: Option<String>,
}

impl GenerationRequest {
    /// Creates a request for `program` with the given input.
    pub fn new(program: impl Into<String>, input: LinkInput) -> Self {
        Self {
            program: Some(program.into()),
            input,
            confirmation: None,
        }
    }

    /// Sets the confirmation contact override.
    pub fn with_confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.confirmation = Some(confirmation.into());
        self
    }
}

/// The product of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    /// Program key the result was generated for.
    pub program: String,
    /// Final affiliate link.
    pub link: String,
    /// Final narrative text.
    pub narrative: String,
}

/// Generates the link and narrative for a request.
///
/// Checks run in order: program selected, program known, link input.
pub fn generate(catalog: &Catalog, request: &GenerationRequest) -> PcgenResult<Generation> {
    let key = request
        .program
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(PcgenError::NoProgramSelected)?;

    let program = catalog
        .program(key)
        .ok_or_else(|| PcgenError::UnknownProgram { key: key.to_string() })?;

    let config = catalog.config();
    let link = request.input.resolve(config, program)?;
    let narrative = narrative::compose(config, program, &link, request.confirmation.as_deref());

    log::debug!("generated narrative for program {key} ({} bytes)", narrative.len());

    Ok(Generation {
        program: key.to_string(),
        link,
        narrative,
    })
}
