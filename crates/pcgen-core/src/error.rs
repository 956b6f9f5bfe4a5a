//! Error types for PCGen.
//!
//! Every failure the generator can report to a user is a variant of
//! [`PcgenError`]. Each variant belongs to one [`ErrorCategory`], which
//! decides how a front end presents it and whether the session stays usable.

use thiserror::Error;

/// A specialized Result type for PCGen operations.
pub type PcgenResult<T> = Result<T, PcgenError>;

/// Broad classes of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Startup data could not be loaded. Fatal until the data is reloaded.
    Load,
    /// Missing or malformed user input. Recoverable.
    Validation,
    /// A download was requested for a record without an asset id. Recoverable.
    MissingAsset,
    /// The host environment refused a side effect (clipboard, opener).
    Capability,
}

/// The main error type for PCGen operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PcgenError {
    /// The catalog could not be loaded.
    #[error("Failed to load data: {message}")]
    Load {
        /// Description of the load failure.
        message: String,
    },

    /// The session has no catalog because loading failed.
    #[error("Data is not loaded; reload to try again")]
    NotLoaded,

    /// No program was selected before generating.
    #[error("Select a donation program first")]
    NoProgramSelected,

    /// The selected program key is not in the catalog.
    #[error("Unknown program: {key}")]
    UnknownProgram {
        /// The key that was not found.
        key: String,
    },

    /// Code mode with an empty affiliate code.
    #[error("Enter an affiliate code first")]
    EmptyCode,

    /// Link mode with an empty link.
    #[error("Enter the full affiliate link first")]
    EmptyLink,

    /// Link mode with a string that is not an absolute URL.
    #[error("Invalid link format: {reason}. Use a complete URL")]
    MalformedLink {
        /// Parser diagnostic.
        reason: String,
    },

    /// Link mode with a URL lacking the affiliate parameter.
    #[error("Link is missing the affiliate_code parameter")]
    MissingAffiliateCode,

    /// Copy or share requested without a current result.
    #[error("Generate the narrative first")]
    NotGenerated,

    /// The requested region is not in the QRIS catalog.
    #[error("QRIS data not found for region: {region}")]
    UnknownRegion {
        /// The region that was not found.
        region: String,
    },

    /// The record has no downloadable asset.
    #[error("{kind} for {owner} is not available yet")]
    MissingAsset {
        /// What kind of asset was requested.
        kind: AssetKind,
        /// Program name or region the asset belongs to.
        owner: String,
    },

    /// Clipboard write failed on every available mechanism.
    #[error("Clipboard unavailable: {reason}")]
    Clipboard {
        /// Description of the failure.
        reason: String,
    },

    /// The external URL could not be opened.
    #[error("Could not open {url}: {reason}")]
    Open {
        /// The URL that was being opened.
        url: String,
        /// Description of the failure.
        reason: String,
    },
}

/// Downloadable asset kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Program poster image.
    Poster,
    /// Regional QRIS payment image.
    Qris,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Poster => write!(f, "Poster"),
            Self::Qris => write!(f, "QRIS"),
        }
    }
}

impl PcgenError {
    /// Creates a load error.
    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    /// Creates a malformed link error.
    pub fn malformed_link(reason: impl Into<String>) -> Self {
        Self::MalformedLink {
            reason: reason.into(),
        }
    }

    /// Creates a clipboard error.
    pub fn clipboard(reason: impl Into<String>) -> Self {
        Self::Clipboard {
            reason: reason.into(),
        }
    }

    /// Creates an opener error.
    pub fn open(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Open {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Load { .. } | Self::NotLoaded => ErrorCategory::Load,
            Self::MissingAsset { .. } => ErrorCategory::MissingAsset,
            Self::Clipboard { .. } | Self::Open { .. } => ErrorCategory::Capability,
            Self::NoProgramSelected
            | Self::UnknownProgram { .. }
            | Self::EmptyCode
            | Self::EmptyLink
            | Self::MalformedLink { .. }
            | Self::MissingAffiliateCode
            | Self::NotGenerated
            | Self::UnknownRegion { .. } => ErrorCategory::Validation,
        }
    }

    /// Returns true if the session stays usable after this error.
    pub fn is_recoverable(&self) -> bool {
        self.category() != ErrorCategory::Load
    }
}
