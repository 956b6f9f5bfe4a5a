//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Unknown settings key.
    #[error("Unknown settings key: {0}. Run `pcgen settings list` for valid keys.")]
    UnknownSetting(String),

    /// Invalid settings value.
    #[error("Invalid value for {key}: {value}. {hint}")]
    InvalidSetting {
        /// Settings key.
        key: &'static str,
        /// Rejected value.
        value: String,
        /// What would be accepted.
        hint: &'static str,
    },

    /// No place to store settings.
    #[error("Could not determine settings directory; pass --settings")]
    NoSettingsDir,

    /// The failure was already shown to the user as a notice.
    #[error("action failed")]
    Reported,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(e: toml::ser::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
