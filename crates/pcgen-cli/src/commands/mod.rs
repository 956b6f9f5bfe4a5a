//! CLI command implementations.

pub mod catalog;
pub mod download;
pub mod generate;
pub mod interactive;
pub mod settings;

pub use download::{PosterArgs, QrisArgs};
pub use generate::GenerateArgs;
pub use settings::SettingsArgs;
