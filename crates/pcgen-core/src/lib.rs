//! # PCGen Core
//!
//! Data model and generation rules for the PCGen affiliate link and narrative
//! generator.
//!
//! - **Catalog**: site config, donation programs and QRIS regions, as loaded
//!   from the three startup documents
//! - **Generation**: affiliate link building and narrative templating as pure
//!   functions
//! - **Session**: form inputs and the validation state machine, with explicit
//!   invalidation on every input change
//! - **Capabilities**: traits for clipboard, URL opening, platform detection
//!   and notices, so front ends own every side effect
//!
//! ## Example
//!
//! ```rust
//! use pcgen_core::prelude::*;
//! use pcgen_core::testing::sample_catalog;
//!
//! let catalog = sample_catalog();
//! let request = GenerationRequest::new("zakat", LinkInput::Code("ali99".into()));
//! let result = generate(&catalog, &request).unwrap();
//!
//! assert_eq!(result.link, "https://donasi.example/zakat?affiliate_code=ali99");
//! assert!(result.narrative.ends_with("📞 Konfirmasi: 0812xxxxxxx"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod app;
pub mod assets;
pub mod capability;
pub mod catalog;
pub mod error;
pub mod generator;
pub mod link;
pub mod narrative;
pub mod session;
pub mod share;
pub mod testing;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::app::{App, Capabilities};
    pub use crate::assets::{poster_download, qris_download, Download};
    pub use crate::capability::{Clipboard, Notice, NoticeLevel, Notifier, Opener, PlatformDetector};
    pub use crate::catalog::{Catalog, Program, QrisEntry, SiteConfig, Validate};
    pub use crate::error::{AssetKind, ErrorCategory, PcgenError, PcgenResult};
    pub use crate::generator::{generate, Generation, GenerationRequest};
    pub use crate::link::{InputMode, LinkInput};
    pub use crate::session::Session;
    pub use crate::share::{share_url, Platform, UserAgentDetector};
    pub use crate::validation::ValidationState;
}

// Re-export commonly used types at crate root
pub use catalog::Catalog;
pub use error::{PcgenError, PcgenResult};
pub use generator::{generate, Generation, GenerationRequest};
