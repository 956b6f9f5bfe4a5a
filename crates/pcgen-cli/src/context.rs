//! Runtime context resolved from flags, environment and settings.

use pcgen_core::{Catalog, PcgenError, PcgenResult};
use pcgen_loader::{load_catalog, AutoSource, DataLocations, Document, FileSource, HttpSource};
use tracing::debug;

use crate::cli::{GlobalArgs, OutputFormat, PlatformArg};
use crate::commands::settings::{settings_path, Settings, DEFAULT_DATA};
use crate::error::CliResult;
use crate::system::{terminal_app, TerminalApp};

/// Everything a catalog-backed command needs.
#[derive(Debug, Clone)]
pub struct Context {
    pub format: OutputFormat,
    pub quiet: bool,
    pub clipboard: bool,
    pub open: bool,
    pub platform: PlatformArg,
    pub locations: DataLocations,
}

impl Context {
    /// Flags win over settings, settings over defaults.
    pub fn resolve(global: &GlobalArgs) -> CliResult<Self> {
        let settings = match settings_path(global.settings.as_deref()) {
            Ok(path) => Settings::load(&path)?,
            Err(_) => Settings::default(),
        };

        let format = match global.format {
            Some(format) => format,
            None => settings.format()?.unwrap_or_default(),
        };
        let platform = match global.platform {
            Some(platform) => platform,
            None => settings.platform()?.unwrap_or_default(),
        };

        let base = global
            .data
            .as_deref()
            .or(settings.data())
            .unwrap_or(DEFAULT_DATA);
        let mut locations = DataLocations::from_base(base);
        for (document, location) in [
            (Document::Config, &global.config_doc),
            (Document::Programs, &global.programs_doc),
            (Document::Qris, &global.qris_doc),
        ] {
            if let Some(location) = location {
                locations = locations.with(document, location.clone());
            }
        }
        debug!(?locations, ?format, ?platform, "context resolved");

        Ok(Self {
            format,
            quiet: global.quiet,
            clipboard: !global.no_clipboard && settings.clipboard(),
            open: !global.no_open && settings.open(),
            platform,
            locations,
        })
    }

    /// Loads the catalog from the configured locations.
    pub async fn load(&self) -> PcgenResult<Catalog> {
        let source = AutoSource::new(FileSource::new(), HttpSource::new());
        load_catalog(&source, &self.locations)
            .await
            .map_err(PcgenError::from)
    }

    /// Loads the catalog and wires it into an app for a single action.
    pub async fn app(&self) -> TerminalApp {
        terminal_app(self.load().await, self, true)
    }

    /// Loads the catalog and wires it into an app for a long-lived session.
    pub async fn session_app(&self) -> TerminalApp {
        terminal_app(self.load().await, self, false)
    }
}
