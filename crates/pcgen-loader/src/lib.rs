//! # PCGen Loader
//!
//! Loads the three startup documents (site config, program catalog, QRIS
//! catalog) concurrently and assembles them into a [`Catalog`].
//!
//! Loading is all-or-nothing: the first failure aborts the whole load and no
//! partial catalog is ever returned. There is no retry; callers reload.
//!
//! Sources:
//! - [`FileSource`] for local paths and `file://` URLs
//! - [`HttpSource`] for `http://` and `https://` URLs
//! - [`AutoSource`] to pick per location

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod locations;
mod source;

pub use error::{FetchError, LoaderError, LoaderResult};
pub use locations::{DataLocations, Document};
pub use source::{is_http, AutoSource, DocumentSource, FileSource, HttpSource};

use pcgen_core::catalog::{Catalog, ProgramTable, QrisTable, SiteConfig, Validate};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Loads all three documents concurrently and builds the catalog.
pub async fn load_catalog<S>(source: &S, locations: &DataLocations) -> LoaderResult<Catalog>
where
    S: DocumentSource + ?Sized,
{
    let (config, programs, qris) = tokio::try_join!(
        load_document::<SiteConfig, S>(source, Document::Config, &locations.config),
        load_document::<ProgramTable, S>(source, Document::Programs, &locations.programs),
        load_document::<QrisTable, S>(source, Document::Qris, &locations.qris),
    )?;

    let catalog = Catalog::new(config, programs, qris);
    for issue in catalog.validate() {
        warn!(%issue, "catalog issue");
    }
    info!(
        programs = catalog.program_count(),
        regions = catalog.region_count(),
        "catalog loaded"
    );

    Ok(catalog)
}

async fn load_document<T, S>(source: &S, document: Document, location: &str) -> LoaderResult<T>
where
    T: DeserializeOwned,
    S: DocumentSource + ?Sized,
{
    let body = source
        .fetch(location)
        .await
        .map_err(|source| LoaderError::Fetch {
            document,
            location: location.to_string(),
            source,
        })?;
    debug!(%document, location, bytes = body.len(), "document fetched");

    serde_json::from_str(&body).map_err(|e| LoaderError::Parse {
        document,
        location: location.to_string(),
        message: e.to_string(),
    })
}
