//! Download links for poster and QRIS images hosted on Google Drive.

use crate::catalog::Catalog;
use crate::error::{AssetKind, PcgenError, PcgenResult};

/// Prefix of a direct Google Drive download link.
pub const DRIVE_DOWNLOAD_BASE: &str = "https://drive.google.com/uc?export=download&id=";

/// Returns the direct download URL for a Drive file id.
pub fn drive_download_url(id: &str) -> String {
    format!("{DRIVE_DOWNLOAD_BASE}{}", id.trim())
}

/// A resolved download: what it is and where to get it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Asset kind.
    pub kind: AssetKind,
    /// Program name or region.
    pub owner: String,
    /// Direct download URL.
    pub url: String,
}

/// Resolves the poster download for a program key.
pub fn poster_download(catalog: &Catalog, program_key: &str) -> PcgenResult<Download> {
    let program = catalog
        .program(program_key)
        .ok_or_else(|| PcgenError::UnknownProgram {
            key: program_key.to_string(),
        })?;

    let id = program.poster_asset().ok_or_else(|| PcgenError::MissingAsset {
        kind: AssetKind::Poster,
        owner: program.name.clone(),
    })?;

    Ok(Download {
        kind: AssetKind::Poster,
        owner: program.name.clone(),
        url: drive_download_url(id),
    })
}

/// Resolves the QRIS download for a region.
pub fn qris_download(catalog: &Catalog, region: &str) -> PcgenResult<Download> {
    let entry = catalog.region(region).ok_or_else(|| PcgenError::UnknownRegion {
        region: region.to_string(),
    })?;

    let id = entry.asset().ok_or_else(|| PcgenError::MissingAsset {
        kind: AssetKind::Qris,
        owner: region.to_string(),
    })?;

    Ok(Download {
        kind: AssetKind::Qris,
        owner: region.to_string(),
        url: drive_download_url(id),
    })
}
