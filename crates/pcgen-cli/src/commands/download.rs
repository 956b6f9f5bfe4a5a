//! Poster and QRIS download commands.

use anyhow::Result;
use clap::Args;
use pcgen_core::assets::Download;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::context::Context;
use crate::error::CliError;
use crate::output::print_record;

/// Arguments for the poster command.
#[derive(Args, Debug)]
pub struct PosterArgs {
    /// Program key
    #[arg(short, long)]
    pub program: String,
}

/// Arguments for the qris command.
#[derive(Args, Debug)]
pub struct QrisArgs {
    /// Region name as listed by `pcgen regions`
    pub region: String,
}

/// A resolved download, for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct DownloadRow {
    #[tabled(rename = "URL")]
    pub url: String,
    #[tabled(rename = "Asset")]
    pub kind: String,
    #[tabled(rename = "For")]
    pub owner: String,
}

impl From<&Download> for DownloadRow {
    fn from(download: &Download) -> Self {
        Self {
            url: download.url.clone(),
            kind: download.kind.to_string(),
            owner: download.owner.clone(),
        }
    }
}

/// Prints a download record for machine-readable formats.
///
/// Table and minimal output rely on the opener: it either launches the URL or
/// prints it.
pub fn print_download(download: &Download, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json | OutputFormat::Csv => print_record(&DownloadRow::from(download), format),
        OutputFormat::Table | OutputFormat::Minimal => Ok(()),
    }
}

/// Execute the poster command.
pub async fn execute_poster(args: PosterArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = Context::resolve(global)?;
    let mut app = ctx.app().await;
    if !app.is_ready() {
        return Err(CliError::Reported.into());
    }

    app.session_mut()?.select_program(Some(args.program.as_str()));
    let download = app.download_poster().map_err(|_| CliError::Reported)?;
    print_download(&download, ctx.format)
}

/// Execute the qris command.
pub async fn execute_qris(args: QrisArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = Context::resolve(global)?;
    let mut app = ctx.app().await;
    if !app.is_ready() {
        return Err(CliError::Reported.into());
    }

    let download = app.download_qris(&args.region).map_err(|_| CliError::Reported)?;
    print_download(&download, ctx.format)
}
