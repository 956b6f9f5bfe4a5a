//! Catalog listing commands.

use anyhow::Result;
use pcgen_core::Catalog;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::context::Context;
use crate::output::{print_header, print_output};

/// One program, for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ProgramRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(rename = "Poster")]
    pub poster: bool,
}

/// One QRIS region, for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RegionRow {
    #[tabled(rename = "Region")]
    pub region: String,
    #[tabled(rename = "QRIS")]
    pub qris: bool,
}

/// Programs in document order.
pub fn program_rows(catalog: &Catalog) -> Vec<ProgramRow> {
    catalog
        .programs()
        .map(|(key, program)| ProgramRow {
            key: key.to_string(),
            name: program.name.clone(),
            path: program.path.clone(),
            poster: program.poster_asset().is_some(),
        })
        .collect()
}

/// Regions in document order.
pub fn region_rows(catalog: &Catalog) -> Vec<RegionRow> {
    catalog
        .regions()
        .map(|(region, entry)| RegionRow {
            region: region.to_string(),
            qris: entry.asset().is_some(),
        })
        .collect()
}

/// Prints the program list.
pub fn show_programs(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Table {
        print_header("Programs");
    }
    print_output(&program_rows(catalog), format)
}

/// Prints the region list.
pub fn show_regions(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Table {
        print_header("QRIS Regions");
    }
    print_output(&region_rows(catalog), format)
}

/// Execute the programs command.
pub async fn execute_programs(global: &GlobalArgs) -> Result<()> {
    let ctx = Context::resolve(global)?;
    let catalog = ctx.load().await?;
    show_programs(&catalog, ctx.format)
}

/// Execute the regions command.
pub async fn execute_regions(global: &GlobalArgs) -> Result<()> {
    let ctx = Context::resolve(global)?;
    let catalog = ctx.load().await?;
    show_regions(&catalog, ctx.format)
}
