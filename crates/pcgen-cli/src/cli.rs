//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::{GenerateArgs, PosterArgs, QrisArgs, SettingsArgs};

/// PCGen - affiliate link and donation narrative generator
#[derive(Parser, Debug)]
#[command(name = "pcgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Output format (defaults to the `format` setting, then table)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base location of the data: a directory or URL containing json/
    #[arg(long, env = "PCGEN_DATA", global = true)]
    pub data: Option<String>,

    /// Location of the site config document (overrides --data)
    #[arg(long, global = true)]
    pub config_doc: Option<String>,

    /// Location of the program catalog document (overrides --data)
    #[arg(long, global = true)]
    pub programs_doc: Option<String>,

    /// Location of the QRIS catalog document (overrides --data)
    #[arg(long, global = true)]
    pub qris_doc: Option<String>,

    /// Do not touch the system clipboard
    #[arg(long, global = true)]
    pub no_clipboard: bool,

    /// Print URLs instead of opening them
    #[arg(long, global = true)]
    pub no_open: bool,

    /// Deep-link flavour for sharing
    #[arg(long, value_enum, global = true)]
    pub platform: Option<PlatformArg>,

    /// Settings file (defaults to <config dir>/pcgen/settings.toml)
    #[arg(long, env = "PCGEN_SETTINGS", global = true)]
    pub settings: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List donation programs
    Programs,

    /// List QRIS regions
    Regions,

    /// Generate the affiliate link and narrative, and copy it
    Generate(GenerateArgs),

    /// Open the poster download for a program
    Poster(PosterArgs),

    /// Open the QRIS download for a region
    Qris(QrisArgs),

    /// Start an interactive session
    Interactive,

    /// Manage settings
    Settings(SettingsArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

impl OutputFormat {
    /// Parses a format name.
    pub fn parse(s: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(s, true).ok()
    }
}

/// Platform selection for share links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlatformArg {
    /// Detect from PCGEN_USER_AGENT or the build target
    #[default]
    Auto,
    /// WhatsApp Web link
    Desktop,
    /// WhatsApp app link
    Mobile,
}

impl PlatformArg {
    /// Parses a platform name.
    pub fn parse(s: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(s, true).ok()
    }
}
