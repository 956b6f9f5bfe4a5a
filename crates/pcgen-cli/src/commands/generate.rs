//! Generate command implementation.
//!
//! Builds the affiliate link and narrative, copies the narrative, and
//! optionally opens the WhatsApp share link.

use anyhow::Result;
use clap::Args;
use pcgen_core::session::Session;
use pcgen_core::{Generation, PcgenError};

use crate::cli::{GlobalArgs, OutputFormat};
use crate::context::Context;
use crate::error::CliError;
use crate::output::{print_header, print_output, print_record, KeyValue};
use crate::system::TerminalApp;

/// Arguments for the generate command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Program key (see `pcgen programs`)
    #[arg(short, long)]
    pub program: String,

    #[command(flatten)]
    pub input: InputArgs,

    /// Confirmation contact (defaults to the site's konfirmasiDefault)
    #[arg(short, long)]
    pub konfirmasi: Option<String>,

    /// Open the WhatsApp share link after generating
    #[arg(long)]
    pub share: bool,
}

/// Exactly one of code or link.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Affiliate code appended to the program URL
    #[arg(short, long)]
    pub code: Option<String>,

    /// Complete link that already carries affiliate_code
    #[arg(short, long)]
    pub link: Option<String>,
}

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = Context::resolve(global)?;
    let mut app = ctx.app().await;
    if !app.is_ready() {
        return Err(CliError::Reported.into());
    }

    fill_form(&mut app, &args)?;
    let generation = match app.generate() {
        Ok(generation) => generation,
        Err(PcgenError::Clipboard { .. }) => {
            // Generation succeeded; only the copy failed.
            if let Some(held) = app.session().and_then(Session::current) {
                print_generation(held, ctx.format)?;
            }
            return Err(CliError::Reported.into());
        }
        Err(_) => return Err(CliError::Reported.into()),
    };
    if args.share {
        app.share().map_err(|_| CliError::Reported)?;
    }

    print_generation(&generation, ctx.format)
}

fn fill_form(app: &mut TerminalApp, args: &GenerateArgs) -> Result<()> {
    let session = app.session_mut()?;
    session.select_program(Some(args.program.as_str()));
    match (&args.input.code, &args.input.link) {
        (Some(code), _) => session.set_code(code.as_str()),
        (None, Some(link)) => session.set_link(link.as_str()),
        (None, None) => {}
    }
    if let Some(konfirmasi) = &args.konfirmasi {
        session.set_confirmation(konfirmasi.as_str());
    }
    Ok(())
}

/// Prints a generation in the requested format.
pub fn print_generation(generation: &Generation, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let rows = vec![
                KeyValue::new("Program", &generation.program),
                KeyValue::new("Link", &generation.link),
            ];
            print_output(&rows, format)?;
            print_header("Narrative");
            println!("{}", generation.narrative);
        }
        OutputFormat::Json | OutputFormat::Csv => print_record(generation, format)?,
        OutputFormat::Minimal => println!("{}", generation.narrative),
    }
    Ok(())
}
