//! Interactive session.
//!
//! A line-oriented front end over one [`TerminalApp`]: each line either edits
//! the form or triggers an action.

use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use pcgen_core::link::InputMode;
use pcgen_core::session::Session;
use pcgen_core::PcgenError;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::commands::catalog::{show_programs, show_regions};
use crate::commands::generate::print_generation;
use crate::context::Context;
use crate::output::{print_error, print_header, print_output, print_warning, KeyValue};
use crate::system::TerminalApp;

const HELP: &[(&str, &str)] = &[
    ("program [KEY]", "select a program, or clear the selection"),
    ("mode code|link", "switch input mode"),
    ("code TEXT", "set the affiliate code"),
    ("link URL", "set the full affiliate link"),
    ("konfirmasi [TEXT]", "set the confirmation contact, or use the default"),
    ("generate", "generate and copy the narrative"),
    ("copy", "copy the narrative again"),
    ("share", "open the WhatsApp share link"),
    ("poster", "open the poster download for the selected program"),
    ("qris REGION", "open the QRIS download for a region"),
    ("programs", "list programs"),
    ("regions", "list QRIS regions"),
    ("show", "show the current form and result"),
    ("reset", "clear the form"),
    ("reload", "load the data again"),
    ("help", "show this help"),
    ("quit", "leave"),
];

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Program(Option<String>),
    Mode(InputMode),
    Code(String),
    Link(String),
    Konfirmasi(String),
    Generate,
    Copy,
    Share,
    Poster,
    Qris(String),
    Programs,
    Regions,
    Show,
    Reset,
    Reload,
    Help,
    Quit,
}

impl Line {
    /// Parses a line; `Ok(None)` for blank lines.
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let parsed = match word.to_lowercase().as_str() {
            "program" => Self::Program(Some(rest.to_string()).filter(|r| !r.is_empty())),
            "mode" => Self::Mode(
                InputMode::parse(rest).ok_or_else(|| format!("Unknown mode: {rest:?}. Use code or link."))?,
            ),
            "code" => Self::Code(rest.to_string()),
            "link" => Self::Link(rest.to_string()),
            "konfirmasi" => Self::Konfirmasi(rest.to_string()),
            "generate" => Self::Generate,
            "copy" => Self::Copy,
            "share" => Self::Share,
            "poster" => Self::Poster,
            "qris" if rest.is_empty() => return Err("Usage: qris REGION".to_string()),
            "qris" => Self::Qris(rest.to_string()),
            "programs" => Self::Programs,
            "regions" => Self::Regions,
            "show" => Self::Show,
            "reset" => Self::Reset,
            "reload" => Self::Reload,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("Unknown command: {other}. Type `help`.")),
        };
        Ok(Some(parsed))
    }
}

/// Execute the interactive command.
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = Context::resolve(global)?;
    let mut app = ctx.session_app().await;
    let prompt = io::stdin().is_terminal();

    let mut buffer = String::new();
    loop {
        if prompt {
            print!("pcgen> ");
            io::stdout().flush()?;
        }
        buffer.clear();
        if io::stdin().read_line(&mut buffer)? == 0 {
            break;
        }

        let line = match Line::parse(&buffer) {
            Ok(Some(line)) => line,
            Ok(None) => continue,
            Err(message) => {
                print_warning(&message);
                continue;
            }
        };

        match line {
            Line::Quit => break,
            Line::Reload => {
                let loaded = ctx.load().await;
                app.reload(loaded);
            }
            line => run(&mut app, line, ctx.format)?,
        }
    }

    Ok(())
}

/// Applies one line to the app. Action failures are already reported as
/// notices; only output errors propagate.
fn run(app: &mut TerminalApp, line: Line, format: OutputFormat) -> Result<()> {
    match line {
        Line::Program(key) => edit(app, |s| s.select_program(key.as_deref())),
        Line::Mode(mode) => edit(app, |s| s.set_mode(mode)),
        Line::Code(code) => edit(app, |s| s.set_code(code)),
        Line::Link(link) => edit(app, |s| s.set_link(link)),
        Line::Konfirmasi(contact) => edit(app, |s| s.set_confirmation(contact)),
        Line::Reset => edit(app, |s| s.reset()),
        Line::Generate => {
            if let Ok(generation) = app.generate() {
                print_generation(&generation, format)?;
            }
        }
        Line::Copy => {
            let _ = app.copy();
        }
        Line::Share => {
            let _ = app.share();
        }
        Line::Poster => {
            let _ = app.download_poster();
        }
        Line::Qris(region) => {
            let _ = app.download_qris(&region);
        }
        Line::Programs => match app.session() {
            Some(session) => show_programs(session.catalog(), format)?,
            None => not_loaded(),
        },
        Line::Regions => match app.session() {
            Some(session) => show_regions(session.catalog(), format)?,
            None => not_loaded(),
        },
        Line::Show => show(app, format)?,
        Line::Help => {
            let rows: Vec<KeyValue> = HELP.iter().map(|(c, d)| KeyValue::new(*c, *d)).collect();
            print_output(&rows, OutputFormat::Table)?;
        }
        Line::Reload | Line::Quit => {}
    }
    Ok(())
}

fn edit(app: &mut TerminalApp, change: impl FnOnce(&mut Session)) {
    match app.session_mut() {
        Ok(session) => change(session),
        Err(_) => not_loaded(),
    }
}

fn not_loaded() {
    print_error(&PcgenError::NotLoaded.to_string());
}

fn show(app: &TerminalApp, format: OutputFormat) -> Result<()> {
    let Some(session) = app.session() else {
        not_loaded();
        return Ok(());
    };

    let program = match session.selected_program() {
        Some(p) => p.name.clone(),
        None => session.selected_key().unwrap_or("-").to_string(),
    };
    let konfirmasi = if session.confirmation().trim().is_empty() {
        format!("{} (default)", session.catalog().config().default_confirmation)
    } else {
        session.confirmation().to_string()
    };
    let rows = vec![
        KeyValue::new("Program", program),
        KeyValue::new("Mode", session.mode().as_str()),
        KeyValue::new("Input", session.input().text()),
        KeyValue::new("Konfirmasi", konfirmasi),
        KeyValue::new("State", session.state().label()),
    ];
    if format == OutputFormat::Table {
        print_header("Session");
    }
    print_output(&rows, format)?;

    if let Some(generation) = session.current() {
        print_generation(generation, format)?;
    }
    Ok(())
}
