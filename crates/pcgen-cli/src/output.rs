//! Stdout rendering for listings and records, plus the stderr notice markers.
//!
//! Only data goes to stdout; markers and messages go to stderr so JSON and
//! CSV output can be piped.

use colored::{ColoredString, Colorize};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Renders a list of rows.
pub fn print_output<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table if rows.is_empty() => println!("(none)"),
        OutputFormat::Table => {
            let table = Table::new(rows)
                .with(Style::rounded())
                .with(Modify::new(Columns::first()).with(Alignment::left()))
                .to_string();
            println!("{table}");
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => write_csv(rows)?,
        OutputFormat::Minimal => {
            for row in rows {
                println!("{}", lead_field(row)?);
            }
        }
    }
    Ok(())
}

/// Renders one record for machine-readable formats. Table and minimal
/// callers lay out their own output, so they get the JSON form here.
pub fn print_record<T: Serialize>(record: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => write_csv(std::slice::from_ref(record))?,
        OutputFormat::Json | OutputFormat::Table | OutputFormat::Minimal => {
            println!("{}", serde_json::to_string_pretty(record)?)
        }
    }
    Ok(())
}

fn write_csv<T: Serialize>(rows: &[T]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// First serialized field of a row; field order is declaration order.
fn lead_field<T: Serialize>(row: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(row)?;
    Ok(match value.as_object().and_then(|fields| fields.values().next()) {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => value.to_string(),
    })
}

fn notice(marker: ColoredString, message: &str) {
    eprintln!("{marker} {message}");
}

/// Prints a success message.
pub fn print_success(message: &str) {
    notice("✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    notice("✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    notice("⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    notice("ℹ".blue(), message);
}

/// A labelled value, for settings and session views.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a section title above a table.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
