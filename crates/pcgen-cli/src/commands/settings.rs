//! Settings command implementation.
//!
//! Manages persistent user preferences stored as TOML.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::{Deserialize, Serialize};

use crate::cli::{GlobalArgs, OutputFormat, PlatformArg};
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_info, print_output, print_success, print_warning, KeyValue};

/// Arguments for the settings command.
#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

/// Settings subcommands.
#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show current settings
    Show,

    /// Get a setting
    Get(GetArgs),

    /// Change a setting
    Set(SetArgs),

    /// List available settings keys
    List,

    /// Reset settings to defaults
    Reset(ResetArgs),

    /// Show settings file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Settings key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Settings key
    pub key: String,

    /// New value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset every key
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset
    pub key: Option<String>,
}

/// Settings keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    /// Data base location
    Data,
    /// Share link platform
    Platform,
    /// Default output format
    Format,
    /// Copy to the system clipboard
    Clipboard,
    /// Open URLs in the browser
    Open,
}

impl SettingKey {
    fn from_str(s: &str) -> CliResult<Self> {
        match s.to_lowercase().as_str() {
            "data" => Ok(Self::Data),
            "platform" => Ok(Self::Platform),
            "format" => Ok(Self::Format),
            "clipboard" => Ok(Self::Clipboard),
            "open" => Ok(Self::Open),
            _ => Err(CliError::UnknownSetting(s.to_string())),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Platform => "platform",
            Self::Format => "format",
            Self::Clipboard => "clipboard",
            Self::Open => "open",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Data => "Directory or URL containing json/ (overridden by --data)",
            Self::Platform => "Share link platform (auto, desktop, mobile)",
            Self::Format => "Default output format (table, json, csv, minimal)",
            Self::Clipboard => "Copy narratives to the system clipboard (true, false)",
            Self::Open => "Open share and download URLs (true, false)",
        }
    }

    fn default_value(&self) -> &'static str {
        match self {
            Self::Data => DEFAULT_DATA,
            Self::Platform => "auto",
            Self::Format => "table",
            Self::Clipboard | Self::Open => "true",
        }
    }

    fn all() -> &'static [Self] {
        &[Self::Data, Self::Platform, Self::Format, Self::Clipboard, Self::Open]
    }
}

/// Data location used when neither flag nor setting names one.
pub const DEFAULT_DATA: &str = "data";

/// Stored settings. Unset keys fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    clipboard: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    open: Option<bool>,
}

impl Settings {
    /// Loads settings from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Writes settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// The data base location.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// The stored output format.
    pub fn format(&self) -> CliResult<Option<OutputFormat>> {
        self.format
            .as_deref()
            .map(|v| OutputFormat::parse(v).ok_or_else(|| invalid(SettingKey::Format, v)))
            .transpose()
    }

    /// The stored platform.
    pub fn platform(&self) -> CliResult<Option<PlatformArg>> {
        self.platform
            .as_deref()
            .map(|v| PlatformArg::parse(v).ok_or_else(|| invalid(SettingKey::Platform, v)))
            .transpose()
    }

    /// Whether the clipboard is enabled.
    pub fn clipboard(&self) -> bool {
        self.clipboard.unwrap_or(true)
    }

    /// Whether opening URLs is enabled.
    pub fn open(&self) -> bool {
        self.open.unwrap_or(true)
    }

    fn get(&self, key: SettingKey) -> Option<String> {
        match key {
            SettingKey::Data => self.data.clone(),
            SettingKey::Platform => self.platform.clone(),
            SettingKey::Format => self.format.clone(),
            SettingKey::Clipboard => self.clipboard.map(|b| b.to_string()),
            SettingKey::Open => self.open.map(|b| b.to_string()),
        }
    }

    fn value(&self, key: SettingKey) -> String {
        self.get(key).unwrap_or_else(|| key.default_value().to_string())
    }

    fn set(&mut self, key: SettingKey, value: &str) -> CliResult<()> {
        match key {
            SettingKey::Data => {
                if value.trim().is_empty() {
                    return Err(invalid(key, value));
                }
                self.data = Some(value.trim().to_string());
            }
            SettingKey::Platform => {
                let platform = PlatformArg::parse(value).ok_or_else(|| invalid(key, value))?;
                self.platform = Some(platform_name(platform).to_string());
            }
            SettingKey::Format => {
                let format = OutputFormat::parse(value).ok_or_else(|| invalid(key, value))?;
                self.format = Some(format_name(format).to_string());
            }
            SettingKey::Clipboard => self.clipboard = Some(parse_bool(key, value)?),
            SettingKey::Open => self.open = Some(parse_bool(key, value)?),
        }
        Ok(())
    }

    fn remove(&mut self, key: SettingKey) {
        match key {
            SettingKey::Data => self.data = None,
            SettingKey::Platform => self.platform = None,
            SettingKey::Format => self.format = None,
            SettingKey::Clipboard => self.clipboard = None,
            SettingKey::Open => self.open = None,
        }
    }
}

fn invalid(key: SettingKey, value: &str) -> CliError {
    let hint = match key {
        SettingKey::Data => "Use a directory path or URL.",
        SettingKey::Platform => "Use auto, desktop, or mobile.",
        SettingKey::Format => "Use table, json, csv, or minimal.",
        SettingKey::Clipboard | SettingKey::Open => "Use true or false.",
    };
    CliError::InvalidSetting {
        key: key.as_str(),
        value: value.to_string(),
        hint,
    }
}

fn parse_bool(key: SettingKey, value: &str) -> CliResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn format_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Table => "table",
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Minimal => "minimal",
    }
}

fn platform_name(platform: PlatformArg) -> &'static str {
    match platform {
        PlatformArg::Auto => "auto",
        PlatformArg::Desktop => "desktop",
        PlatformArg::Mobile => "mobile",
    }
}

/// Resolves the settings file path.
pub fn settings_path(explicit: Option<&Path>) -> CliResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or(CliError::NoSettingsDir)?;
    Ok(base.join("pcgen").join("settings.toml"))
}

/// Execute the settings command.
pub fn execute(args: SettingsArgs, global: &GlobalArgs) -> Result<()> {
    let path = settings_path(global.settings.as_deref())?;
    let format = global.format.unwrap_or_default();
    match args.command {
        SettingsCommand::Show => execute_show(&path, format),
        SettingsCommand::Get(get_args) => execute_get(&path, get_args, format),
        SettingsCommand::Set(set_args) => execute_set(&path, set_args, global.quiet),
        SettingsCommand::List => execute_list(format),
        SettingsCommand::Reset(reset_args) => execute_reset(&path, reset_args, global.quiet),
        SettingsCommand::Path => execute_path(&path),
    }
}

fn execute_show(path: &Path, format: OutputFormat) -> Result<()> {
    let settings = Settings::load(path)?;
    let rows: Vec<KeyValue> = SettingKey::all()
        .iter()
        .map(|key| KeyValue::new(key.as_str(), settings.value(*key)))
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Current Settings");
            print_output(&rows, format)?;
        }
        OutputFormat::Json => {
            let output: serde_json::Map<String, serde_json::Value> = rows
                .into_iter()
                .map(|kv| (kv.key, serde_json::Value::String(kv.value)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => print_output(&rows, format)?,
        OutputFormat::Minimal => {
            for kv in rows {
                println!("{}={}", kv.key, kv.value);
            }
        }
    }

    Ok(())
}

fn execute_get(path: &Path, args: GetArgs, format: OutputFormat) -> Result<()> {
    let key = SettingKey::from_str(&args.key)?;
    let value = Settings::load(path)?.value(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => println!("{}: {}", key.as_str(), value),
        OutputFormat::Json => {
            let output = serde_json::json!({ "key": key.as_str(), "value": value });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => println!("{value}"),
    }

    Ok(())
}

fn execute_set(path: &Path, args: SetArgs, quiet: bool) -> Result<()> {
    let key = SettingKey::from_str(&args.key)?;
    let mut settings = Settings::load(path)?;
    settings.set(key, &args.value)?;
    settings.save(path)?;

    if !quiet {
        print_success(&format!("Set {} = {}", key.as_str(), settings.value(key)));
    }
    Ok(())
}

fn execute_list(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<KeyValue> = SettingKey::all()
                .iter()
                .map(|key| {
                    KeyValue::new(
                        key.as_str(),
                        format!("{} (default: {})", key.description(), key.default_value()),
                    )
                })
                .collect();
            if format == OutputFormat::Table {
                print_header("Available Settings");
            }
            print_output(&rows, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = SettingKey::all()
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            for key in SettingKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

fn execute_reset(path: &Path, args: ResetArgs, quiet: bool) -> Result<()> {
    if args.all {
        Settings::default().save(path)?;
        if !quiet {
            print_success("Reset all settings to defaults");
        }
    } else if let Some(raw) = args.key {
        let key = SettingKey::from_str(&raw)?;
        let mut settings = Settings::load(path)?;
        settings.remove(key);
        settings.save(path)?;
        if !quiet {
            print_success(&format!("Reset {} to default ({})", key.as_str(), key.default_value()));
        }
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

fn execute_path(path: &Path) -> Result<()> {
    println!("{}", path.display());
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}
