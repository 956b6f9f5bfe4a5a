//! Host capabilities for the terminal.

use std::io::Write;
use std::process::{Command, Stdio};

use pcgen_core::app::{App, Capabilities};
use pcgen_core::capability::{
    Clipboard, FallbackClipboard, MemoryClipboard, Notice, NoticeLevel, Notifier, Opener,
    PlatformDetector,
};
use pcgen_core::share::{Platform, UserAgentDetector};
use pcgen_core::{Catalog, PcgenError, PcgenResult};
use tracing::debug;

use crate::cli::{OutputFormat, PlatformArg};
use crate::context::Context;
use crate::output::{print_error, print_info, print_success, print_warning};

/// The app as wired for the terminal.
pub type TerminalApp = App<TerminalClipboard, TerminalOpener, HostPlatform, TerminalNotifier>;

/// Builds a terminal app from a load outcome.
///
/// `one_shot` is true when the process exits right after the action, which
/// decides how the clipboard is written.
pub fn terminal_app(loaded: PcgenResult<Catalog>, ctx: &Context, one_shot: bool) -> TerminalApp {
    let plan = ClipboardPlan::choose(ctx.clipboard, one_shot, SELECTION_OWNED_BY_PROCESS);
    debug!(?plan, "clipboard plan");
    let caps = Capabilities {
        clipboard: TerminalClipboard::from_plan(plan),
        opener: if !ctx.open {
            TerminalOpener::Print(PrintTarget::for_format(ctx.format))
        } else {
            TerminalOpener::System
        },
        platform: HostPlatform::from_arg(ctx.platform),
        notifier: TerminalNotifier { quiet: ctx.quiet },
    };
    App::new(loaded, caps)
}

// =============================================================================
// CLIPBOARD
// =============================================================================

/// Platform clipboard via `arboard`.
///
/// The handle is kept for the lifetime of the value: on X11 the selection is
/// only served while it is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> PcgenResult<()> {
        if self.inner.is_none() {
            let handle = arboard::Clipboard::new().map_err(|e| PcgenError::clipboard(e.to_string()))?;
            self.inner = Some(handle);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(PcgenError::clipboard("clipboard handle unavailable"));
        };
        clipboard
            .set_text(text.to_string())
            .map_err(|e| PcgenError::clipboard(e.to_string()))
    }
}

const NO_ARGS: &[&str] = &[];
const XCLIP_ARGS: &[&str] = &["-selection", "clipboard"];
const XSEL_ARGS: &[&str] = &["--clipboard", "--input"];

/// Clipboard that pipes text into the platform's clipboard command.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandClipboard;

impl CommandClipboard {
    fn candidates() -> Vec<(&'static str, &'static [&'static str])> {
        if cfg!(target_os = "macos") {
            vec![("pbcopy", NO_ARGS)]
        } else if cfg!(windows) {
            vec![("clip", NO_ARGS)]
        } else {
            let mut candidates = Vec::new();
            if std::env::var_os("WAYLAND_DISPLAY").is_some() {
                candidates.push(("wl-copy", NO_ARGS));
            }
            candidates.push(("xclip", XCLIP_ARGS));
            candidates.push(("xsel", XSEL_ARGS));
            candidates
        }
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("{program} exited with {status}")))
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&mut self, text: &str) -> PcgenResult<()> {
        let mut failures = Vec::new();
        for (program, args) in Self::candidates() {
            match pipe_to(program, args, text) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    debug!(program, error = %e, "clipboard command failed");
                    failures.push(format!("{program}: {e}"));
                }
            }
        }
        Err(PcgenError::clipboard(failures.join(", ")))
    }
}

/// On X11 and Wayland the clipboard is served by the process that set it.
const SELECTION_OWNED_BY_PROCESS: bool = cfg!(all(unix, not(target_os = "macos")));

/// Which clipboard writers to use, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardPlan {
    /// Keep text in memory only.
    Disabled,
    /// Clipboard commands only; they keep serving the text after we exit.
    CommandOnly,
    /// Clipboard commands, then `arboard`.
    CommandFirst,
    /// `arboard`, then clipboard commands.
    SystemFirst,
}

impl ClipboardPlan {
    /// Picks the writers for this host and session length.
    ///
    /// When the selection dies with its owner, a one-shot run never relies on
    /// `arboard`: it would report success and lose the text at exit.
    pub fn choose(enabled: bool, one_shot: bool, selection_owned: bool) -> Self {
        match (enabled, selection_owned, one_shot) {
            (false, _, _) => Self::Disabled,
            (true, true, true) => Self::CommandOnly,
            (true, true, false) => Self::CommandFirst,
            (true, false, _) => Self::SystemFirst,
        }
    }
}

/// Clipboard selected at startup.
pub enum TerminalClipboard {
    /// `arboard`, falling back to clipboard commands.
    System(FallbackClipboard<SystemClipboard, CommandClipboard>),
    /// Clipboard commands, falling back to `arboard`.
    CommandFirst(FallbackClipboard<CommandClipboard, SystemClipboard>),
    /// Clipboard commands only.
    Command(CommandClipboard),
    /// Clipboard disabled; text is kept in memory only.
    Disabled(MemoryClipboard),
}

impl TerminalClipboard {
    /// Builds the writers for a plan.
    pub fn from_plan(plan: ClipboardPlan) -> Self {
        match plan {
            ClipboardPlan::Disabled => Self::Disabled(MemoryClipboard::disabled()),
            ClipboardPlan::CommandOnly => Self::Command(CommandClipboard),
            ClipboardPlan::CommandFirst => Self::CommandFirst(FallbackClipboard::new(
                CommandClipboard,
                SystemClipboard::default(),
            )),
            ClipboardPlan::SystemFirst => Self::System(FallbackClipboard::new(
                SystemClipboard::default(),
                CommandClipboard,
            )),
        }
    }
}

impl Clipboard for TerminalClipboard {
    fn write_text(&mut self, text: &str) -> PcgenResult<()> {
        match self {
            Self::System(clipboard) => clipboard.write_text(text),
            Self::CommandFirst(clipboard) => clipboard.write_text(text),
            Self::Command(clipboard) => clipboard.write_text(text),
            Self::Disabled(clipboard) => clipboard.write_text(text),
        }
    }

    fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled(_))
    }
}

// =============================================================================
// OPENER
// =============================================================================

/// Where a printed URL goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintTarget {
    /// Standard output, for human-readable formats.
    Stdout,
    /// Standard error, so JSON and CSV output stays parseable.
    Stderr,
}

impl PrintTarget {
    /// Target for an output format.
    pub fn for_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json | OutputFormat::Csv => Self::Stderr,
            OutputFormat::Table | OutputFormat::Minimal => Self::Stdout,
        }
    }
}

/// URL opener selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalOpener {
    /// Hand the URL to the platform URL handler.
    System,
    /// Print the URL instead of opening it.
    Print(PrintTarget),
}

impl Opener for TerminalOpener {
    fn open(&mut self, url: &str) -> PcgenResult<()> {
        match self {
            Self::Print(PrintTarget::Stdout) => {
                println!("{url}");
                Ok(())
            }
            Self::Print(PrintTarget::Stderr) => {
                eprintln!("{url}");
                Ok(())
            }
            Self::System => {
                let mut command = if cfg!(target_os = "macos") {
                    Command::new("open")
                } else if cfg!(windows) {
                    let mut c = Command::new("rundll32");
                    c.arg("url.dll,FileProtocolHandler");
                    c
                } else {
                    Command::new("xdg-open")
                };
                command
                    .arg(url)
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()
                    .map(|_| ())
                    .map_err(|e| PcgenError::open(url, e.to_string()))
            }
        }
    }
}

// =============================================================================
// PLATFORM
// =============================================================================

/// Platform resolved from the command line, `PCGEN_USER_AGENT` or the build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPlatform(Platform);

impl HostPlatform {
    /// Resolves the platform for an argument.
    pub fn from_arg(arg: PlatformArg) -> Self {
        Self(match arg {
            PlatformArg::Desktop => Platform::Desktop,
            PlatformArg::Mobile => Platform::Mobile,
            PlatformArg::Auto => detect(),
        })
    }
}

fn detect() -> Platform {
    if let Ok(agent) = std::env::var("PCGEN_USER_AGENT") {
        return UserAgentDetector::new(agent).platform();
    }
    if cfg!(any(target_os = "android", target_os = "ios")) {
        Platform::Mobile
    } else {
        Platform::Desktop
    }
}

impl PlatformDetector for HostPlatform {
    fn platform(&self) -> Platform {
        self.0
    }
}

// =============================================================================
// NOTIFIER
// =============================================================================

/// Prints notices to stderr. Quiet mode drops success and info notices.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier {
    /// Suppress non-essential notices.
    pub quiet: bool,
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success if !self.quiet => print_success(&notice.message),
            NoticeLevel::Info if !self.quiet => print_info(&notice.message),
            NoticeLevel::Warning => print_warning(&notice.message),
            NoticeLevel::Error => print_error(&notice.message),
            NoticeLevel::Success | NoticeLevel::Info => {}
        }
    }
}
