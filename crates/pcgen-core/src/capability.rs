//! Host capabilities.
//!
//! Generation is pure; everything that touches the host (clipboard, opening
//! URLs, platform detection, user notifications) goes through these traits.
//! Front ends supply real implementations; the in-memory ones here serve
//! tests and headless use.

use crate::error::{PcgenError, PcgenResult};
use crate::share::Platform;

// =============================================================================
// TRAITS
// =============================================================================

/// Writes text to a clipboard.
pub trait Clipboard {
    /// Replaces the clipboard content with `text`.
    fn write_text(&mut self, text: &str) -> PcgenResult<()>;

    /// False when writes only land in memory and the user cannot paste them.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Opens a URL in a new browsing context.
pub trait Opener {
    /// Opens `url`. Must not block on the opened application.
    fn open(&mut self, url: &str) -> PcgenResult<()>;
}

/// Tells which deep-link flavour works on this host.
pub trait PlatformDetector {
    /// Returns the platform class.
    fn platform(&self) -> Platform;
}

/// Shows transient notices to the user.
pub trait Notifier {
    /// Presents one notice.
    fn notify(&mut self, notice: Notice);
}

// =============================================================================
// NOTICES
// =============================================================================

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    /// The action succeeded.
    Success,
    /// Informational.
    Info,
    /// Recoverable refusal.
    Warning,
    /// Fatal for the session.
    Error,
}

/// A user-facing, auto-dismissing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Message text.
    pub message: String,
}

impl Notice {
    /// Creates a success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Creates an info notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Creates a notice describing an error. Load failures are errors,
    /// everything else is a warning.
    pub fn from_error(err: &PcgenError) -> Self {
        let level = if err.is_recoverable() {
            NoticeLevel::Warning
        } else {
            NoticeLevel::Error
        };
        Self {
            level,
            message: err.to_string(),
        }
    }

    /// Returns true for success and info notices.
    pub fn is_ok(&self) -> bool {
        matches!(self.level, NoticeLevel::Success | NoticeLevel::Info)
    }
}

// =============================================================================
// COMBINATORS AND IN-MEMORY IMPLEMENTATIONS
// =============================================================================

/// Tries a primary clipboard and falls back to a secondary one.
///
/// Both paths leave the same text on the clipboard.
#[derive(Debug, Default)]
pub struct FallbackClipboard<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackClipboard<P, F> {
    /// Creates a clipboard that tries `primary` first.
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Clipboard, F: Clipboard> Clipboard for FallbackClipboard<P, F> {
    fn write_text(&mut self, text: &str) -> PcgenResult<()> {
        match self.primary.write_text(text) {
            Ok(()) => Ok(()),
            Err(primary_err) => {
                log::debug!("primary clipboard failed ({primary_err}), using fallback");
                self.fallback.write_text(text).map_err(|fallback_err| {
                    PcgenError::clipboard(format!(
                        "{}; fallback: {}",
                        clipboard_reason(&primary_err),
                        clipboard_reason(&fallback_err)
                    ))
                })
            }
        }
    }

    fn is_enabled(&self) -> bool {
        self.primary.is_enabled() || self.fallback.is_enabled()
    }
}

fn clipboard_reason(err: &PcgenError) -> String {
    match err {
        PcgenError::Clipboard { reason } => reason.clone(),
        other => other.to_string(),
    }
}

/// Clipboard that keeps the last written text in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    content: Option<String>,
    writes: usize,
    disabled: bool,
}

impl MemoryClipboard {
    /// Creates an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clipboard standing in for a disabled one. Writes are kept
    /// but it reports itself as not enabled.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Last text written, if any.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Number of writes performed.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> PcgenResult<()> {
        self.content = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        !self.disabled
    }
}

/// Clipboard that always fails, standing in for a host without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClipboard;

impl Clipboard for UnavailableClipboard {
    fn write_text(&mut self, _text: &str) -> PcgenResult<()> {
        Err(PcgenError::clipboard("no clipboard available"))
    }
}

/// Opener that records URLs instead of opening them.
#[derive(Debug, Clone, Default)]
pub struct RecordingOpener {
    opened: Vec<String>,
}

impl RecordingOpener {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs opened so far, oldest first.
    pub fn opened(&self) -> &[String] {
        &self.opened
    }
}

impl Opener for RecordingOpener {
    fn open(&mut self, url: &str) -> PcgenResult<()> {
        self.opened.push(url.to_string());
        Ok(())
    }
}

/// Detector that always answers the same platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPlatform(pub Platform);

impl PlatformDetector for FixedPlatform {
    fn platform(&self) -> Platform {
        self.0
    }
}

/// Notifier that collects notices.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Most recent notice.
    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
