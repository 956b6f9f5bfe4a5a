//! Application controller.
//!
//! [`App`] ties a [`Session`] to the host capabilities and turns every user
//! action into exactly one [`Notice`]. If startup loading failed, the app is
//! unready: every action is refused until a successful [`App::reload`].

use std::sync::Arc;

use crate::assets::{self, Download};
use crate::capability::{Clipboard, Notice, Notifier, Opener, PlatformDetector};
use crate::catalog::Catalog;
use crate::error::{PcgenError, PcgenResult};
use crate::generator::Generation;
use crate::session::Session;
use crate::share::share_url;

/// Host capabilities used by [`App`].
#[derive(Debug, Clone, Default)]
pub struct Capabilities<C, O, P, N> {
    /// Clipboard writer.
    pub clipboard: C,
    /// URL opener.
    pub opener: O,
    /// Platform detector for deep links.
    pub platform: P,
    /// Notice sink.
    pub notifier: N,
}

#[derive(Debug)]
enum Readiness {
    Ready(Session),
    Unready(PcgenError),
}

/// A session plus the capabilities that carry out its side effects.
#[derive(Debug)]
pub struct App<C, O, P, N> {
    readiness: Readiness,
    caps: Capabilities<C, O, P, N>,
}

impl<C, O, P, N> App<C, O, P, N>
where
    C: Clipboard,
    O: Opener,
    P: PlatformDetector,
    N: Notifier,
{
    /// Creates an app from the outcome of loading the catalog.
    ///
    /// A load failure is reported once and leaves the app unready.
    pub fn new(loaded: PcgenResult<Catalog>, caps: Capabilities<C, O, P, N>) -> Self {
        let mut app = Self {
            readiness: Readiness::Unready(PcgenError::NotLoaded),
            caps,
        };
        app.install(loaded);
        app
    }

    /// Replaces the catalog with a freshly loaded one, discarding all inputs.
    pub fn reload(&mut self, loaded: PcgenResult<Catalog>) -> bool {
        self.install(loaded);
        if self.is_ready() {
            self.caps.notifier.notify(Notice::success("Data reloaded"));
        }
        self.is_ready()
    }

    fn install(&mut self, loaded: PcgenResult<Catalog>) {
        self.readiness = match loaded {
            Ok(catalog) => Readiness::Ready(Session::new(Arc::new(catalog))),
            Err(err) => {
                log::error!("catalog unavailable: {err}");
                self.caps.notifier.notify(Notice::from_error(&err));
                Readiness::Unready(err)
            }
        };
    }

    /// Returns true if the catalog is loaded.
    pub fn is_ready(&self) -> bool {
        matches!(self.readiness, Readiness::Ready(_))
    }

    /// The load error, if unready.
    pub fn load_error(&self) -> Option<&PcgenError> {
        match &self.readiness {
            Readiness::Unready(err) => Some(err),
            Readiness::Ready(_) => None,
        }
    }

    /// The session, if ready.
    pub fn session(&self) -> Option<&Session> {
        match &self.readiness {
            Readiness::Ready(session) => Some(session),
            Readiness::Unready(_) => None,
        }
    }

    /// Mutable access to the session for input changes.
    ///
    /// Input changes produce no notice; they only invalidate the result.
    pub fn session_mut(&mut self) -> PcgenResult<&mut Session> {
        match &mut self.readiness {
            Readiness::Ready(session) => Ok(session),
            Readiness::Unready(_) => Err(PcgenError::NotLoaded),
        }
    }

    /// The capabilities.
    pub fn capabilities(&self) -> &Capabilities<C, O, P, N> {
        &self.caps
    }

    /// Generates from the current inputs and copies the narrative.
    pub fn generate(&mut self) -> PcgenResult<Generation> {
        let outcome = self.try_generate();
        let message = if self.caps.clipboard.is_enabled() {
            "Narrative generated and copied to clipboard"
        } else {
            "Narrative generated (clipboard disabled)"
        };
        self.report(outcome, |_| Notice::success(message))
    }

    fn try_generate(&mut self) -> PcgenResult<Generation> {
        let generation = self.session_mut()?.generate()?.clone();
        self.caps.clipboard.write_text(&generation.narrative)?;
        Ok(generation)
    }

    /// Copies the current narrative again.
    pub fn copy(&mut self) -> PcgenResult<()> {
        let outcome = self.try_copy();
        let notice = if self.caps.clipboard.is_enabled() {
            Notice::success("Narrative copied to clipboard")
        } else {
            Notice::info("Clipboard disabled; narrative not copied")
        };
        self.report(outcome, |_| notice)
    }

    fn try_copy(&mut self) -> PcgenResult<()> {
        let narrative = self.current_narrative()?;
        self.caps.clipboard.write_text(&narrative)
    }

    /// Opens the WhatsApp deep link carrying the current narrative.
    pub fn share(&mut self) -> PcgenResult<String> {
        let outcome = self.try_share();
        self.report(outcome, |_| Notice::info("Opening WhatsApp"))
    }

    fn try_share(&mut self) -> PcgenResult<String> {
        let narrative = self.current_narrative()?;
        let url = share_url(&narrative, self.caps.platform.platform());
        self.caps.opener.open(&url)?;
        Ok(url)
    }

    /// Opens the poster download for the selected program.
    pub fn download_poster(&mut self) -> PcgenResult<Download> {
        let outcome = self.try_download_poster();
        self.report(outcome, |d| Notice::info(format!("Opening poster download for {}", d.owner)))
    }

    fn try_download_poster(&mut self) -> PcgenResult<Download> {
        let session = self.ready_session()?;
        let key = session.selected_key().ok_or(PcgenError::NoProgramSelected)?;
        let download = assets::poster_download(session.catalog(), key)?;
        self.caps.opener.open(&download.url)?;
        Ok(download)
    }

    /// Opens the QRIS download for a region.
    pub fn download_qris(&mut self, region: &str) -> PcgenResult<Download> {
        let outcome = self.try_download_qris(region);
        self.report(outcome, |d| Notice::info(format!("Opening QRIS download for {}", d.owner)))
    }

    fn try_download_qris(&mut self, region: &str) -> PcgenResult<Download> {
        let download = assets::qris_download(self.ready_session()?.catalog(), region)?;
        self.caps.opener.open(&download.url)?;
        Ok(download)
    }

    fn ready_session(&self) -> PcgenResult<&Session> {
        self.session().ok_or(PcgenError::NotLoaded)
    }

    fn current_narrative(&self) -> PcgenResult<String> {
        let session = self.ready_session()?;
        Ok(session.state().require_result()?.narrative.clone())
    }

    fn report<T>(
        &mut self,
        outcome: PcgenResult<T>,
        on_success: impl FnOnce(&T) -> Notice,
    ) -> PcgenResult<T> {
        let notice = match &outcome {
            Ok(value) => on_success(value),
            Err(err) => Notice::from_error(err),
        };
        self.caps.notifier.notify(notice);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{
        FixedPlatform, MemoryClipboard, NoticeLevel, NoticeLog, RecordingOpener,
        UnavailableClipboard,
    };
    use crate::share::Platform;
    use crate::testing::sample_catalog;

    type TestApp = App<MemoryClipboard, RecordingOpener, FixedPlatform, NoticeLog>;

    fn caps(platform: Platform) -> Capabilities<MemoryClipboard, RecordingOpener, FixedPlatform, NoticeLog> {
        Capabilities {
            clipboard: MemoryClipboard::new(),
            opener: RecordingOpener::new(),
            platform: FixedPlatform(platform),
            notifier: NoticeLog::new(),
        }
    }

    fn ready_app() -> TestApp {
        App::new(Ok(sample_catalog()), caps(Platform::Desktop))
    }

    #[test]
    fn test_generate_copies_and_notifies_once() {
        let mut app = ready_app();
        let session = app.session_mut().unwrap();
        session.select_program(Some("zakat"));
        session.set_code("ali99");

        let generation = app.generate().unwrap();
        let caps = app.capabilities();
        assert_eq!(caps.clipboard.content(), Some(generation.narrative.as_str()));
        assert_eq!(caps.notifier.notices().len(), 1);
        assert_eq!(caps.notifier.notices()[0].level, NoticeLevel::Success);
    }

    #[test]
    fn test_disabled_clipboard_notice() {
        let mut app = App::new(
            Ok(sample_catalog()),
            Capabilities {
                clipboard: MemoryClipboard::disabled(),
                ..caps(Platform::Desktop)
            },
        );
        let session = app.session_mut().unwrap();
        session.select_program(Some("zakat"));
        session.set_code("ali99");

        app.generate().unwrap();
        let last = app.capabilities().notifier.last().cloned().unwrap();
        assert_eq!(last.message, "Narrative generated (clipboard disabled)");

        app.copy().unwrap();
        let last = app.capabilities().notifier.last().cloned().unwrap();
        assert_eq!(last.level, NoticeLevel::Info);
        assert!(!last.message.contains("copied to clipboard"));
    }

    #[test]
    fn test_copy_and_share_require_result() {
        let mut app = ready_app();
        assert_eq!(app.copy(), Err(PcgenError::NotGenerated));
        assert_eq!(app.share(), Err(PcgenError::NotGenerated));
        assert!(app.capabilities().opener.opened().is_empty());
        assert_eq!(app.capabilities().notifier.notices().len(), 2);
    }

    #[test]
    fn test_change_after_generate_refuses_copy() {
        let mut app = ready_app();
        let session = app.session_mut().unwrap();
        session.select_program(Some("zakat"));
        session.set_code("ali99");
        app.generate().unwrap();

        app.session_mut().unwrap().set_code("ali100");
        assert_eq!(app.copy(), Err(PcgenError::NotGenerated));
        assert_eq!(app.capabilities().clipboard.writes(), 1);
    }

    #[test]
    fn test_share_desktop_and_mobile() {
        let mut app = ready_app();
        let session = app.session_mut().unwrap();
        session.select_program(Some("zakat"));
        session.set_code("ali99");
        app.generate().unwrap();
        let url = app.share().unwrap();
        assert!(url.starts_with("https://wa.me/?text=Ini%20link%20Anda%3A%20"));

        let mut mobile = App::new(Ok(sample_catalog()), caps(Platform::Mobile));
        let session = mobile.session_mut().unwrap();
        session.select_program(Some("zakat"));
        session.set_code("ali99");
        mobile.generate().unwrap();
        let url = mobile.share().unwrap();
        assert!(url.starts_with("whatsapp://send?text="));
        assert_eq!(mobile.capabilities().opener.opened(), [url]);
    }

    #[test]
    fn test_poster_without_asset_is_refused() {
        let mut app = ready_app();
        app.session_mut().unwrap().select_program(Some("zakat"));
        let err = app.download_poster().unwrap_err();
        assert!(matches!(err, PcgenError::MissingAsset { .. }));
        assert!(app.capabilities().opener.opened().is_empty());
        assert_eq!(
            app.capabilities().notifier.last().map(|n| n.level),
            Some(NoticeLevel::Warning)
        );
    }

    #[test]
    fn test_poster_requires_selection() {
        let mut app = ready_app();
        assert_eq!(app.download_poster(), Err(PcgenError::NoProgramSelected));
    }

    #[test]
    fn test_downloads_open_drive_links() {
        let mut app = ready_app();
        app.session_mut().unwrap().select_program(Some("sumur"));
        app.download_poster().unwrap();
        app.download_qris("Jakarta").unwrap();
        assert_eq!(
            app.capabilities().opener.opened(),
            [
                "https://drive.google.com/uc?export=download&id=poster-sumur-01",
                "https://drive.google.com/uc?export=download&id=qris-jkt-01",
            ]
        );
    }

    #[test]
    fn test_unready_refuses_everything() {
        let mut app: TestApp = App::new(Err(PcgenError::load("boom")), caps(Platform::Desktop));
        assert!(!app.is_ready());
        assert_eq!(app.capabilities().notifier.notices().len(), 1);
        assert_eq!(app.capabilities().notifier.notices()[0].level, NoticeLevel::Error);

        assert_eq!(app.generate(), Err(PcgenError::NotLoaded));
        assert_eq!(app.download_qris("Jakarta"), Err(PcgenError::NotLoaded));
        assert!(app.session_mut().is_err());
        assert_eq!(app.capabilities().notifier.notices().len(), 3);

        assert!(app.reload(Ok(sample_catalog())));
        assert!(app.load_error().is_none());
    }

    #[test]
    fn test_clipboard_failure_keeps_result() {
        let caps = Capabilities {
            clipboard: UnavailableClipboard,
            opener: RecordingOpener::new(),
            platform: FixedPlatform::default(),
            notifier: NoticeLog::new(),
        };
        let mut app = App::new(Ok(sample_catalog()), caps);
        let session = app.session_mut().unwrap();
        session.select_program(Some("zakat"));
        session.set_code("ali99");

        assert!(matches!(app.generate(), Err(PcgenError::Clipboard { .. })));
        assert!(app.session().and_then(Session::current).is_some());
        assert_eq!(app.capabilities().notifier.notices().len(), 1);
    }
}
