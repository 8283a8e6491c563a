//! User-facing notifications
//!
//! Components that need to tell the user something receive a `Presenter`
//! handle instead of reaching for a global UI root.

#[cfg(test)]
use std::cell::RefCell;
use std::fmt;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A titled message shown to the user, like an alert dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn photo_saved() -> Self {
        Self::info("Success", "Photo saved successfully.")
    }

    pub fn save_failed(reason: &impl fmt::Display) -> Self {
        Self::error("Error", format!("Failed to save photo. {reason}"))
    }

    pub fn camera_denied() -> Self {
        Self::error(
            "Camera Permission",
            "App needs access to your camera. Please enable camera access in Settings.",
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.title, self.message)
    }
}

/// Presentation context for notices
pub trait Presenter {
    fn notify(&self, notice: Notice);
}

/// Prints notices to stdout
#[derive(Debug, Clone, Default)]
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Info => log::info!("{notice}"),
            NoticeKind::Error => log::warn!("{notice}"),
        }
        println!("{notice}");
    }
}

/// Keeps notices in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    notices: RefCell<Vec<Notice>>,
}

#[cfg(test)]
impl RecordingPresenter {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

#[cfg(test)]
impl Presenter for RecordingPresenter {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

impl<P: Presenter + ?Sized> Presenter for &P {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_failed_message() {
        let notice = Notice::save_failed(&"disk full");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.to_string(), "[Error] Failed to save photo. disk full");
    }

    #[test]
    fn test_recording_presenter_through_reference() {
        let presenter = RecordingPresenter::default();
        let handle = &presenter;
        handle.notify(Notice::photo_saved());
        assert_eq!(presenter.notices(), vec![Notice::photo_saved()]);
    }
}
